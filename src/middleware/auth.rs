// src/middleware/auth.rs

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeaderRejection,
    TypedHeader,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::auth::AuthContext,
};

// Validates the bearer token and puts the caller's `AuthContext` into the
// request extensions. Anything missing or malformed is a 401.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    bearer: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(authorization) = bearer
        .map_err(|_| AppError::InvalidToken.to_api_error(&locale, &app_state.i18n_store))?;

    let context = app_state
        .auth_service
        .validate_token(authorization.token())
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tracing::debug!("Request by '{}' ({:?})", context.username, context.role);

    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}

// Extractor for handlers that need to know who is calling.
pub struct AuthenticatedUser(pub AuthContext);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthContext>() {
            Some(context) => Ok(AuthenticatedUser(context.clone())),
            None => {
                let app_state = AppState::from_ref(state);
                Err(AppError::InvalidToken.to_api_error(&Locale::from_parts(parts), &app_state.i18n_store))
            }
        }
    }
}
