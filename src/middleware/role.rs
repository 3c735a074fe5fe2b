// src/middleware/role.rs

use std::marker::PhantomData;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::auth::{AuthContext, Role},
};

/// A set of roles allowed to call a route.
pub trait RoleDef: Send + Sync + 'static {
    fn allowed() -> &'static [Role];
}

/// Handler guard: rejects with 401 when `auth_guard` did not run (or found no
/// caller) and with 403 when the caller's role is not in `T::allowed()`.
pub struct RequireRole<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let locale = Locale::from_parts(parts);

        // A. Who is calling
        let context = parts
            .extensions
            .get::<AuthContext>()
            .ok_or_else(|| AppError::InvalidToken.to_api_error(&locale, &app_state.i18n_store))?;

        // B. Is that role allowed here
        if !T::allowed().contains(&context.role) {
            tracing::warn!(
                "'{}' ({:?}) denied, requires one of {:?}",
                context.username,
                context.role,
                T::allowed()
            );
            return Err(AppError::Forbidden.to_api_error(&locale, &app_state.i18n_store));
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// Role sets
// ---

/// Cashiers and admins: reading the article catalogue.
pub struct AnyStaff;
impl RoleDef for AnyStaff {
    fn allowed() -> &'static [Role] {
        &[Role::Cashier, Role::Admin]
    }
}

/// Maintenance of articles, suppliers and payment terms.
pub struct AdminOnly;
impl RoleDef for AdminOnly {
    fn allowed() -> &'static [Role] {
        &[Role::Admin]
    }
}
