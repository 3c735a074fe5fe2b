// src/handlers/payment_terms.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        json::AppJson,
        validation::validate_not_blank,
    },
    config::AppState,
    middleware::{
        i18n::Locale,
        role::{AdminOnly, RequireRole},
    },
    models::supplier::{PaymentTerm, PaymentTermInput},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTermPayload {
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 255, message = "The definition may have at most 255 characters.")
    )]
    #[schema(example = "30 days net")]
    pub definition: String,

    #[validate(length(max = 1024, message = "The description may have at most 1024 characters."))]
    pub description: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/payment-terms",
    tag = "Payment Terms",
    request_body = PaymentTermPayload,
    responses(
        (status = 201, description = "Payment term created", body = PaymentTerm),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Definition already exists")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_payment_term(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminOnly>,
    AppJson(payload): AppJson<PaymentTermPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let term = app_state
        .supplier_service
        .create_payment_term(PaymentTermInput {
            definition: payload.definition.trim().to_string(),
            description: payload.description,
        })
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(term)))
}

#[utoipa::path(
    get,
    path = "/api/v1/payment-terms",
    tag = "Payment Terms",
    responses((status = 200, body = Vec<PaymentTerm>)),
    security(("api_jwt" = []))
)]
pub async fn list_payment_terms(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminOnly>,
) -> Result<impl IntoResponse, ApiError> {
    let terms = app_state
        .supplier_service
        .list_payment_terms()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(terms))
}
