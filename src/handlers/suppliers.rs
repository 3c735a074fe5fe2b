// src/handlers/suppliers.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        json::AppJson,
        validation::{validate_not_blank, PHONE_PATTERN},
    },
    config::AppState,
    middleware::{
        i18n::Locale,
        role::{AdminOnly, RequireRole},
    },
    models::supplier::{ContactPersonInput, Supplier, SupplierInput},
};

// ---
// Payloads
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactPersonPayload {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Anna")]
    pub first_name: String,

    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Schmidt")]
    pub last_name: String,

    #[validate(length(max = 100, message = "The role may have at most 100 characters."))]
    #[schema(example = "Vertrieb")]
    pub role: Option<String>,

    #[validate(regex(path = *PHONE_PATTERN, message = "Invalid phone number."))]
    #[schema(example = "+49 30 123456")]
    pub phone: Option<String>,

    #[validate(
        email(message = "Invalid e-mail address."),
        length(max = 255, message = "The e-mail may have at most 255 characters.")
    )]
    #[schema(example = "anna.schmidt@mueller.example")]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPayload {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Bürobedarf Müller GmbH")]
    pub name: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub street: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub house_number: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub zip: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub city: String,

    pub country: Option<String>,

    #[validate(
        email(message = "Invalid e-mail address."),
        length(max = 255, message = "The e-mail may have at most 255 characters.")
    )]
    pub email: Option<String>,

    #[validate(
        custom(function = "validate_not_blank"),
        regex(path = *PHONE_PATTERN, message = "Invalid phone number.")
    )]
    pub phone: String,

    pub payment_term_id: Uuid,

    #[validate(nested)]
    #[serde(default)]
    pub contact_people: Vec<ContactPersonPayload>,
}

impl SupplierPayload {
    // Forms send "" for an empty optional e-mail.
    fn normalize(&mut self) {
        self.email = self.email.take().filter(|e| !e.trim().is_empty());
    }

    fn into_input(self) -> SupplierInput {
        SupplierInput {
            name: self.name,
            street: self.street,
            house_number: self.house_number,
            zip: self.zip,
            city: self.city,
            country: self.country,
            email: self.email,
            phone: self.phone,
            payment_term_id: self.payment_term_id,
            contact_people: self
                .contact_people
                .into_iter()
                .map(|c| ContactPersonInput {
                    first_name: c.first_name,
                    last_name: c.last_name,
                    role: c.role,
                    phone: c.phone,
                    // Contacts are matched by e-mail
                    email: c.email.to_lowercase(),
                })
                .collect(),
        }
    }
}

// ---
// Handlers
// ---
#[utoipa::path(
    post,
    path = "/api/v1/suppliers",
    tag = "Suppliers",
    request_body = SupplierPayload,
    responses(
        (status = 201, description = "Supplier created", body = Supplier),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Unknown payment term"),
        (status = 409, description = "Supplier name already exists")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_supplier(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminOnly>,
    AppJson(mut payload): AppJson<SupplierPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.normalize();
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let supplier = app_state
        .supplier_service
        .create_supplier(payload.into_input())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(supplier)))
}

#[utoipa::path(
    get,
    path = "/api/v1/suppliers",
    tag = "Suppliers",
    responses((status = 200, body = Vec<Supplier>)),
    security(("api_jwt" = []))
)]
pub async fn list_suppliers(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminOnly>,
) -> Result<impl IntoResponse, ApiError> {
    let suppliers = app_state
        .supplier_service
        .list_suppliers()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(suppliers))
}

#[utoipa::path(
    get,
    path = "/api/v1/suppliers/{id}",
    tag = "Suppliers",
    params(("id" = Uuid, Path, description = "Supplier id")),
    responses(
        (status = 200, body = Supplier),
        (status = 404, description = "Unknown supplier")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_supplier(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let supplier = app_state
        .supplier_service
        .get_supplier(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(supplier))
}

#[utoipa::path(
    put,
    path = "/api/v1/suppliers/{id}",
    tag = "Suppliers",
    params(("id" = Uuid, Path, description = "Supplier id")),
    request_body = SupplierPayload,
    responses(
        (status = 200, description = "Supplier updated, contact people replaced", body = Supplier),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Unknown supplier or payment term"),
        (status = 409, description = "Supplier name already exists")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_supplier(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
    AppJson(mut payload): AppJson<SupplierPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.normalize();
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let supplier = app_state
        .supplier_service
        .update_supplier(id, payload.into_input())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(supplier))
}

#[utoipa::path(
    delete,
    path = "/api/v1/suppliers/{id}",
    tag = "Suppliers",
    params(("id" = Uuid, Path, description = "Supplier id")),
    responses(
        (status = 204, description = "Supplier deleted"),
        (status = 404, description = "Unknown supplier")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_supplier(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .supplier_service
        .delete_supplier(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(contact_email: &str, phone: &str) -> SupplierPayload {
        serde_json::from_value(json!({
            "name": "Müller GmbH",
            "street": "Hauptstraße",
            "houseNumber": "12a",
            "zip": "10115",
            "city": "Berlin",
            "phone": phone,
            "paymentTermId": Uuid::new_v4(),
            "contactPeople": [{
                "firstName": "Anna",
                "lastName": "Schmidt",
                "email": contact_email
            }]
        }))
        .unwrap()
    }

    #[test]
    fn valid_supplier_passes() {
        assert!(payload("anna@mueller.example", "+49 (30) 123-456").validate().is_ok());
    }

    #[test]
    fn invalid_phone_is_rejected() {
        let errors = payload("anna@mueller.example", "call me").validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 1);
    }

    #[test]
    fn nested_contact_errors_are_reported() {
        let errors = payload("not-an-email", "030 123456").validate().unwrap_err();
        assert!(errors.field_errors().is_empty());
        assert_eq!(errors.errors().len(), 1);
    }

    #[test]
    fn blank_supplier_email_counts_as_absent() {
        let mut supplier = payload("anna@mueller.example", "030 123456");
        supplier.email = Some(String::new());
        supplier.normalize();

        assert!(supplier.validate().is_ok());
        assert_eq!(supplier.into_input().email, None);
    }

    #[test]
    fn contact_emails_are_normalized() {
        let input = payload("Anna@Mueller.Example", "030 123456").into_input();
        assert_eq!(input.contact_people[0].email, "anna@mueller.example");
    }
}
