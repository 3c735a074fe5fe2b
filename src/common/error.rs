// src/common/error.rs

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Service-level errors. The HTTP layer turns them into `ApiError` via `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    ValidationError(#[from] ValidationErrors),

    #[error("Article {0} not found")]
    ArticleNotFound(Uuid),

    #[error("Article number '{0}' already exists")]
    ArticleNumberAlreadyExists(String),

    #[error("Supplier {0} not found")]
    SupplierNotFound(Uuid),

    #[error("Supplier name '{0}' already exists")]
    SupplierNameAlreadyExists(String),

    #[error("Payment term {0} not found")]
    PaymentTermNotFound(Uuid),

    #[error("Payment term '{0}' already exists")]
    PaymentTermAlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Forbidden")]
    Forbidden,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    // Status code plus the i18n key (and optional interpolated value) for the message.
    fn classify(&self) -> (StatusCode, &'static str, Option<String>) {
        match self {
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "validation.failed", None),
            AppError::ArticleNotFound(id) => {
                (StatusCode::NOT_FOUND, "article.not_found", Some(id.to_string()))
            }
            AppError::ArticleNumberAlreadyExists(number) => {
                (StatusCode::CONFLICT, "article.duplicate_number", Some(number.clone()))
            }
            AppError::SupplierNotFound(id) => {
                (StatusCode::NOT_FOUND, "supplier.not_found", Some(id.to_string()))
            }
            AppError::SupplierNameAlreadyExists(name) => {
                (StatusCode::CONFLICT, "supplier.duplicate_name", Some(name.clone()))
            }
            AppError::PaymentTermNotFound(id) => {
                (StatusCode::NOT_FOUND, "payment_term.not_found", Some(id.to_string()))
            }
            AppError::PaymentTermAlreadyExists(definition) => {
                (StatusCode::CONFLICT, "payment_term.duplicate", Some(definition.clone()))
            }
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "auth.invalid_credentials", None),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "auth.invalid_token", None),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "auth.forbidden", None),
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", None),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.classify().0
    }

    /// Builds the localized HTTP error for this failure.
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let (status, key, value) = self.classify();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal server error: {}", self);
        }

        let error = store.translate(&locale.0, key, value.as_deref());

        let details = match self {
            AppError::ValidationError(errors) => {
                let mut fields = BTreeMap::new();
                collect_validation_details("", errors, &mut fields);
                Some(json!(fields))
            }
            _ => None,
        };

        ApiError { status, error, details }
    }
}

// Flattens nested validator output into "contactPeople[0].email"-style keys.
fn collect_validation_details(
    prefix: &str,
    errors: &ValidationErrors,
    out: &mut BTreeMap<String, Vec<String>>,
) {
    for (field, kind) in errors.errors() {
        let field = camel_case(field);
        let path = if prefix.is_empty() {
            field
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = field_errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                out.insert(path, messages);
            }
            ValidationErrorsKind::Struct(inner) => collect_validation_details(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_validation_details(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

// Field keys follow the JSON names: "tax_rate_percent" -> "taxRatePercent".
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

// The JSON error body every handler answers with.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    fn store() -> I18nStore {
        I18nStore::new()
    }

    #[test]
    fn duplicate_article_number_is_conflict() {
        let err = AppError::ArticleNumberAlreadyExists("4006381333931".into());
        let api = err.to_api_error(&Locale("en".into()), &store());

        assert_eq!(api.status, StatusCode::CONFLICT);
        assert!(api.error.contains("4006381333931"));
        assert!(api.details.is_none());
    }

    #[test]
    fn not_found_variants_map_to_404() {
        let id = Uuid::new_v4();
        for err in [
            AppError::ArticleNotFound(id),
            AppError::SupplierNotFound(id),
            AppError::PaymentTermNotFound(id),
        ] {
            assert_eq!(err.status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn validation_details_are_flattened_per_field() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("length");
        err.message = Some("GTIN must be between 8 and 18 characters.".into());
        errors.add("articleNumber", err);

        let api = AppError::ValidationError(errors).to_api_error(&Locale("en".into()), &store());

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.expect("details present");
        assert_eq!(
            details["articleNumber"][0],
            "GTIN must be between 8 and 18 characters."
        );
    }

    #[test]
    fn field_keys_use_json_names() {
        let mut errors = ValidationErrors::new();
        errors.add("house_number", ValidationError::new("blank"));

        let mut fields = BTreeMap::new();
        collect_validation_details("", &errors, &mut fields);

        assert!(fields.contains_key("houseNumber"));
        assert_eq!(camel_case("contact_people"), "contactPeople");
        assert_eq!(camel_case("articleNumber"), "articleNumber");
    }

    #[test]
    fn messages_follow_the_request_locale() {
        let api = AppError::InvalidToken.to_api_error(&Locale("de".into()), &store());
        assert_eq!(api.status, StatusCode::UNAUTHORIZED);
        assert_eq!(api.error, store().translate("de", "auth.invalid_token", None));
        assert_ne!(api.error, store().translate("en", "auth.invalid_token", None));
    }

    #[test]
    fn infrastructure_failures_hide_details() {
        let api = AppError::DatabaseError(sqlx::Error::PoolTimedOut)
            .to_api_error(&Locale("en".into()), &store());
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.error.contains("pool"));
    }
}
