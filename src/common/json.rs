// src/common/json.rs

use axum::{extract::rejection::JsonRejection, extract::FromRequest, http::StatusCode};
use serde_json::json;

use crate::common::error::ApiError;

// Same as `axum::Json`, but a bad body answers with our `ApiError` shape (400).
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            error: "The request body could not be read.".to_string(),
            details: Some(json!({ "body": [rejection.body_text()] })),
        }
    }
}
