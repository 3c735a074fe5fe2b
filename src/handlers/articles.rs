// src/handlers/articles.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        json::AppJson,
        validation::{validate_not_blank, validate_percentage, validate_positive},
    },
    config::AppState,
    middleware::{
        i18n::Locale,
        role::{AdminOnly, AnyStaff, RequireRole},
    },
    models::article::{Article, ArticleFilter, ArticleInput},
};

// ---
// Payload: create / update
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePayload {
    // GTIN-8 up to GTIN-18
    #[validate(
        length(min = 8, max = 18, message = "The article number must be 8 to 18 characters long."),
        custom(function = "validate_not_blank")
    )]
    #[schema(example = "4006381333931")]
    pub article_number: String,

    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Monitor 27 Zoll")]
    pub name: String,

    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Stück")]
    pub unit: String,

    #[validate(custom(function = "validate_positive"))]
    #[schema(value_type = f64, example = 10.0)]
    pub purchase_price: Decimal,

    #[validate(custom(function = "validate_percentage"))]
    #[schema(value_type = f64, example = 19.0)]
    pub tax_rate_percent: Decimal,

    #[validate(custom(function = "validate_not_blank"))]
    pub manufacturer: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub supplier: String,

    pub category: Option<String>,

    #[validate(range(min = 0, message = "The stock level cannot be negative."))]
    pub stock_level: i32,

    #[validate(length(max = 1024, message = "The description may have at most 1024 characters."))]
    pub description: Option<String>,

    /// Defaults to `true` on create; keeps the stored value on update when omitted.
    pub is_available: Option<bool>,
}

impl ArticlePayload {
    // Runs before `validate()` so the length rule sees the stored value.
    fn normalize(&mut self) {
        self.article_number = self.article_number.trim().to_string();
    }

    fn into_input(self) -> ArticleInput {
        ArticleInput {
            article_number: self.article_number,
            name: self.name,
            unit: self.unit,
            purchase_price: self.purchase_price,
            tax_rate_percent: self.tax_rate_percent,
            manufacturer: self.manufacturer,
            supplier: self.supplier,
            // An empty category is the same as none
            category: self.category.filter(|c| !c.trim().is_empty()),
            stock_level: self.stock_level,
            description: self.description,
            is_available: self.is_available,
        }
    }
}

// ---
// Handler: create_article
// ---
#[utoipa::path(
    post,
    path = "/api/v1/articles",
    tag = "Articles",
    request_body = ArticlePayload,
    responses(
        (status = 201, description = "Article created", body = Article),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admins only"),
        (status = 409, description = "Article number already exists")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_article(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminOnly>,
    AppJson(mut payload): AppJson<ArticlePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.normalize();
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let article = app_state
        .article_service
        .create_article(payload.into_input())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(article)))
}

// ---
// Handler: search_articles
// ---
#[utoipa::path(
    get,
    path = "/api/v1/articles",
    tag = "Articles",
    params(ArticleFilter),
    responses(
        (status = 200, description = "Articles matching every supplied filter, ordered by name", body = Vec<Article>),
        (status = 401, description = "Not authenticated")
    ),
    security(("api_jwt" = []))
)]
pub async fn search_articles(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AnyStaff>,
    Query(filter): Query<ArticleFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let articles = app_state
        .article_service
        .search_articles(&filter)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(articles))
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/supplier-names",
    tag = "Articles",
    responses(
        (status = 200, description = "Distinct suppliers of available articles", body = Vec<String>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_supplier_names(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AnyStaff>,
) -> Result<impl IntoResponse, ApiError> {
    let names = app_state
        .article_service
        .available_supplier_names()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(names))
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/{id}",
    tag = "Articles",
    params(("id" = Uuid, Path, description = "Article id")),
    responses(
        (status = 200, body = Article),
        (status = 404, description = "Unknown article")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_article(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AnyStaff>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let article = app_state
        .article_service
        .get_article(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(article))
}

// ---
// Handler: update_article (article number stays as created)
// ---
#[utoipa::path(
    put,
    path = "/api/v1/articles/{id}",
    tag = "Articles",
    params(("id" = Uuid, Path, description = "Article id")),
    request_body = ArticlePayload,
    responses(
        (status = 200, description = "Article updated, selling price recomputed", body = Article),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Unknown article")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_article(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
    AppJson(mut payload): AppJson<ArticlePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.normalize();
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let article = app_state
        .article_service
        .update_article(id, payload.into_input())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(article))
}

#[utoipa::path(
    delete,
    path = "/api/v1/articles/{id}",
    tag = "Articles",
    params(("id" = Uuid, Path, description = "Article id")),
    responses(
        (status = 204, description = "Article deleted"),
        (status = 404, description = "Unknown article")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_article(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .article_service
        .delete_article(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
