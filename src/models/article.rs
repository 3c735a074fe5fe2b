// src/models/article.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

// --- Article (row of table `articles`) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Uuid,

    // GTIN, unique and immutable after creation
    #[schema(example = "4006381333931")]
    pub article_number: String,

    #[schema(example = "Monitor 27 Zoll")]
    pub name: String,

    #[schema(example = "Stück")]
    pub unit: String,

    #[schema(value_type = f64, example = 10.0)]
    pub purchase_price: Decimal,

    #[schema(value_type = f64, example = 19.0)]
    pub tax_rate_percent: Decimal,

    // Always purchase_price * (1 + tax_rate_percent / 100)
    #[schema(value_type = f64, example = 11.9)]
    pub selling_price: Decimal,

    pub manufacturer: String,
    pub supplier: String,
    pub category: Option<String>,
    pub stock_level: i32,
    pub description: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated business input for create/update, as received from the client.
#[derive(Debug, Clone)]
pub struct ArticleInput {
    pub article_number: String,
    pub name: String,
    pub unit: String,
    pub purchase_price: Decimal,
    pub tax_rate_percent: Decimal,
    pub manufacturer: String,
    pub supplier: String,
    pub category: Option<String>,
    pub stock_level: i32,
    pub description: Option<String>,
    pub is_available: Option<bool>,
}

/// The column values the repository writes. `article_number` is ignored on update.
#[derive(Debug, Clone)]
pub struct ArticleRecord {
    pub article_number: String,
    pub name: String,
    pub unit: String,
    pub purchase_price: Decimal,
    pub tax_rate_percent: Decimal,
    pub selling_price: Decimal,
    pub manufacturer: String,
    pub supplier: String,
    pub category: Option<String>,
    pub stock_level: i32,
    pub description: Option<String>,
    pub is_available: bool,
}

// --- Search / filter options (query string of GET /api/v1/articles) ---
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ArticleFilter {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Case-insensitive substring of the article number
    pub article_number: Option<String>,
    /// Exact category
    pub category: Option<String>,
    /// Exact supplier
    pub supplier: Option<String>,
    /// Exact manufacturer
    pub manufacturer: Option<String>,
    /// `true` restricts to available articles; `false` does not restrict
    pub is_available: Option<bool>,
}
