// src/db/article_repo.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::article_filter::{push_where, ArticleCondition},
    models::article::{Article, ArticleRecord},
};

/// Persistence boundary for the `articles` table.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, AppError>;

    async fn find_by_article_number(&self, article_number: &str) -> Result<Option<Article>, AppError>;

    /// Articles matching ALL conditions, ordered by name.
    async fn find_filtered(&self, conditions: &[ArticleCondition]) -> Result<Vec<Article>, AppError>;

    async fn insert(&self, record: &ArticleRecord) -> Result<Article, AppError>;

    /// Overwrites the mutable columns; `None` when the id does not exist.
    async fn update(&self, id: Uuid, record: &ArticleRecord) -> Result<Option<Article>, AppError>;

    /// `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    /// Distinct supplier names of available articles, sorted.
    async fn available_supplier_names(&self) -> Result<Vec<String>, AppError>;
}

#[derive(Clone)]
pub struct PgArticleRepository {
    pool: PgPool,
}

impl PgArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Unique violation on article_number becomes a 409 instead of a 500.
fn map_write_error(e: sqlx::Error, article_number: &str) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::ArticleNumberAlreadyExists(article_number.to_string());
        }
    }
    e.into()
}

#[async_trait]
impl ArticleRepository for PgArticleRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, AppError> {
        let article = sqlx::query_as::<_, Article>("SELECT * FROM articles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(article)
    }

    async fn find_by_article_number(&self, article_number: &str) -> Result<Option<Article>, AppError> {
        let article = sqlx::query_as::<_, Article>("SELECT * FROM articles WHERE article_number = $1")
            .bind(article_number)
            .fetch_optional(&self.pool)
            .await?;
        Ok(article)
    }

    async fn find_filtered(&self, conditions: &[ArticleCondition]) -> Result<Vec<Article>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM articles");
        push_where(&mut builder, conditions);
        builder.push(" ORDER BY name ASC, article_number ASC");

        let articles = builder
            .build_query_as::<Article>()
            .fetch_all(&self.pool)
            .await?;
        Ok(articles)
    }

    async fn insert(&self, record: &ArticleRecord) -> Result<Article, AppError> {
        sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles (
                article_number, name, unit, purchase_price, tax_rate_percent, selling_price,
                manufacturer, supplier, category, stock_level, description, is_available
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(&record.article_number)
        .bind(&record.name)
        .bind(&record.unit)
        .bind(record.purchase_price)
        .bind(record.tax_rate_percent)
        .bind(record.selling_price)
        .bind(&record.manufacturer)
        .bind(&record.supplier)
        .bind(&record.category)
        .bind(record.stock_level)
        .bind(&record.description)
        .bind(record.is_available)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &record.article_number))
    }

    async fn update(&self, id: Uuid, record: &ArticleRecord) -> Result<Option<Article>, AppError> {
        // article_number is deliberately not part of the SET list
        let article = sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles SET
                name = $2,
                unit = $3,
                purchase_price = $4,
                tax_rate_percent = $5,
                selling_price = $6,
                manufacturer = $7,
                supplier = $8,
                category = $9,
                stock_level = $10,
                description = $11,
                is_available = $12,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&record.name)
        .bind(&record.unit)
        .bind(record.purchase_price)
        .bind(record.tax_rate_percent)
        .bind(record.selling_price)
        .bind(&record.manufacturer)
        .bind(&record.supplier)
        .bind(&record.category)
        .bind(record.stock_level)
        .bind(&record.description)
        .bind(record.is_available)
        .fetch_optional(&self.pool)
        .await?;
        Ok(article)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn available_supplier_names(&self) -> Result<Vec<String>, AppError> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT supplier FROM articles WHERE is_available = TRUE ORDER BY supplier ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }
}
