// src/services/article_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{article_filter, ArticleRepository},
    models::article::{Article, ArticleFilter, ArticleInput, ArticleRecord},
    services::pricing::selling_price,
};

#[derive(Clone)]
pub struct ArticleService {
    article_repo: Arc<dyn ArticleRepository>,
}

impl ArticleService {
    pub fn new(article_repo: Arc<dyn ArticleRepository>) -> Self {
        Self { article_repo }
    }

    // --- CREATE ---
    pub async fn create_article(&self, input: ArticleInput) -> Result<Article, AppError> {
        // 1. Duplicate check before anything is written
        if self
            .article_repo
            .find_by_article_number(&input.article_number)
            .await?
            .is_some()
        {
            return Err(AppError::ArticleNumberAlreadyExists(input.article_number));
        }

        // 2. Price and persist (a concurrent insert still ends up as a 409 from the unique key)
        let is_available = input.is_available.unwrap_or(true);
        let record = to_record(input, is_available)?;
        let article = self.article_repo.insert(&record).await?;

        tracing::info!(
            "📦 Article {} ({}) created, selling price {}",
            article.article_number,
            article.id,
            article.selling_price
        );
        Ok(article)
    }

    pub async fn get_article(&self, id: Uuid) -> Result<Article, AppError> {
        self.article_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::ArticleNotFound(id))
    }

    pub async fn search_articles(&self, filter: &ArticleFilter) -> Result<Vec<Article>, AppError> {
        let conditions = article_filter::conditions(filter);
        tracing::debug!("Article search with {} condition(s)", conditions.len());
        self.article_repo.find_filtered(&conditions).await
    }

    // --- UPDATE ---
    pub async fn update_article(&self, id: Uuid, input: ArticleInput) -> Result<Article, AppError> {
        let existing = self.get_article(id).await?;

        // The article number is fixed at creation; whatever the client sent is ignored.
        let is_available = input.is_available.unwrap_or(existing.is_available);
        let record = ArticleRecord {
            article_number: existing.article_number,
            ..to_record(input, is_available)?
        };

        let article = self
            .article_repo
            .update(id, &record)
            .await?
            .ok_or(AppError::ArticleNotFound(id))?;

        tracing::info!("📝 Article {} updated", article.id);
        Ok(article)
    }

    // --- DELETE ---
    pub async fn delete_article(&self, id: Uuid) -> Result<(), AppError> {
        if !self.article_repo.delete(id).await? {
            return Err(AppError::ArticleNotFound(id));
        }
        tracing::info!("🗑️ Article {} deleted", id);
        Ok(())
    }

    pub async fn available_supplier_names(&self) -> Result<Vec<String>, AppError> {
        self.article_repo.available_supplier_names().await
    }
}

fn to_record(input: ArticleInput, is_available: bool) -> Result<ArticleRecord, AppError> {
    Ok(ArticleRecord {
        selling_price: selling_price(input.purchase_price, input.tax_rate_percent)?,
        article_number: input.article_number,
        name: input.name,
        unit: input.unit,
        purchase_price: input.purchase_price,
        tax_rate_percent: input.tax_rate_percent,
        manufacturer: input.manufacturer,
        supplier: input.supplier,
        category: input.category,
        stock_level: input.stock_level,
        description: input.description,
        is_available,
    })
}
