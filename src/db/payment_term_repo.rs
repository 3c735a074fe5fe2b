// src/db/payment_term_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::supplier::{PaymentTerm, PaymentTermInput},
};

#[async_trait]
pub trait PaymentTermRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PaymentTerm>, AppError>;

    async fn find_all(&self) -> Result<Vec<PaymentTerm>, AppError>;

    async fn insert(&self, input: &PaymentTermInput) -> Result<PaymentTerm, AppError>;
}

#[derive(Clone)]
pub struct PgPaymentTermRepository {
    pool: PgPool,
}

impl PgPaymentTermRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentTermRepository for PgPaymentTermRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PaymentTerm>, AppError> {
        let term = sqlx::query_as::<_, PaymentTerm>("SELECT * FROM payment_terms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(term)
    }

    async fn find_all(&self) -> Result<Vec<PaymentTerm>, AppError> {
        let terms = sqlx::query_as::<_, PaymentTerm>("SELECT * FROM payment_terms ORDER BY definition ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(terms)
    }

    async fn insert(&self, input: &PaymentTermInput) -> Result<PaymentTerm, AppError> {
        sqlx::query_as::<_, PaymentTerm>(
            r#"
            INSERT INTO payment_terms (definition, description)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(&input.definition)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::PaymentTermAlreadyExists(input.definition.clone());
                }
            }
            e.into()
        })
    }
}
