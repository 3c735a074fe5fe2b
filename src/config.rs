// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::{
        ArticleRepository, PaymentTermRepository, PgArticleRepository, PgPaymentTermRepository,
        PgSupplierRepository, SupplierRepository,
    },
    models::auth::Role,
    services::{
        article_service::ArticleService,
        auth::{AuthService, Credentials},
        supplier_service::SupplierService,
    },
};

// Everything read from the environment (or `.env`) at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub token_ttl_hours: i64,
    pub accounts: Vec<Credentials>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| -> anyhow::Result<String> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{} must be set", key))
        };
        let optional = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let db_max_connections = optional("DB_MAX_CONNECTIONS", "5")
            .parse()
            .context("DB_MAX_CONNECTIONS must be a positive number")?;
        let token_ttl_hours = optional("TOKEN_TTL_HOURS", "12")
            .parse()
            .context("TOKEN_TTL_HOURS must be a number of hours")?;

        let accounts = vec![
            Credentials {
                username: optional("ADMIN_USERNAME", "admin"),
                password: required("ADMIN_PASSWORD")?,
                role: Role::Admin,
            },
            Credentials {
                username: optional("CASHIER_USERNAME", "cashier"),
                password: required("CASHIER_PASSWORD")?,
                role: Role::Cashier,
            },
        ];

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            bind_addr: optional("BIND_ADDR", "0.0.0.0:3000"),
            db_max_connections,
            token_ttl_hours,
            accounts,
        })
    }
}

pub async fn connect_database(config: &AppConfig) -> anyhow::Result<PgPool> {
    let db_pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&config.database_url)
        .await
        .context("Could not connect to the database")?;

    tracing::info!("✅ Database connection established");
    Ok(db_pool)
}

#[derive(Clone)]
pub struct AppState {
    pub article_service: ArticleService,
    pub supplier_service: SupplierService,
    pub auth_service: AuthService,
    pub i18n_store: Arc<I18nStore>,
}

impl AppState {
    pub fn new(
        article_repo: Arc<dyn ArticleRepository>,
        supplier_repo: Arc<dyn SupplierRepository>,
        payment_term_repo: Arc<dyn PaymentTermRepository>,
        auth_service: AuthService,
    ) -> Self {
        Self {
            article_service: ArticleService::new(article_repo),
            supplier_service: SupplierService::new(supplier_repo, payment_term_repo),
            auth_service,
            i18n_store: Arc::new(I18nStore::new()),
        }
    }

    /// Wires the Postgres repositories and the configured accounts.
    pub async fn from_config(config: &AppConfig, db_pool: PgPool) -> anyhow::Result<Self> {
        let accounts = AuthService::hash_accounts(config.accounts.clone(), bcrypt::DEFAULT_COST)
            .await
            .context("Could not hash the configured passwords")?;
        let auth_service = AuthService::new(
            accounts,
            config.jwt_secret.clone(),
            chrono::Duration::hours(config.token_ttl_hours),
        );

        Ok(Self::new(
            Arc::new(PgArticleRepository::new(db_pool.clone())),
            Arc::new(PgSupplierRepository::new(db_pool.clone())),
            Arc::new(PgPaymentTermRepository::new(db_pool)),
            auth_service,
        ))
    }
}
