// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{connect_database, AppConfig, AppState};
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env()?;
    let db_pool = connect_database(&config).await?;

    sqlx::migrate!().run(&db_pool).await?;
    tracing::info!("✅ Database migrations applied");

    let app_state = AppState::from_config(&config, db_pool).await?;
    let app = build_router(app_state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("🚀 Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(app_state: AppState) -> Router {
    // Public: login. Everything else under /auth needs a token.
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .merge(
            Router::new()
                .route("/me", get(handlers::auth::get_me))
                .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard)),
        );

    // Read access for cashiers and admins, writes for admins (checked per handler)
    let article_routes = Router::new()
        .route(
            "/",
            post(handlers::articles::create_article).get(handlers::articles::search_articles),
        )
        .route("/supplier-names", get(handlers::articles::list_supplier_names))
        .route(
            "/{id}",
            get(handlers::articles::get_article)
                .put(handlers::articles::update_article)
                .delete(handlers::articles::delete_article),
        )
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let supplier_routes = Router::new()
        .route(
            "/",
            post(handlers::suppliers::create_supplier).get(handlers::suppliers::list_suppliers),
        )
        .route(
            "/{id}",
            get(handlers::suppliers::get_supplier)
                .put(handlers::suppliers::update_supplier)
                .delete(handlers::suppliers::delete_supplier),
        )
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let payment_term_routes = Router::new()
        .route(
            "/",
            post(handlers::payment_terms::create_payment_term)
                .get(handlers::payment_terms::list_payment_terms),
        )
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/articles", article_routes)
        .nest("/api/v1/suppliers", supplier_routes)
        .nest("/api/v1/payment-terms", payment_term_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
