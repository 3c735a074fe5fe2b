// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Articles ---
        handlers::articles::create_article,
        handlers::articles::search_articles,
        handlers::articles::list_supplier_names,
        handlers::articles::get_article,
        handlers::articles::update_article,
        handlers::articles::delete_article,

        // --- Suppliers ---
        handlers::suppliers::create_supplier,
        handlers::suppliers::list_suppliers,
        handlers::suppliers::get_supplier,
        handlers::suppliers::update_supplier,
        handlers::suppliers::delete_supplier,

        // --- Payment terms ---
        handlers::payment_terms::create_payment_term,
        handlers::payment_terms::list_payment_terms,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::AuthContext,
            models::auth::LoginPayload,
            models::auth::AuthResponse,

            // --- Articles ---
            models::article::Article,
            handlers::articles::ArticlePayload,

            // --- Suppliers ---
            models::supplier::PaymentTerm,
            models::supplier::ContactPerson,
            models::supplier::Supplier,
            handlers::suppliers::SupplierPayload,
            handlers::suppliers::ContactPersonPayload,
            handlers::payment_terms::PaymentTermPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Login and caller context"),
        (name = "Articles", description = "Article catalogue with selling price calculation"),
        (name = "Suppliers", description = "Suppliers and their contact people"),
        (name = "Payment Terms", description = "Payment terms referenced by suppliers")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/api/v1/auth/login",
            "/api/v1/auth/me",
            "/api/v1/articles",
            "/api/v1/articles/supplier-names",
            "/api/v1/articles/{id}",
            "/api/v1/suppliers",
            "/api/v1/suppliers/{id}",
            "/api/v1/payment-terms",
        ] {
            assert!(paths.contains(&path), "{} is not documented", path);
        }
    }
}
