// src/db.rs

pub mod article_filter;
pub mod article_repo;
pub use article_repo::{ArticleRepository, PgArticleRepository};
pub mod supplier_repo;
pub use supplier_repo::{PgSupplierRepository, SupplierRepository};
pub mod payment_term_repo;
pub use payment_term_repo::{PaymentTermRepository, PgPaymentTermRepository};

#[cfg(test)]
pub mod memory;
