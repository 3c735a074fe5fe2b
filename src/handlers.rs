// src/handlers.rs

pub mod articles;
pub mod auth;
pub mod payment_terms;
pub mod suppliers;
