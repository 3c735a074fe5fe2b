// src/services.rs

pub mod article_service;
pub mod auth;
pub mod pricing;
pub mod supplier_service;
