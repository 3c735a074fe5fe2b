// src/models/supplier.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- 1. Payment terms ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTerm {
    pub id: Uuid,

    #[schema(example = "30 days net")]
    pub definition: String,

    #[schema(example = "Payment within 30 days without deduction")]
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
}

// --- 2. Contact persons (shared between suppliers) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactPerson {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub email: String,
}

// --- 3. Supplier, with its payment term and contact people resolved ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: Uuid,

    #[schema(example = "Bürobedarf Müller GmbH")]
    pub name: String,

    pub street: String,
    pub house_number: String,
    pub zip: String,
    pub city: String,
    pub country: Option<String>,
    pub email: Option<String>,
    pub phone: String,
    pub payment_term: PaymentTerm,
    pub contact_people: Vec<ContactPerson>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ContactPersonInput {
    pub first_name: String,
    pub last_name: String,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub email: String,
}

/// Validated supplier data for create/update.
#[derive(Debug, Clone)]
pub struct SupplierInput {
    pub name: String,
    pub street: String,
    pub house_number: String,
    pub zip: String,
    pub city: String,
    pub country: Option<String>,
    pub email: Option<String>,
    pub phone: String,
    pub payment_term_id: Uuid,
    pub contact_people: Vec<ContactPersonInput>,
}

#[derive(Debug, Clone)]
pub struct PaymentTermInput {
    pub definition: String,
    pub description: Option<String>,
}
