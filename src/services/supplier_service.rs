// src/services/supplier_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{PaymentTermRepository, SupplierRepository},
    models::supplier::{PaymentTerm, PaymentTermInput, Supplier, SupplierInput},
};

#[derive(Clone)]
pub struct SupplierService {
    supplier_repo: Arc<dyn SupplierRepository>,
    payment_term_repo: Arc<dyn PaymentTermRepository>,
}

impl SupplierService {
    pub fn new(
        supplier_repo: Arc<dyn SupplierRepository>,
        payment_term_repo: Arc<dyn PaymentTermRepository>,
    ) -> Self {
        Self { supplier_repo, payment_term_repo }
    }

    async fn ensure_payment_term(&self, id: Uuid) -> Result<(), AppError> {
        self.payment_term_repo
            .find_by_id(id)
            .await?
            .map(|_| ())
            .ok_or(AppError::PaymentTermNotFound(id))
    }

    // --- CREATE ---
    pub async fn create_supplier(&self, input: SupplierInput) -> Result<Supplier, AppError> {
        // 1. The referenced payment term must exist
        self.ensure_payment_term(input.payment_term_id).await?;

        // 2. Names are unique
        if self.supplier_repo.exists_by_name(&input.name).await? {
            return Err(AppError::SupplierNameAlreadyExists(input.name));
        }

        // 3. Row, contacts and links in one transaction
        let supplier = self.supplier_repo.insert(&input).await?;

        tracing::info!(
            "🏭 Supplier '{}' ({}) created with {} contact(s)",
            supplier.name,
            supplier.id,
            supplier.contact_people.len()
        );
        Ok(supplier)
    }

    pub async fn get_supplier(&self, id: Uuid) -> Result<Supplier, AppError> {
        self.supplier_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::SupplierNotFound(id))
    }

    pub async fn list_suppliers(&self) -> Result<Vec<Supplier>, AppError> {
        self.supplier_repo.find_all().await
    }

    // --- UPDATE ---
    pub async fn update_supplier(&self, id: Uuid, input: SupplierInput) -> Result<Supplier, AppError> {
        let existing = self.get_supplier(id).await?;
        self.ensure_payment_term(input.payment_term_id).await?;

        // Keeping the current name is not a collision
        if existing.name != input.name && self.supplier_repo.exists_by_name(&input.name).await? {
            return Err(AppError::SupplierNameAlreadyExists(input.name));
        }

        let supplier = self
            .supplier_repo
            .update(id, &input)
            .await?
            .ok_or(AppError::SupplierNotFound(id))?;

        tracing::info!("📝 Supplier {} updated", supplier.id);
        Ok(supplier)
    }

    // --- DELETE ---
    pub async fn delete_supplier(&self, id: Uuid) -> Result<(), AppError> {
        if !self.supplier_repo.delete(id).await? {
            return Err(AppError::SupplierNotFound(id));
        }
        tracing::info!("🗑️ Supplier {} deleted", id);
        Ok(())
    }

    // --- PAYMENT TERMS ---
    pub async fn create_payment_term(&self, input: PaymentTermInput) -> Result<PaymentTerm, AppError> {
        let term = self.payment_term_repo.insert(&input).await?;
        tracing::info!("💶 Payment term '{}' created", term.definition);
        Ok(term)
    }

    pub async fn list_payment_terms(&self) -> Result<Vec<PaymentTerm>, AppError> {
        self.payment_term_repo.find_all().await
    }
}
