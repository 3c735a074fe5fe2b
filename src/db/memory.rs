// src/db/memory.rs
//
// In-memory repositories for tests. They enforce the same unique keys as the
// Postgres schema so service rules can be exercised without a database.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        article_filter::ArticleCondition, ArticleRepository, PaymentTermRepository,
        SupplierRepository,
    },
    models::{
        article::{Article, ArticleRecord},
        supplier::{ContactPerson, ContactPersonInput, PaymentTerm, PaymentTermInput, Supplier, SupplierInput},
    },
};

#[derive(Default)]
struct Tables {
    articles: Vec<Article>,
    suppliers: Vec<Supplier>,
    contact_persons: Vec<ContactPerson>,
    payment_terms: Vec<PaymentTerm>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn article_count(&self) -> usize {
        self.tables.lock().unwrap().articles.len()
    }

    pub fn supplier_count(&self) -> usize {
        self.tables.lock().unwrap().suppliers.len()
    }
}

impl Tables {
    // Same semantics as the ON CONFLICT (email) upsert in Postgres
    fn upsert_contacts(&mut self, inputs: &[ContactPersonInput]) -> Vec<ContactPerson> {
        let mut linked: Vec<ContactPerson> = Vec::new();
        for input in inputs {
            let contact = match self.contact_persons.iter_mut().find(|c| c.email == input.email) {
                Some(existing) => {
                    existing.first_name = input.first_name.clone();
                    existing.last_name = input.last_name.clone();
                    existing.role = input.role.clone();
                    existing.phone = input.phone.clone();
                    existing.clone()
                }
                None => {
                    let created = ContactPerson {
                        id: Uuid::new_v4(),
                        first_name: input.first_name.clone(),
                        last_name: input.last_name.clone(),
                        role: input.role.clone(),
                        phone: input.phone.clone(),
                        email: input.email.clone(),
                    };
                    self.contact_persons.push(created.clone());
                    created
                }
            };
            if !linked.iter().any(|c| c.id == contact.id) {
                linked.push(contact);
            }
        }
        linked
    }

    fn payment_term(&self, id: Uuid) -> Result<PaymentTerm, AppError> {
        self.payment_terms
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(AppError::PaymentTermNotFound(id))
    }
}

#[async_trait]
impl ArticleRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.articles.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_article_number(&self, article_number: &str) -> Result<Option<Article>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .articles
            .iter()
            .find(|a| a.article_number == article_number)
            .cloned())
    }

    async fn find_filtered(&self, conditions: &[ArticleCondition]) -> Result<Vec<Article>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut found: Vec<Article> = tables
            .articles
            .iter()
            .filter(|a| conditions.iter().all(|c| c.matches(a)))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name).then(a.article_number.cmp(&b.article_number)));
        Ok(found)
    }

    async fn insert(&self, record: &ArticleRecord) -> Result<Article, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.articles.iter().any(|a| a.article_number == record.article_number) {
            return Err(AppError::ArticleNumberAlreadyExists(record.article_number.clone()));
        }
        let now = Utc::now();
        let article = Article {
            id: Uuid::new_v4(),
            article_number: record.article_number.clone(),
            name: record.name.clone(),
            unit: record.unit.clone(),
            purchase_price: record.purchase_price,
            tax_rate_percent: record.tax_rate_percent,
            selling_price: record.selling_price,
            manufacturer: record.manufacturer.clone(),
            supplier: record.supplier.clone(),
            category: record.category.clone(),
            stock_level: record.stock_level,
            description: record.description.clone(),
            is_available: record.is_available,
            created_at: now,
            updated_at: now,
        };
        tables.articles.push(article.clone());
        Ok(article)
    }

    async fn update(&self, id: Uuid, record: &ArticleRecord) -> Result<Option<Article>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(article) = tables.articles.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        article.name = record.name.clone();
        article.unit = record.unit.clone();
        article.purchase_price = record.purchase_price;
        article.tax_rate_percent = record.tax_rate_percent;
        article.selling_price = record.selling_price;
        article.manufacturer = record.manufacturer.clone();
        article.supplier = record.supplier.clone();
        article.category = record.category.clone();
        article.stock_level = record.stock_level;
        article.description = record.description.clone();
        article.is_available = record.is_available;
        article.updated_at = Utc::now();
        Ok(Some(article.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.articles.len();
        tables.articles.retain(|a| a.id != id);
        Ok(tables.articles.len() < before)
    }

    async fn available_supplier_names(&self) -> Result<Vec<String>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut names: Vec<String> = tables
            .articles
            .iter()
            .filter(|a| a.is_available)
            .map(|a| a.supplier.clone())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }
}

#[async_trait]
impl SupplierRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Supplier>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.suppliers.iter().find(|s| s.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Supplier>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut all = tables.suppliers.clone();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.suppliers.iter().any(|s| s.name == name))
    }

    async fn insert(&self, input: &SupplierInput) -> Result<Supplier, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.suppliers.iter().any(|s| s.name == input.name) {
            return Err(AppError::SupplierNameAlreadyExists(input.name.clone()));
        }
        let payment_term = tables.payment_term(input.payment_term_id)?;
        let contact_people = tables.upsert_contacts(&input.contact_people);
        let now = Utc::now();
        let supplier = Supplier {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            street: input.street.clone(),
            house_number: input.house_number.clone(),
            zip: input.zip.clone(),
            city: input.city.clone(),
            country: input.country.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            payment_term,
            contact_people,
            created_at: now,
            updated_at: now,
        };
        tables.suppliers.push(supplier.clone());
        Ok(supplier)
    }

    async fn update(&self, id: Uuid, input: &SupplierInput) -> Result<Option<Supplier>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.suppliers.iter().any(|s| s.id != id && s.name == input.name) {
            return Err(AppError::SupplierNameAlreadyExists(input.name.clone()));
        }
        if !tables.suppliers.iter().any(|s| s.id == id) {
            return Ok(None);
        }
        let payment_term = tables.payment_term(input.payment_term_id)?;
        let contact_people = tables.upsert_contacts(&input.contact_people);

        let Some(supplier) = tables.suppliers.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        supplier.name = input.name.clone();
        supplier.street = input.street.clone();
        supplier.house_number = input.house_number.clone();
        supplier.zip = input.zip.clone();
        supplier.city = input.city.clone();
        supplier.country = input.country.clone();
        supplier.email = input.email.clone();
        supplier.phone = input.phone.clone();
        supplier.payment_term = payment_term;
        supplier.contact_people = contact_people;
        supplier.updated_at = Utc::now();
        Ok(Some(supplier.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.suppliers.len();
        tables.suppliers.retain(|s| s.id != id);
        Ok(tables.suppliers.len() < before)
    }
}

#[async_trait]
impl PaymentTermRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PaymentTerm>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.payment_terms.iter().find(|t| t.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<PaymentTerm>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut all = tables.payment_terms.clone();
        all.sort_by(|a, b| a.definition.cmp(&b.definition));
        Ok(all)
    }

    async fn insert(&self, input: &PaymentTermInput) -> Result<PaymentTerm, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.payment_terms.iter().any(|t| t.definition == input.definition) {
            return Err(AppError::PaymentTermAlreadyExists(input.definition.clone()));
        }
        let term = PaymentTerm {
            id: Uuid::new_v4(),
            definition: input.definition.clone(),
            description: input.description.clone(),
            created_at: Utc::now(),
        };
        tables.payment_terms.push(term.clone());
        Ok(term)
    }
}
