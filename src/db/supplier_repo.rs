// src/db/supplier_repo.rs

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::supplier::{ContactPerson, ContactPersonInput, PaymentTerm, Supplier, SupplierInput},
};

/// Persistence boundary for suppliers and their contact people.
#[async_trait]
pub trait SupplierRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Supplier>, AppError>;

    async fn find_all(&self) -> Result<Vec<Supplier>, AppError>;

    /// Case-sensitive exact match.
    async fn exists_by_name(&self, name: &str) -> Result<bool, AppError>;

    async fn insert(&self, input: &SupplierInput) -> Result<Supplier, AppError>;

    /// Overwrites all columns and replaces the contact set; `None` when the id does not exist.
    async fn update(&self, id: Uuid, input: &SupplierInput) -> Result<Option<Supplier>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

// Supplier row joined with its payment term
#[derive(Debug, FromRow)]
struct SupplierRow {
    id: Uuid,
    name: String,
    street: String,
    house_number: String,
    zip: String,
    city: String,
    country: Option<String>,
    email: Option<String>,
    phone: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    payment_term_id: Uuid,
    payment_term_definition: String,
    payment_term_description: Option<String>,
    payment_term_created_at: DateTime<Utc>,
}

impl SupplierRow {
    fn into_supplier(self, contact_people: Vec<ContactPerson>) -> Supplier {
        Supplier {
            id: self.id,
            name: self.name,
            street: self.street,
            house_number: self.house_number,
            zip: self.zip,
            city: self.city,
            country: self.country,
            email: self.email,
            phone: self.phone,
            payment_term: PaymentTerm {
                id: self.payment_term_id,
                definition: self.payment_term_definition,
                description: self.payment_term_description,
                created_at: self.payment_term_created_at,
            },
            contact_people,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct LinkedContact {
    supplier_id: Uuid,
    #[sqlx(flatten)]
    contact: ContactPerson,
}

const SELECT_SUPPLIERS: &str = r#"
    SELECT
        s.id, s.name, s.street, s.house_number, s.zip, s.city, s.country, s.email, s.phone,
        s.created_at, s.updated_at,
        pt.id AS payment_term_id,
        pt.definition AS payment_term_definition,
        pt.description AS payment_term_description,
        pt.created_at AS payment_term_created_at
    FROM suppliers s
    JOIN payment_terms pt ON pt.id = s.payment_term_id
"#;

fn map_write_error(e: sqlx::Error, name: &str) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation()
            && db_err.constraint().unwrap_or_default().contains("name")
        {
            return AppError::SupplierNameAlreadyExists(name.to_string());
        }
    }
    e.into()
}

// Loads the contact people of all given rows in one query and assembles the suppliers.
async fn attach_contacts(
    conn: &mut PgConnection,
    rows: Vec<SupplierRow>,
) -> Result<Vec<Supplier>, AppError> {
    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

    let linked = sqlx::query_as::<_, LinkedContact>(
        r#"
        SELECT scp.supplier_id, cp.id, cp.first_name, cp.last_name, cp.role, cp.phone, cp.email
        FROM supplier_contact_persons scp
        JOIN contact_persons cp ON cp.id = scp.contact_person_id
        WHERE scp.supplier_id = ANY($1)
        ORDER BY cp.last_name ASC, cp.first_name ASC
        "#,
    )
    .bind(&ids)
    .fetch_all(&mut *conn)
    .await?;

    let mut by_supplier: HashMap<Uuid, Vec<ContactPerson>> = HashMap::new();
    for link in linked {
        by_supplier.entry(link.supplier_id).or_default().push(link.contact);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let contacts = by_supplier.remove(&row.id).unwrap_or_default();
            row.into_supplier(contacts)
        })
        .collect())
}

async fn fetch_supplier(conn: &mut PgConnection, id: Uuid) -> Result<Option<Supplier>, AppError> {
    let row = sqlx::query_as::<_, SupplierRow>(&format!("{} WHERE s.id = $1", SELECT_SUPPLIERS))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    match row {
        Some(row) => Ok(attach_contacts(conn, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

// Clear-then-add: drops every link of the supplier, then upserts each contact
// person by e-mail and links it again.
async fn replace_contacts(
    conn: &mut PgConnection,
    supplier_id: Uuid,
    contacts: &[ContactPersonInput],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM supplier_contact_persons WHERE supplier_id = $1")
        .bind(supplier_id)
        .execute(&mut *conn)
        .await?;

    for contact in contacts {
        let contact_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO contact_persons (first_name, last_name, role, phone, email)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                role = EXCLUDED.role,
                phone = EXCLUDED.phone
            RETURNING id
            "#,
        )
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.role)
        .bind(&contact.phone)
        .bind(&contact.email)
        .fetch_one(&mut *conn)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO supplier_contact_persons (supplier_id, contact_person_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(supplier_id)
        .bind(contact_id)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

#[derive(Clone)]
pub struct PgSupplierRepository {
    pool: PgPool,
}

impl PgSupplierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SupplierRepository for PgSupplierRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Supplier>, AppError> {
        let mut conn = self.pool.acquire().await?;
        fetch_supplier(&mut conn, id).await
    }

    async fn find_all(&self) -> Result<Vec<Supplier>, AppError> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query_as::<_, SupplierRow>(&format!("{} ORDER BY s.name ASC", SELECT_SUPPLIERS))
            .fetch_all(&mut *conn)
            .await?;
        attach_contacts(&mut conn, rows).await
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM suppliers WHERE name = $1)")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn insert(&self, input: &SupplierInput) -> Result<Supplier, AppError> {
        // Supplier row, contact upserts and links commit together or not at all
        let mut tx = self.pool.begin().await?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO suppliers (
                name, street, house_number, zip, city, country, email, phone, payment_term_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.street)
        .bind(&input.house_number)
        .bind(&input.zip)
        .bind(&input.city)
        .bind(&input.country)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(input.payment_term_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, &input.name))?;

        replace_contacts(&mut tx, id, &input.contact_people).await?;

        let supplier = fetch_supplier(&mut tx, id)
            .await?
            .ok_or(AppError::SupplierNotFound(id))?;

        tx.commit().await?;
        Ok(supplier)
    }

    async fn update(&self, id: Uuid, input: &SupplierInput) -> Result<Option<Supplier>, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated: Option<Uuid> = sqlx::query_scalar(
            r#"
            UPDATE suppliers SET
                name = $2,
                street = $3,
                house_number = $4,
                zip = $5,
                city = $6,
                country = $7,
                email = $8,
                phone = $9,
                payment_term_id = $10,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.street)
        .bind(&input.house_number)
        .bind(&input.zip)
        .bind(&input.city)
        .bind(&input.country)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(input.payment_term_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, &input.name))?;

        // Dropping `tx` rolls back
        if updated.is_none() {
            return Ok(None);
        }

        replace_contacts(&mut tx, id, &input.contact_people).await?;
        let supplier = fetch_supplier(&mut tx, id).await?;

        tx.commit().await?;
        Ok(supplier)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        // Link rows go with ON DELETE CASCADE; shared contact people stay.
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
