use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Customer;

/// Plain record management for customer organizations.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    async fn create(&self, customer: &Customer) -> Result<()>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>>;

    async fn exists(&self, id: Uuid) -> Result<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    async fn list_all(&self) -> Result<Vec<Customer>>;

    async fn update(&self, customer: &Customer) -> Result<()>;

    async fn delete(&self, id: Uuid) -> Result<bool>;
}

#[derive(Clone)]
pub struct PgCustomerDirectory {
    pool: PgPool,
}

impl PgCustomerDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerDirectory for PgCustomerDirectory {
    async fn create(&self, customer: &Customer) -> Result<()> {
        sqlx::query(
            "INSERT INTO customers (id, organization_name, industry, website, primary_contact_name, primary_contact_email, primary_contact_phone, address, notes, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"
        )
        .bind(customer.id)
        .bind(&customer.organization_name)
        .bind(&customer.industry)
        .bind(&customer.website)
        .bind(&customer.primary_contact_name)
        .bind(&customer.primary_contact_email)
        .bind(&customer.primary_contact_phone)
        .bind(&customer.address)
        .bind(&customer.notes)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        let (found,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM customers WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(found)
    }

    async fn list_all(&self) -> Result<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers ORDER BY organization_name ASC, id ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    async fn update(&self, customer: &Customer) -> Result<()> {
        sqlx::query(
            "UPDATE customers SET organization_name = $1, industry = $2, website = $3, primary_contact_name = $4, primary_contact_email = $5, primary_contact_phone = $6, address = $7, notes = $8, updated_at = $9 WHERE id = $10"
        )
        .bind(&customer.organization_name)
        .bind(&customer.industry)
        .bind(&customer.website)
        .bind(&customer.primary_contact_name)
        .bind(&customer.primary_contact_email)
        .bind(&customer.primary_contact_phone)
        .bind(&customer.address)
        .bind(&customer.notes)
        .bind(customer.updated_at)
        .bind(customer.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
