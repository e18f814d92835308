use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::error::RepositoryResult;
use crate::models::Customer;

/// Data access for customers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// All customers in insertion order
    async fn list_all(&self) -> RepositoryResult<Vec<Customer>>;

    async fn get(&self, customer_id: i64) -> RepositoryResult<Option<Customer>>;

    /// Insert a customer and return it with its generated id
    async fn create(&self, name: &str) -> RepositoryResult<Customer>;
}

pub struct SqliteCustomerRepository {
    pool: SqlitePool,
}

impl SqliteCustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for SqliteCustomerRepository {
    async fn list_all(&self) -> RepositoryResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT customer_id, name FROM customers ORDER BY customer_id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    async fn get(&self, customer_id: i64) -> RepositoryResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT customer_id, name FROM customers WHERE customer_id = ?",
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn create(&self, name: &str) -> RepositoryResult<Customer> {
        let customer_id = sqlx::query("INSERT INTO customers (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        tracing::info!(customer_id, "Created customer");
        Ok(Customer {
            customer_id,
            name: name.to_string(),
        })
    }
}
