use std::sync::Arc;

use crate::error::{ServiceError, ServiceResult};
use crate::models::Customer;
use crate::repositories::CustomerRepository;

/// Service layer for customer lookups and creation
pub struct CustomerService<R: CustomerRepository> {
    repository: Arc<R>,
}

impl<R: CustomerRepository> Clone for CustomerService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list_all(&self) -> ServiceResult<Vec<Customer>> {
        self.repository.list_all().await.map_err(|e| {
            ServiceError::unexpected("Failed to retrieve customers. Please try again later.", e)
        })
    }

    pub async fn get(&self, customer_id: i64) -> ServiceResult<Customer> {
        self.repository
            .get(customer_id)
            .await
            .map_err(|e| {
                ServiceError::unexpected(
                    format!("Failed to retrieve customer {}. Please try again later.", customer_id),
                    e,
                )
            })?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Customer with ID {} not found.", customer_id))
            })
    }

    /// Create a customer; blank names are rejected before touching the store
    pub async fn create(&self, name: &str) -> ServiceResult<Customer> {
        let name = Customer::validate_name(name)?;

        self.repository.create(name).await.map_err(|e| {
            ServiceError::unexpected("Failed to create customer. Please try again later.", e)
        })
    }
}
