//! Customer registration service.

use chrono::Utc;
use reviewbot_types::customer::{CreateCustomerRequest, Customer};
use reviewbot_types::error::{CustomerError, RepositoryError};
use tracing::info;
use uuid::Uuid;

use crate::repository::customer::CustomerRepository;

/// Registers customers so they can open a live review session.
pub struct CustomerService<U: CustomerRepository> {
    repo: U,
}

impl<U: CustomerRepository> CustomerService<U> {
    pub fn new(repo: U) -> Self {
        Self { repo }
    }

    /// Validate and persist a new customer.
    ///
    /// Fields are trimmed; an empty field or an already registered email is rejected.
    pub async fn create_customer(
        &self,
        mut request: CreateCustomerRequest,
    ) -> Result<Customer, CustomerError> {
        request.validate()?;

        let customer = Customer {
            id: Uuid::now_v7(),
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            created_at: Utc::now(),
        };

        let created = self
            .repo
            .create_customer(&customer)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => CustomerError::EmailConflict(customer.email.clone()),
                other => CustomerError::Storage(other.to_string()),
            })?;

        info!(customer_id = %created.id, email = %created.email, "Customer registered");
        Ok(created)
    }
}
