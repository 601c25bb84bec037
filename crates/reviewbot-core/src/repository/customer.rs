//! Customer repository trait definition.

use reviewbot_types::customer::Customer;
use reviewbot_types::error::RepositoryError;

/// Repository trait for customer persistence.
///
/// Implementations live in reviewbot-infra (e.g., `SqliteCustomerRepository`).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait CustomerRepository: Send + Sync {
    /// Persist a new customer.
    ///
    /// Fails with `RepositoryError::Conflict` when the email is already taken
    /// and `RepositoryError::NotPersisted` when the insert affected no rows.
    fn create_customer(
        &self,
        customer: &Customer,
    ) -> impl std::future::Future<Output = Result<Customer, RepositoryError>> + Send;

    /// Look up a customer by email, the live-session identity.
    fn find_customer_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<Customer>, RepositoryError>> + Send;
}
