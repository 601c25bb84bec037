//! SQLite customer repository implementation.

use reviewbot_core::repository::customer::CustomerRepository;
use reviewbot_types::customer::Customer;
use reviewbot_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, parse_uuid};

/// SQLite-backed implementation of `CustomerRepository`.
#[derive(Clone)]
pub struct SqliteCustomerRepository {
    pool: DatabasePool,
}

impl SqliteCustomerRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct CustomerRow {
    id: String,
    first_name: String,
    last_name: String,
    email: String,
    created_at: String,
}

impl CustomerRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_customer(self) -> Result<Customer, RepositoryError> {
        Ok(Customer {
            id: parse_uuid(&self.id, "customer id")?,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

impl CustomerRepository for SqliteCustomerRepository {
    async fn create_customer(&self, customer: &Customer) -> Result<Customer, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO customers (id, first_name, last_name, email, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(customer.id.to_string())
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(format_datetime(&customer.created_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Err(RepositoryError::NotPersisted("customer")),
            Ok(_) => Ok(customer.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => Err(
                RepositoryError::Conflict(format!("email '{}' already exists", customer.email)),
            ),
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn find_customer_by_email(&self, email: &str) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM customers WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let customer_row =
                    CustomerRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(customer_row.into_customer()?))
            }
            None => Ok(None),
        }
    }
}
