//! Customer records and the create-customer request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CustomerError;

/// A registered e-commerce customer. The email is the live-session identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/user`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

impl CreateCustomerRequest {
    /// Trim every field and reject the request if any is left empty.
    pub fn validate(&mut self) -> Result<(), CustomerError> {
        for field in [&mut self.first_name, &mut self.last_name, &mut self.email] {
            *field = field.trim().to_string();
        }
        if self.first_name.is_empty() || self.last_name.is_empty() || self.email.is_empty() {
            return Err(CustomerError::MissingRequiredFields);
        }
        Ok(())
    }
}
