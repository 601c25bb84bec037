//! Purchase-event payload that starts a review in a live session.

use serde::Deserialize;

use crate::error::CustomerError;

/// The customer part of a review trigger.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewCustomer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Body of `POST /api/review`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewTrigger {
    #[serde(default)]
    pub user: ReviewCustomer,
    #[serde(default)]
    pub product: String,
}

impl ReviewTrigger {
    pub fn new(name: impl Into<String>, email: impl Into<String>, product: impl Into<String>) -> Self {
        Self {
            user: ReviewCustomer {
                name: name.into(),
                email: email.into(),
            },
            product: product.into(),
        }
    }

    /// Trim every field and reject the trigger if any is left empty.
    pub fn validate(&mut self) -> Result<(), CustomerError> {
        for field in [&mut self.user.name, &mut self.user.email, &mut self.product] {
            *field = field.trim().to_string();
        }
        if self.user.name.is_empty() || self.user.email.is_empty() || self.product.is_empty() {
            return Err(CustomerError::MissingRequiredFields);
        }
        Ok(())
    }

    /// The instruction handed to the chatbot to open the review.
    pub fn prompt(&self) -> String {
        format!(
            "Start a new review with {}. They just bought a new {}",
            self.user.name, self.product
        )
    }
}
