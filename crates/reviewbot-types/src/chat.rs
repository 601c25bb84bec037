//! Chat thread and message types.
//!
//! A thread is the durable, append-only record of one customer's review
//! conversation. Every relayed message lands in exactly one thread.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Who wrote a persisted message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (author IN ('user', 'chatbot'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageAuthor {
    User,
    Chatbot,
}

impl fmt::Display for MessageAuthor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageAuthor::User => write!(f, "user"),
            MessageAuthor::Chatbot => write!(f, "chatbot"),
        }
    }
}

impl FromStr for MessageAuthor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageAuthor::User),
            "chatbot" => Ok(MessageAuthor::Chatbot),
            other => Err(format!("invalid message author: '{other}'")),
        }
    }
}

/// A durable conversation thread owned by one customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatThread {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl ChatThread {
    /// New thread for a customer with a fresh time-sortable id.
    pub fn new(customer_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            customer_id,
            created_at: Utc::now(),
        }
    }
}

/// A single persisted message within a thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub thread_id: Uuid,
    pub author: MessageAuthor,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(thread_id: Uuid, author: MessageAuthor, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            thread_id,
            author,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}
