//! Shared domain types for the review chatbot.
//!
//! Customers, chat threads and messages, review triggers, LLM request shapes,
//! configuration, and the error types shared by every other crate.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod customer;
pub mod error;
pub mod llm;
pub mod review;
