//! LLM provider abstractions.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: object-safe wrapper so a chatbot session can hold any provider

pub mod box_provider;
pub mod provider;
