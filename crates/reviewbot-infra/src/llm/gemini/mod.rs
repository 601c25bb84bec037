//! Google Gemini LLM provider implementation.
//!
//! This module provides the [`GeminiProvider`] which implements the
//! [`LlmProvider`](reviewbot_core::llm::provider::LlmProvider) trait for the
//! Gemini `generateContent` API.

pub mod client;
pub mod types;

pub use client::GeminiProvider;
