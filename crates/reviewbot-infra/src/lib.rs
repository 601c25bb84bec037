//! Infrastructure layer for the review chatbot.
//!
//! Implements the ports defined in `reviewbot-core`: SQLite repositories for
//! customers and chat threads, the Gemini LLM provider, and the config loader.

pub mod config;
pub mod llm;
pub mod sqlite;
