//! Conversational backend: a chatbot service that starts per-customer
//! sessions, and the sessions that turn one line of text into one reply.

pub mod service;

pub use service::{ChatbotError, ChatbotService, ChatbotSession, FALLBACK_REPLY};
