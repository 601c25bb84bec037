//! HTTP and WebSocket API layer.
//!
//! Axum routes under `/api/`, envelope response format, and CORS support.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
