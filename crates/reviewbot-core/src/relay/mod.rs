//! The relay: per-connection loop between a customer and their chatbot
//! session, plus the inbound review trigger.

pub mod service;
pub mod transport;
pub mod trigger;

pub use service::ReviewRelay;
pub use transport::{Frame, FrameSink, FrameSource};
