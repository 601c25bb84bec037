//! Repository trait definitions (ports).
//!
//! These traits define the conversation store that the infrastructure layer
//! (reviewbot-infra) implements. The core crate never depends on any
//! specific storage technology.

pub mod chat;
pub mod customer;
