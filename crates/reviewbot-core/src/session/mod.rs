//! Live session state: one entry per connected customer, held in a registry
//! keyed by the customer's email.

pub mod entry;
pub mod registry;

pub use entry::{SessionEntry, SessionTurn};
pub use registry::SessionRegistry;
