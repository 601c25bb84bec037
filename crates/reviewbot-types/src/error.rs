use thiserror::Error;

/// Errors from repository operations (used by trait definitions in reviewbot-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),

    #[error("conflict: {0}")]
    Conflict(String),

    /// The statement ran but affected zero rows.
    #[error("{0} was not persisted: no rows affected")]
    NotPersisted(&'static str),

    #[error("storage call timed out after {0}s")]
    Timeout(u64),
}

/// Errors on the live customer connection.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The peer closed the connection or the stream ended.
    #[error("connection closed")]
    Closed,

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("failed to send frame: {0}")]
    Send(String),
}

/// Errors that end a relay session (establish or steady state).
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("customer '{0}' not found")]
    CustomerNotFound(String),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Errors from injecting a review trigger into a live session.
#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("no live session for '{0}'")]
    SessionNotFound(String),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Errors related to customer operations.
#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("missing required fields")]
    MissingRequiredFields,

    #[error("customer with email '{0}' already exists")]
    EmailConflict(String),

    #[error("storage error: {0}")]
    Storage(String),
}
