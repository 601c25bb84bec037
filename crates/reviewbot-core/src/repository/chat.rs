//! ChatRepository trait definition.
//!
//! Threads and their append-only messages. Follows the same RPITIT pattern
//! as `CustomerRepository`.

use reviewbot_types::chat::{ChatMessage, ChatThread};
use reviewbot_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for chat thread and message persistence.
pub trait ChatRepository: Send + Sync {
    /// Create a new thread. Zero affected rows is `RepositoryError::NotPersisted`.
    fn create_thread(
        &self,
        thread: &ChatThread,
    ) -> impl std::future::Future<Output = Result<ChatThread, RepositoryError>> + Send;

    /// Get a thread by id.
    fn get_thread(
        &self,
        thread_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatThread>, RepositoryError>> + Send;

    /// Append a message to its thread. Zero affected rows is `RepositoryError::NotPersisted`.
    fn append_message(
        &self,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<ChatMessage, RepositoryError>> + Send;

    /// Messages of a thread in the order they were appended.
    fn list_messages(
        &self,
        thread_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;
}
