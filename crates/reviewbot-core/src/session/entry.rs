//! A single live customer session.

use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::chatbot::ChatbotSession;

/// The mutable half of a session: the chatbot conversation and the write half
/// of the connection. Held behind the entry's turn lock.
#[derive(Debug)]
pub struct SessionTurn<K> {
    pub chatbot: ChatbotSession,
    pub sink: K,
}

/// One live customer interaction.
///
/// Identity and thread id are fixed for the entry's lifetime. A relay turn or
/// a review trigger locks the turn state for its whole persist → backend →
/// persist → write sequence, so turns on one entry never interleave.
#[derive(Debug)]
pub struct SessionEntry<K> {
    identity: String,
    thread_id: Uuid,
    turn: Mutex<SessionTurn<K>>,
}

impl<K> SessionEntry<K> {
    pub fn new(identity: impl Into<String>, thread_id: Uuid, chatbot: ChatbotSession, sink: K) -> Self {
        Self {
            identity: identity.into(),
            thread_id,
            turn: Mutex::new(SessionTurn { chatbot, sink }),
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn thread_id(&self) -> Uuid {
        self.thread_id
    }

    /// Acquire exclusive use of the chatbot session and the connection's write half.
    pub async fn lock(&self) -> MutexGuard<'_, SessionTurn<K>> {
        self.turn.lock().await
    }
}
