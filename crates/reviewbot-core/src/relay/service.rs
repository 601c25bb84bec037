//! Review relay: establishes live sessions and runs the per-connection loop.
//!
//! A connection goes through three phases:
//!
//! 1. **Establish** -- resolve the customer, open a new thread, start a chatbot
//!    session and register the entry. Failures here never leave an entry behind.
//! 2. **Steady state** -- read a frame, persist it as `user`, ask the chatbot,
//!    persist the reply as `chatbot`, write the reply with the same framing.
//!    Turns are strictly sequential per connection.
//! 3. **Teardown** -- any read, persist, or write failure evicts the entry and
//!    ends the loop. Chatbot failures never get here; they become a fallback reply.

use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reviewbot_types::chat::{ChatMessage, ChatThread, MessageAuthor};
use reviewbot_types::config::RelayConfig;
use reviewbot_types::error::{RelayError, RepositoryError};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::transport::{Frame, FrameSink, FrameSource};
use crate::chatbot::ChatbotService;
use crate::repository::chat::ChatRepository;
use crate::repository::customer::CustomerRepository;
use crate::session::{SessionEntry, SessionRegistry};

/// Binds customer connections to chatbot sessions and relays messages between them.
///
/// Generic over the repositories and the connection's write half so the core
/// never depends on SQLite or axum.
pub struct ReviewRelay<U: CustomerRepository, C: ChatRepository, K: FrameSink> {
    customers: U,
    chats: C,
    chatbot: ChatbotService,
    registry: SessionRegistry<K>,
    storage_timeout: Duration,
}

impl<U: CustomerRepository, C: ChatRepository, K: FrameSink> ReviewRelay<U, C, K> {
    pub fn new(customers: U, chats: C, chatbot: ChatbotService, config: &RelayConfig) -> Self {
        Self {
            customers,
            chats,
            chatbot,
            registry: SessionRegistry::new(),
            storage_timeout: Duration::from_secs(config.storage_timeout_secs),
        }
    }

    /// The live session registry.
    pub fn registry(&self) -> &SessionRegistry<K> {
        &self.registry
    }

    /// Resolve `identity`, open a thread and register a fresh session entry.
    ///
    /// Any existing entry for the same identity is replaced.
    pub async fn establish(
        &self,
        identity: &str,
        sink: K,
    ) -> Result<Arc<SessionEntry<K>>, RelayError> {
        let customer = self
            .bounded(self.customers.find_customer_by_email(identity))
            .await?
            .ok_or_else(|| RelayError::CustomerNotFound(identity.to_string()))?;

        let thread = self
            .bounded(self.chats.create_thread(&ChatThread::new(customer.id)))
            .await?;

        let entry = Arc::new(SessionEntry::new(
            identity,
            thread.id,
            self.chatbot.start_chat(),
            sink,
        ));
        self.registry.put(identity, Arc::clone(&entry));

        info!(
            identity = %identity,
            thread_id = %thread.id,
            live_sessions = self.registry.len(),
            "Review session established"
        );
        Ok(entry)
    }

    /// Relay frames from `source` until the connection or the store fails.
    ///
    /// Never returns `Ok`: the loop only ends on an error, with the entry
    /// already evicted.
    pub async fn run<S: FrameSource>(
        &self,
        entry: Arc<SessionEntry<K>>,
        mut source: S,
    ) -> Result<Infallible, RelayError> {
        loop {
            let frame = match source.next_frame().await {
                Ok(frame) => frame,
                Err(e) => {
                    self.teardown(&entry);
                    warn!(identity = %entry.identity(), error = %e, "Failed to read message");
                    return Err(e.into());
                }
            };

            if let Err(e) = self.relay_turn(&entry, frame).await {
                self.teardown(&entry);
                error!(identity = %entry.identity(), error = %e, "Relay turn failed");
                return Err(e);
            }
        }
    }

    /// One customer turn: persist, ask the chatbot, persist, write back.
    async fn relay_turn(&self, entry: &SessionEntry<K>, frame: Frame) -> Result<(), RelayError> {
        let text = frame.to_text();
        let mut turn = entry.lock().await;

        self.persist(entry.thread_id(), MessageAuthor::User, &text)
            .await?;

        let reply = turn.chatbot.send_text_message(&text).await;

        self.persist(entry.thread_id(), MessageAuthor::Chatbot, &reply)
            .await?;

        turn.sink.send(frame.reply(reply)).await?;

        debug!(identity = %entry.identity(), "Relay turn completed");
        Ok(())
    }

    /// Append a message to a thread under the storage deadline.
    pub(crate) async fn persist(
        &self,
        thread_id: Uuid,
        author: MessageAuthor,
        content: &str,
    ) -> Result<ChatMessage, RepositoryError> {
        let message = ChatMessage::new(thread_id, author, content);
        self.bounded(self.chats.append_message(&message)).await
    }

    /// Run a store call under the storage deadline.
    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, RepositoryError>>,
    ) -> Result<T, RepositoryError> {
        tokio::time::timeout(self.storage_timeout, call)
            .await
            .map_err(|_| RepositoryError::Timeout(self.storage_timeout.as_secs()))?
    }

    /// Drop the entry from the registry if it is still the registered one.
    pub(crate) fn teardown(&self, entry: &Arc<SessionEntry<K>>) {
        if self.registry.evict(entry.identity(), entry) {
            info!(
                identity = %entry.identity(),
                thread_id = %entry.thread_id(),
                live_sessions = self.registry.len(),
                "Review session evicted"
            );
        }
    }
}
