//! Inbound review trigger: inject a purchase event into a live session.

use reviewbot_types::chat::MessageAuthor;
use reviewbot_types::error::TriggerError;
use reviewbot_types::review::ReviewTrigger;
use tracing::{error, info};

use super::service::ReviewRelay;
use super::transport::{Frame, FrameSink};
use crate::repository::chat::ChatRepository;
use crate::repository::customer::CustomerRepository;

impl<U: CustomerRepository, C: ChatRepository, K: FrameSink> ReviewRelay<U, C, K> {
    /// Ask the customer's live chatbot session to open a review.
    ///
    /// The synthetic prompt goes straight to the chatbot and is not stored as
    /// a customer message. The reply is persisted and written as a text frame.
    /// A failed write evicts the session; a failed persist does not.
    pub async fn trigger_review(&self, trigger: &ReviewTrigger) -> Result<(), TriggerError> {
        let identity = trigger.user.email.as_str();
        let entry = self
            .registry()
            .get(identity)
            .ok_or_else(|| TriggerError::SessionNotFound(identity.to_string()))?;

        let mut turn = entry.lock().await;
        let reply = turn.chatbot.send_text_message(&trigger.prompt()).await;

        if let Err(e) = self
            .persist(entry.thread_id(), MessageAuthor::Chatbot, &reply)
            .await
        {
            error!(identity = %identity, error = %e, "Failed to persist review opener");
            return Err(e.into());
        }

        if let Err(e) = turn.sink.send(Frame::Text(reply)).await {
            drop(turn);
            self.teardown(&entry);
            error!(identity = %identity, error = %e, "Failed to deliver review opener");
            return Err(e.into());
        }

        info!(
            identity = %identity,
            thread_id = %entry.thread_id(),
            product = %trigger.product,
            "Review opener delivered"
        );
        Ok(())
    }
}
