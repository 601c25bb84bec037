//! Chatbot service and per-customer chatbot sessions.
//!
//! A `ChatbotSession` accumulates the turn history of one conversation and
//! replays it to the provider on every call. `send_text_message` never fails:
//! provider errors and timeouts are logged and answered with [`FALLBACK_REPLY`].

use std::sync::Arc;
use std::time::Duration;

use reviewbot_types::config::ChatbotConfig;
use reviewbot_types::llm::{CompletionRequest, GenerationParams, LlmError, Message};
use tracing::{debug, error};

use crate::llm::box_provider::BoxLlmProvider;

/// Reply delivered to the customer whenever the provider cannot answer.
pub const FALLBACK_REPLY: &str =
    "I'm sorry but can't help you right now. Can you please try later.";

/// Errors constructing a chatbot service.
#[derive(Debug, thiserror::Error)]
pub enum ChatbotError {
    #[error("missing chatbot configuration: {0}")]
    MissingConfig(&'static str),
}

/// Starts chatbot sessions that share one provider and one system instruction.
#[derive(Debug, Clone)]
pub struct ChatbotService {
    provider: Arc<BoxLlmProvider>,
    model: String,
    instruction: String,
    params: GenerationParams,
    timeout: Duration,
}

impl ChatbotService {
    /// Create a chatbot service.
    ///
    /// `timeout` bounds every provider call made by the sessions it starts.
    pub fn new(
        provider: BoxLlmProvider,
        config: &ChatbotConfig,
        timeout: Duration,
    ) -> Result<Self, ChatbotError> {
        if config.instruction.trim().is_empty() {
            return Err(ChatbotError::MissingConfig("instruction"));
        }
        if config.model.trim().is_empty() {
            return Err(ChatbotError::MissingConfig("model"));
        }

        Ok(Self {
            provider: Arc::new(provider),
            model: config.model.clone(),
            instruction: config.instruction.clone(),
            params: config.generation_params(),
            timeout,
        })
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Start a fresh session seeded with the system instruction and no history.
    pub fn start_chat(&self) -> ChatbotSession {
        ChatbotSession {
            provider: Arc::clone(&self.provider),
            model: self.model.clone(),
            system: self.instruction.clone(),
            params: self.params.clone(),
            timeout: self.timeout,
            history: Vec::new(),
        }
    }
}

/// Stateful handle into the backend for one customer conversation.
#[derive(Debug)]
pub struct ChatbotSession {
    provider: Arc<BoxLlmProvider>,
    model: String,
    system: String,
    params: GenerationParams,
    timeout: Duration,
    history: Vec<Message>,
}

impl ChatbotSession {
    /// Send one line of text and return the reply.
    ///
    /// Only successful turns are appended to the history, so a failed call
    /// leaves the session exactly as it was.
    pub async fn send_text_message(&mut self, text: &str) -> String {
        match self.complete(text).await {
            Ok(reply) => {
                self.history.push(Message::user(text));
                self.history.push(Message::assistant(reply.clone()));
                reply
            }
            Err(e) => {
                error!(
                    provider = %self.provider.name(),
                    error = %e,
                    "Chatbot call failed, replying with fallback"
                );
                FALLBACK_REPLY.to_string()
            }
        }
    }

    /// Number of messages (user and assistant) remembered by this session.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    async fn complete(&self, text: &str) -> Result<String, LlmError> {
        let mut messages = self.history.clone();
        messages.push(Message::user(text));

        let request = CompletionRequest {
            model: self.model.clone(),
            messages,
            system: Some(self.system.clone()),
            params: self.params.clone(),
        };

        let response = tokio::time::timeout(self.timeout, self.provider.complete(&request))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout.as_secs()))??;

        debug!(
            model = %response.model,
            finish_reason = ?response.finish_reason,
            "Chatbot reply received"
        );
        Ok(response.content)
    }
}
