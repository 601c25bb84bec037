//! Hand-written doubles shared by the core unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reviewbot_types::chat::{ChatMessage, ChatThread, MessageAuthor};
use reviewbot_types::config::{ChatbotConfig, RelayConfig};
use reviewbot_types::customer::Customer;
use reviewbot_types::error::{RelayError, RepositoryError, TransportError};
use reviewbot_types::llm::{CompletionRequest, CompletionResponse, LlmError};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::chatbot::ChatbotService;
use crate::llm::box_provider::BoxLlmProvider;
use crate::llm::provider::LlmProvider;
use crate::relay::{Frame, FrameSink, FrameSource, ReviewRelay};
use crate::repository::chat::ChatRepository;
use crate::repository::customer::CustomerRepository;
use crate::session::SessionEntry;

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

enum Script {
    Replies(Mutex<VecDeque<String>>),
    Echo,
    Failing,
    Hanging,
}

/// LLM provider that answers from a script and records every request.
pub struct ScriptedProvider {
    script: Script,
    delay: Option<Duration>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedProvider {
    fn with_script(script: Script) -> Self {
        Self {
            script,
            delay: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Take `delay` before every answer.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answer with `replies` in order, then fail with `EmptyResponse`.
    pub fn replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let queue = replies.into_iter().map(Into::into).collect();
        Self::with_script(Script::Replies(Mutex::new(queue)))
    }

    /// Answer `echo: {last message}`.
    pub fn echo() -> Self {
        Self::with_script(Script::Echo)
    }

    pub fn failing() -> Self {
        Self::with_script(Script::Failing)
    }

    /// Never answer.
    pub fn hanging() -> Self {
        Self::with_script(Script::Hanging)
    }

    /// Requests seen so far, shared with the provider.
    pub fn requests(&self) -> Arc<Mutex<Vec<CompletionRequest>>> {
        Arc::clone(&self.requests)
    }
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let content = match &self.script {
            Script::Replies(queue) => queue
                .lock()
                .unwrap()
                .pop_front()
                .ok_or(LlmError::EmptyResponse)?,
            Script::Echo => {
                let last = request
                    .messages
                    .last()
                    .map(|m| m.content.clone())
                    .unwrap_or_default();
                format!("echo: {last}")
            }
            Script::Failing => {
                return Err(LlmError::Provider {
                    message: "backend unavailable".to_string(),
                });
            }
            Script::Hanging => std::future::pending().await,
        };

        Ok(CompletionResponse {
            content,
            model: request.model.clone(),
            finish_reason: Some("STOP".to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// Repositories
// ---------------------------------------------------------------------------

/// In-memory customer store.
#[derive(Clone, Default)]
pub struct MockCustomerRepository {
    customers: Arc<Mutex<Vec<Customer>>>,
}

impl MockCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already knows a customer with `email`.
    pub fn with_customer(email: &str) -> Self {
        let repo = Self::new();
        repo.customers.lock().unwrap().push(Customer {
            id: Uuid::now_v7(),
            first_name: "Test".to_string(),
            last_name: "Customer".to_string(),
            email: email.to_string(),
            created_at: chrono::Utc::now(),
        });
        repo
    }
}

impl CustomerRepository for MockCustomerRepository {
    async fn create_customer(&self, customer: &Customer) -> Result<Customer, RepositoryError> {
        let mut customers = self.customers.lock().unwrap();
        if customers.iter().any(|c| c.email == customer.email) {
            return Err(RepositoryError::Conflict(customer.email.clone()));
        }
        customers.push(customer.clone());
        Ok(customer.clone())
    }

    async fn find_customer_by_email(&self, email: &str) -> Result<Option<Customer>, RepositoryError> {
        let customers = self.customers.lock().unwrap();
        Ok(customers.iter().find(|c| c.email == email).cloned())
    }
}

#[derive(Default)]
struct ChatState {
    threads: Vec<ChatThread>,
    messages: Vec<ChatMessage>,
    fail_author: Option<MessageAuthor>,
    fail_thread: bool,
    hang: bool,
}

/// In-memory chat store with switchable failures.
#[derive(Clone, Default)]
pub struct MockChatRepository {
    state: Arc<Mutex<ChatState>>,
}

impl MockChatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threads(&self) -> Vec<ChatThread> {
        self.state.lock().unwrap().threads.clone()
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.state.lock().unwrap().messages.clone()
    }

    /// Appends by `author` affect no rows from now on.
    pub fn fail_append_for(&self, author: MessageAuthor) {
        self.state.lock().unwrap().fail_author = Some(author);
    }

    pub fn fail_create_thread(&self) {
        self.state.lock().unwrap().fail_thread = true;
    }

    /// Appends never complete from now on.
    pub fn hang_appends(&self) {
        self.state.lock().unwrap().hang = true;
    }
}

impl ChatRepository for MockChatRepository {
    async fn create_thread(&self, thread: &ChatThread) -> Result<ChatThread, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_thread {
            return Err(RepositoryError::NotPersisted("chat thread"));
        }
        state.threads.push(thread.clone());
        Ok(thread.clone())
    }

    async fn get_thread(&self, thread_id: &Uuid) -> Result<Option<ChatThread>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.threads.iter().find(|t| t.id == *thread_id).cloned())
    }

    async fn append_message(&self, message: &ChatMessage) -> Result<ChatMessage, RepositoryError> {
        let (hang, fail) = {
            let state = self.state.lock().unwrap();
            (state.hang, state.fail_author == Some(message.author))
        };
        if hang {
            std::future::pending::<()>().await;
        }
        if fail {
            return Err(RepositoryError::NotPersisted("chat message"));
        }
        self.state.lock().unwrap().messages.push(message.clone());
        Ok(message.clone())
    }

    async fn list_messages(&self, thread_id: &Uuid) -> Result<Vec<ChatMessage>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .messages
            .iter()
            .filter(|m| m.thread_id == *thread_id)
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct SinkState {
    sent: Vec<Frame>,
    fail: bool,
}

/// Write half that records frames. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct MockSink {
    state: Arc<Mutex<SinkState>>,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Frame> {
        self.state.lock().unwrap().sent.clone()
    }

    /// Every send fails from now on, as if the peer went away.
    pub fn fail_sends(&self) {
        self.state.lock().unwrap().fail = true;
    }

    /// Resolve once at least `count` frames were written.
    pub async fn wait_for(&self, count: usize) {
        while self.state.lock().unwrap().sent.len() < count {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

impl FrameSink for MockSink {
    async fn send(&mut self, frame: Frame) -> Result<(), TransportError> {
        let mut state = self.state.lock().unwrap();
        if state.fail {
            return Err(TransportError::Send("peer went away".to_string()));
        }
        state.sent.push(frame);
        Ok(())
    }
}

/// Read half fed from a channel. A dropped sender reads as a closed connection.
pub struct MockSource {
    rx: mpsc::UnboundedReceiver<Frame>,
}

impl MockSource {
    pub fn channel() -> (mpsc::UnboundedSender<Frame>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }

    /// A source that yields `frames` and then closes.
    pub fn from_frames(frames: impl IntoIterator<Item = Frame>) -> Self {
        let (tx, source) = Self::channel();
        for frame in frames {
            let _ = tx.send(frame);
        }
        source
    }
}

impl FrameSource for MockSource {
    async fn next_frame(&mut self) -> Result<Frame, TransportError> {
        self.rx.recv().await.ok_or(TransportError::Closed)
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn chatbot(provider: ScriptedProvider) -> ChatbotService {
    ChatbotService::new(
        BoxLlmProvider::new(provider),
        &ChatbotConfig::default(),
        Duration::from_secs(5),
    )
    .unwrap()
}

pub fn relay_with(
    customers: MockCustomerRepository,
    chats: MockChatRepository,
    provider: ScriptedProvider,
) -> ReviewRelay<MockCustomerRepository, MockChatRepository, MockSink> {
    ReviewRelay::new(customers, chats, chatbot(provider), &RelayConfig::default())
}

/// Establish a session for `identity` and relay until it ends.
pub async fn serve(
    relay: &ReviewRelay<MockCustomerRepository, MockChatRepository, MockSink>,
    identity: &str,
    sink: MockSink,
    source: MockSource,
) -> RelayError {
    match relay.establish(identity, sink).await {
        Ok(entry) => {
            let Err(cause) = relay.run(entry, source).await;
            cause
        }
        Err(e) => e,
    }
}

/// A detached entry for registry tests.
pub fn test_entry(identity: &str) -> Arc<SessionEntry<MockSink>> {
    Arc::new(SessionEntry::new(
        identity,
        Uuid::now_v7(),
        chatbot(ScriptedProvider::echo()).start_chat(),
        MockSink::new(),
    ))
}
