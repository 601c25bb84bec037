//! Application state wiring all services together.
//!
//! Core services are generic over repository and transport traits; AppState
//! pins them to SQLite and the WebSocket adapters.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use reviewbot_core::chatbot::ChatbotService;
use reviewbot_core::relay::ReviewRelay;
use reviewbot_core::service::customer::CustomerService;
use reviewbot_infra::config::{load_global_config, resolve_data_dir};
use reviewbot_infra::llm::create_provider;
use reviewbot_infra::sqlite::chat::SqliteChatRepository;
use reviewbot_infra::sqlite::customer::SqliteCustomerRepository;
use reviewbot_infra::sqlite::pool::DatabasePool;
use reviewbot_types::config::RelayConfig;

use crate::http::handlers::ws::WsFrameSink;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteRelay = ReviewRelay<SqliteCustomerRepository, SqliteChatRepository, WsFrameSink>;

pub type ConcreteCustomerService = CustomerService<SqliteCustomerRepository>;

/// Shared state handed to every HTTP and WebSocket handler.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ConcreteRelay>,
    pub customer_service: Arc<ConcreteCustomerService>,
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: load config, open the store, build the chatbot.
    pub async fn init(
        data_dir: Option<PathBuf>,
        static_dir: PathBuf,
        api_key: SecretString,
    ) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir(data_dir);
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;
        let db_pool = DatabasePool::open(&data_dir).await?;

        let provider = create_provider(&config.chatbot, Some(api_key))?;
        let chatbot = ChatbotService::new(
            provider,
            &config.chatbot,
            Duration::from_secs(config.relay.backend_timeout_secs),
        )?;

        tracing::info!(
            provider = %chatbot.provider_name(),
            model = %config.chatbot.model,
            storage_timeout_secs = config.relay.storage_timeout_secs,
            backend_timeout_secs = config.relay.backend_timeout_secs,
            "Chatbot ready"
        );

        Ok(Self::new(db_pool, chatbot, &config.relay, data_dir, static_dir))
    }

    /// Wire services over an open pool and a ready chatbot.
    pub fn new(
        db_pool: DatabasePool,
        chatbot: ChatbotService,
        relay_config: &RelayConfig,
        data_dir: PathBuf,
        static_dir: PathBuf,
    ) -> Self {
        let relay = ReviewRelay::new(
            SqliteCustomerRepository::new(db_pool.clone()),
            SqliteChatRepository::new(db_pool.clone()),
            chatbot,
            relay_config,
        );
        let customer_service = CustomerService::new(SqliteCustomerRepository::new(db_pool.clone()));

        Self {
            relay: Arc::new(relay),
            customer_service: Arc::new(customer_service),
            data_dir,
            static_dir,
        }
    }
}
