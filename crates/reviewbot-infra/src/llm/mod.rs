//! LLM provider implementations.
//!
//! Contains the concrete [`LlmProvider`](reviewbot_core::llm::provider::LlmProvider)
//! used by the chatbot, and a factory that builds it from configuration.

pub mod gemini;

use secrecy::SecretString;

use reviewbot_core::llm::box_provider::BoxLlmProvider;
use reviewbot_types::config::ChatbotConfig;
use reviewbot_types::llm::LlmError;

use self::gemini::GeminiProvider;

/// Create the chatbot's [`BoxLlmProvider`] from configuration.
///
/// # Errors
///
/// Returns `LlmError::AuthenticationFailed` when no API key is available.
pub fn create_provider(
    config: &ChatbotConfig,
    api_key: Option<SecretString>,
) -> Result<BoxLlmProvider, LlmError> {
    let key = api_key.ok_or(LlmError::AuthenticationFailed)?;
    let provider = GeminiProvider::new(key, config.model.clone(), config.base_url.clone())?;
    Ok(BoxLlmProvider::new(provider))
}
