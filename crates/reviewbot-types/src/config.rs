//! Global configuration types.
//!
//! `GlobalConfig` represents `config.toml` in the data directory. Every field
//! has a default so an empty or missing file is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::llm::GenerationParams;

/// Default model used by the chatbot.
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-latest";

/// Default Gemini API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// System instruction the chatbot is seeded with unless `config.toml` overrides it.
pub const DEFAULT_INSTRUCTION: &str = "\
You are Mark, the review assistant of AI Tech Shop (www.aitechshop.com, support@aitechshop.com), \
an online store that sells only electronics. \
Start the conversation yourself and guide the customer through a review of their purchase: \
searching and browsing the website, the checkout, shipping and delivery, the quality of the product \
and the after-sales service. \
Ask these questions during the review: \
Can you tell us a bit about your experience shopping on our website? \
What was your impression of the shipping process? \
On a scale of 1 to 5, how satisfied are you with the product's quality? \
In what ways did our service meet or exceed your expectations, and where could we have done better? \
Answer product questions clearly and concisely and suggest related electronics when relevant. \
Orders can be returned within 30 days; refunds are processed within 7 days of receiving the product. \
Defects reported after 30 days are covered by the manufacturer's warranty. \
If the customer asks about anything unrelated to the store, politely say you do not have that information.";

/// Top-level configuration, loaded from `{data_dir}/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub chatbot: ChatbotConfig,

    #[serde(default)]
    pub relay: RelayConfig,
}

/// Conversational backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatbotConfig {
    pub model: String,
    pub instruction: String,
    pub base_url: String,
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl ChatbotConfig {
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            top_p: self.top_p,
            top_k: self.top_k,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            model: DEFAULT_MODEL.to_string(),
            instruction: DEFAULT_INSTRUCTION.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: params.temperature,
            top_p: params.top_p,
            top_k: params.top_k,
            max_output_tokens: params.max_output_tokens,
        }
    }
}

/// Deadlines for the calls a relay turn makes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Upper bound for a single store call. Exceeding it is a storage error.
    pub storage_timeout_secs: u64,
    /// Upper bound for a single backend call. Exceeding it yields the fallback reply.
    pub backend_timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            storage_timeout_secs: 10,
            backend_timeout_secs: 60,
        }
    }
}
