//! GeminiProvider -- concrete [`LlmProvider`] implementation for Google Gemini.
//!
//! Sends the whole conversation to `models/{model}:generateContent` on every
//! call. The API key is wrapped in [`secrecy::SecretString`] and only exposed
//! when building the request header.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use reviewbot_core::llm::provider::LlmProvider;
use reviewbot_types::llm::{CompletionRequest, CompletionResponse, LlmError, MessageRole};

use super::types::{GeminiContent, GeminiRequest, GeminiResponse, GenerationConfig, default_safety_settings};

/// Google Gemini LLM provider.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    /// Create a provider for `model` against `base_url`
    /// (e.g. `https://generativelanguage.googleapis.com`).
    pub fn new(api_key: SecretString, model: String, base_url: String) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    fn url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }

    /// Convert a generic [`CompletionRequest`] into a [`GeminiRequest`].
    fn to_gemini_request(&self, request: &CompletionRequest) -> GeminiRequest {
        let contents = request
            .messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    MessageRole::User => "user",
                    MessageRole::Assistant => "model",
                };
                GeminiContent::text(Some(role), m.content.clone())
            })
            .collect();

        GeminiRequest {
            system_instruction: request
                .system
                .as_ref()
                .map(|system| GeminiContent::text(None, system.clone())),
            contents,
            generation_config: GenerationConfig {
                temperature: request.params.temperature,
                top_p: request.params.top_p,
                top_k: (request.params.top_k > 0).then_some(request.params.top_k),
                max_output_tokens: request.params.max_output_tokens,
                response_mime_type: "text/plain",
            },
            safety_settings: default_safety_settings(),
        }
    }
}

// No Debug: the client holds the API key.

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let model = if request.model.is_empty() {
            self.model.as_str()
        } else {
            request.model.as_str()
        };
        let body = self.to_gemini_request(request);

        let response = self
            .client
            .post(self.url(model))
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited,
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let gemini_resp: GeminiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        let (content, finish_reason) = gemini_resp.first_text().ok_or(LlmError::EmptyResponse)?;

        Ok(CompletionResponse {
            content: content.to_string(),
            model: gemini_resp
                .model_version
                .clone()
                .unwrap_or_else(|| model.to_string()),
            finish_reason: finish_reason.map(str::to_string),
        })
    }
}
