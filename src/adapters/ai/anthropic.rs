//! Anthropic provider - ChatProvider implementation for the Messages API.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::chat::TurnRole;
use crate::ports::{ChatProvider, ChatRequest, ProviderError, ProviderInfo};

use super::openai::{status_error, transport_error};

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Configuration for the Anthropic provider.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g. "claude-sonnet-4-20250514").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl AnthropicConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Anthropic API provider implementation.
pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicProvider {
    /// Creates a new Anthropic provider with the given configuration.
    pub fn new(config: AnthropicConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url)
    }

    /// Converts our request to Anthropic's format: the system prompt is a
    /// top-level parameter, not a message.
    fn to_wire_request(&self, request: &ChatRequest) -> WireRequest {
        let messages = request
            .history
            .iter()
            .map(|turn| WireMessage {
                role: match turn.role {
                    TurnRole::User => "user",
                    TurnRole::Assistant => "assistant",
                }
                .to_string(),
                content: turn.content.clone(),
            })
            .collect();

        WireRequest {
            model: self.config.model.clone(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            system: request.system_prompt.clone(),
            messages,
        }
    }
}

#[async_trait]
impl ChatProvider for AnthropicProvider {
    async fn chat(&self, request: ChatRequest) -> Result<String, ProviderError> {
        let wire_request = self.to_wire_request(&request);

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&wire_request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), body));
        }

        let envelope: WireResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::malformed(e.to_string()))?;

        reply_text(envelope)
    }

    fn info(&self) -> ProviderInfo {
        ProviderInfo::new("anthropic", &self.config.model)
    }
}

fn reply_text(envelope: WireResponse) -> Result<String, ProviderError> {
    envelope
        .content
        .into_iter()
        .next()
        .map(|block| block.text)
        .ok_or_else(|| ProviderError::malformed("no content blocks in response"))
}

// ----- Anthropic API types -----

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    system: String,
    messages: Vec<WireMessage>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chat::ConversationTurn;

    #[test]
    fn system_prompt_is_top_level() {
        let provider = AnthropicProvider::new(AnthropicConfig::new("k"));
        let request = ChatRequest::new("be gentle")
            .with_history(vec![ConversationTurn::user("hello")]);

        let wire = provider.to_wire_request(&request);
        assert_eq!(wire.system, "be gentle");
        assert_eq!(wire.messages.len(), 1);
        assert_eq!(wire.messages[0].role, "user");
    }

    #[test]
    fn history_order_is_preserved() {
        let provider = AnthropicProvider::new(AnthropicConfig::new("k"));
        let request = ChatRequest::new("x").with_history(vec![
            ConversationTurn::user("one"),
            ConversationTurn::assistant("two"),
            ConversationTurn::user("three"),
        ]);

        let wire = provider.to_wire_request(&request);
        let contents: Vec<_> = wire.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
    }

    #[test]
    fn reply_text_reads_first_block() {
        let envelope: WireResponse =
            serde_json::from_str(r#"{"content":[{"type":"text","text":"hi friend"}]}"#).unwrap();
        assert_eq!(reply_text(envelope).unwrap(), "hi friend");
    }

    #[test]
    fn empty_content_is_malformed() {
        let envelope: WireResponse = serde_json::from_str(r#"{"content":[]}"#).unwrap();
        assert!(reply_text(envelope).is_err());
    }

    #[test]
    fn default_model_is_sonnet() {
        let config = AnthropicConfig::new("k");
        assert_eq!(config.model, "claude-sonnet-4-20250514");
    }
}
