//! Custom-endpoint provider for non-standard backends.
//!
//! Speaks a minimal JSON contract: POST `{system, messages, temperature,
//! max_tokens}` with a bearer token, expect `{"response": "..."}` back.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::chat::ConversationTurn;
use crate::ports::{ChatProvider, ChatRequest, ProviderError, ProviderInfo};

use super::openai::{status_error, transport_error};

/// Configuration for a custom endpoint.
#[derive(Debug, Clone)]
pub struct CustomConfig {
    /// Full endpoint URL.
    pub endpoint: String,
    /// Bearer token, when the endpoint requires one.
    api_key: Option<Secret<String>>,
    /// Request timeout.
    pub timeout: Duration,
}

impl CustomConfig {
    /// Creates a configuration for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout: Duration::from_secs(120),
        }
    }

    /// Sets the bearer token.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|key| key.expose_secret().as_str())
    }
}

/// Custom endpoint provider implementation.
pub struct CustomProvider {
    config: CustomConfig,
    client: Client,
}

impl CustomProvider {
    /// Creates a new custom provider with the given configuration.
    pub fn new(config: CustomConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl ChatProvider for CustomProvider {
    async fn chat(&self, request: ChatRequest) -> Result<String, ProviderError> {
        let payload = WireRequest {
            system: request.system_prompt.clone(),
            messages: request.history.clone(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let mut http_request = self.client.post(&self.config.endpoint).json(&payload);
        if let Some(key) = self.config.api_key() {
            http_request = http_request.header("Authorization", format!("Bearer {}", key));
        }

        let response = http_request.send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), body));
        }

        let envelope: WireResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::malformed(e.to_string()))?;

        Ok(envelope.response)
    }

    fn info(&self) -> ProviderInfo {
        ProviderInfo::new("custom", &self.config.endpoint)
    }
}

// ----- Wire types -----

#[derive(Debug, Serialize)]
struct WireRequest {
    system: String,
    /// Turns serialize as `{"role": ..., "content": ...}` directly.
    messages: Vec<ConversationTurn>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    response: String,
}
