//! OpenAI provider - ChatProvider implementation for the chat-completions API.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::chat::TurnRole;
use crate::ports::{ChatProvider, ChatRequest, ProviderError, ProviderInfo};

/// Configuration for the OpenAI provider.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g. "gpt-4o").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
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

/// OpenAI API provider implementation.
pub struct OpenAiProvider {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiProvider {
    /// Creates a new OpenAI provider with the given configuration.
    pub fn new(config: OpenAiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Converts our request to OpenAI's format: the system prompt becomes
    /// the leading system message, followed by the history verbatim.
    fn to_wire_request(&self, request: &ChatRequest) -> WireRequest {
        let mut messages = vec![WireMessage {
            role: "system".to_string(),
            content: request.system_prompt.clone(),
        }];

        for turn in &request.history {
            messages.push(WireMessage {
                role: role_name(turn.role).to_string(),
                content: turn.content.clone(),
            });
        }

        WireRequest {
            model: self.config.model.clone(),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    async fn chat(&self, request: ChatRequest) -> Result<String, ProviderError> {
        let wire_request = self.to_wire_request(&request);

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
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
        ProviderInfo::new("openai", &self.config.model)
    }
}

fn role_name(role: TurnRole) -> &'static str {
    match role {
        TurnRole::User => "user",
        TurnRole::Assistant => "assistant",
    }
}

pub(super) fn transport_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::network(format!("request timed out: {}", error))
    } else if error.is_connect() {
        ProviderError::network(format!("connection failed: {}", error))
    } else {
        ProviderError::network(error.to_string())
    }
}

pub(super) fn status_error(status: u16, body: String) -> ProviderError {
    match status {
        401 | 403 => ProviderError::AuthenticationFailed,
        _ => ProviderError::api(status, body),
    }
}

fn reply_text(envelope: WireResponse) -> Result<String, ProviderError> {
    envelope
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| ProviderError::malformed("no choices in response"))
}

// ----- OpenAI API types -----

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
}
