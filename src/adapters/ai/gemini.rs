//! Gemini provider - ChatProvider implementation for the generateContent API.
//!
//! Gemini has no separate system/history channels in this integration: the
//! system prompt and every turn are flattened into a single text prompt,
//! one line per turn, and sent as one content part.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::chat::TurnRole;
use crate::ports::{ChatProvider, ChatRequest, ProviderError, ProviderInfo};

use super::openai::{status_error, transport_error};

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key passed as a query parameter.
    api_key: Secret<String>,
    /// Model to use (e.g. "gemini-2.5-flash-lite").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-2.5-flash-lite".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
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

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    fn to_wire_request(&self, request: &ChatRequest) -> WireRequest {
        WireRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: flatten_prompt(request),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        }
    }
}

/// Merges the system prompt and history into one text blob.
fn flatten_prompt(request: &ChatRequest) -> String {
    let mut prompt = format!("{}\n\n", request.system_prompt);
    for turn in &request.history {
        let role = match turn.role {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        };
        prompt.push_str(&format!("{}: {}\n", role, turn.content));
    }
    prompt
}

#[async_trait]
impl ChatProvider for GeminiProvider {
    async fn chat(&self, request: ChatRequest) -> Result<String, ProviderError> {
        let wire_request = self.to_wire_request(&request);

        let response = self
            .client
            .post(self.generate_url())
            .query(&[("key", self.config.api_key())])
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
        ProviderInfo::new("gemini", &self.config.model)
    }
}

fn reply_text(envelope: WireResponse) -> Result<String, ProviderError> {
    envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .map(|part| part.text)
        .ok_or_else(|| ProviderError::malformed("no candidates in response"))
}

// ----- Gemini API types -----

#[derive(Debug, Serialize)]
struct WireRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}
