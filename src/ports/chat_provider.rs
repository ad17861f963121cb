//! Chat Provider Port - interface for text-generation backends.
//!
//! Abstracts the external AI vendors (OpenAI, Anthropic, Gemini, custom
//! endpoints) behind one synchronous-per-call contract: system prompt plus
//! ordered history in, plain reply text out. The adapter translates that
//! contract into each vendor's request shape and pulls the reply text out
//! of the vendor's response envelope - nothing more. No retries and no
//! timeout policy beyond the HTTP client's configured default; a failed
//! call propagates to the caller as a generation failure.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::domain::chat::ConversationTurn;

/// Port for text-generation provider interactions.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Generates a single completion for the given request.
    async fn chat(&self, request: ChatRequest) -> Result<String, ProviderError>;

    /// Returns provider identity (name, model).
    fn info(&self) -> ProviderInfo;
}

/// Request for a chat completion.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// System prompt guiding model behavior (opaque configuration text).
    pub system_prompt: String,
    /// Conversation history in caller-supplied order, reproduced verbatim.
    pub history: Vec<ConversationTurn>,
    /// Sampling temperature, passed through unvalidated.
    pub temperature: f32,
    /// Maximum tokens to generate, passed through unvalidated.
    pub max_tokens: u32,
}

impl ChatRequest {
    /// Creates a request with default sampling knobs.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            history: Vec::new(),
            temperature: 0.7,
            max_tokens: 2000,
        }
    }

    /// Sets the conversation history.
    pub fn with_history(mut self, history: Vec<ConversationTurn>) -> Self {
        self.history = history;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Provider identity.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ProviderInfo {
    /// Provider name (e.g. "openai", "anthropic").
    pub name: String,
    /// Model identifier (e.g. "gpt-4o").
    pub model: String,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Provider call failures.
///
/// Callers do not branch on these: every variant means "generation failed"
/// and is surfaced with a generic message. The variants exist for logs.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Network-level failure reaching the provider.
    #[error("network error: {0}")]
    Network(String),

    /// API key or authentication rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider returned a non-success status.
    #[error("provider error {status}: {message}")]
    Api { status: u16, message: String },

    /// Provider response envelope could not be read.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates a malformed response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }
}

/// Explicit current-adapter reference.
///
/// Provider selection is an operator action that can change at runtime;
/// swapping simply reconstructs the adapter and replaces the reference
/// behind a lock. An in-flight call keeps whichever adapter it resolved
/// before the swap (last-write-wins).
pub struct ProviderHandle {
    current: RwLock<Arc<dyn ChatProvider>>,
}

impl ProviderHandle {
    /// Creates a handle around an initial provider.
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            current: RwLock::new(provider),
        }
    }

    /// Returns the currently selected provider.
    pub fn current(&self) -> Arc<dyn ChatProvider> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replaces the current provider.
    pub fn swap(&self, provider: Arc<dyn ChatProvider>) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = provider;
    }

    /// Identity of the currently selected provider.
    pub fn info(&self) -> ProviderInfo {
        self.current().info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProvider(&'static str);

    #[async_trait]
    impl ChatProvider for FixedProvider {
        async fn chat(&self, _request: ChatRequest) -> Result<String, ProviderError> {
            Ok(self.0.to_string())
        }

        fn info(&self) -> ProviderInfo {
            ProviderInfo::new(self.0, "fixed")
        }
    }

    #[test]
    fn request_builder_works() {
        let request = ChatRequest::new("be helpful")
            .with_history(vec![ConversationTurn::user("hi")])
            .with_temperature(0.9)
            .with_max_tokens(300);

        assert_eq!(request.system_prompt, "be helpful");
        assert_eq!(request.history.len(), 1);
        assert_eq!(request.temperature, 0.9);
        assert_eq!(request.max_tokens, 300);
    }

    #[tokio::test]
    async fn handle_swaps_provider() {
        let handle = ProviderHandle::new(Arc::new(FixedProvider("first")));
        assert_eq!(handle.info().name, "first");

        handle.swap(Arc::new(FixedProvider("second")));
        assert_eq!(handle.info().name, "second");

        let reply = handle.current().chat(ChatRequest::new("x")).await.unwrap();
        assert_eq!(reply, "second");
    }

    #[test]
    fn provider_error_displays() {
        assert_eq!(
            ProviderError::api(500, "boom").to_string(),
            "provider error 500: boom"
        );
        assert_eq!(
            ProviderError::network("refused").to_string(),
            "network error: refused"
        );
    }
}
