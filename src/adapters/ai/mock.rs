//! Mock chat provider for tests.
//!
//! Scripted replies consumed in order, error injection, and call capture
//! for verifying what was sent - no network involved.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{ChatProvider, ChatRequest, ProviderError, ProviderInfo};

/// A scripted mock outcome.
#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Failure(MockFailure),
}

/// Cloneable mirror of [`ProviderError`] for scripting.
#[derive(Debug, Clone)]
enum MockFailure {
    Network(String),
    AuthenticationFailed,
    Api { status: u16, message: String },
    Malformed(String),
}

impl From<ProviderError> for MockFailure {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::Network(message) => MockFailure::Network(message),
            ProviderError::AuthenticationFailed => MockFailure::AuthenticationFailed,
            ProviderError::Api { status, message } => MockFailure::Api { status, message },
            ProviderError::MalformedResponse(message) => MockFailure::Malformed(message),
        }
    }
}

impl From<MockFailure> for ProviderError {
    fn from(failure: MockFailure) -> Self {
        match failure {
            MockFailure::Network(message) => ProviderError::Network(message),
            MockFailure::AuthenticationFailed => ProviderError::AuthenticationFailed,
            MockFailure::Api { status, message } => ProviderError::Api { status, message },
            MockFailure::Malformed(message) => ProviderError::MalformedResponse(message),
        }
    }
}

/// Configurable mock implementation of the [`ChatProvider`] port.
#[derive(Debug, Clone, Default)]
pub struct MockChatProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockChatProvider {
    /// Creates a mock with no scripted replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Text(reply.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: ProviderError) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Failure(error.into()));
        self
    }

    /// Requests captured so far.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn chat(&self, request: ChatRequest) -> Result<String, ProviderError> {
        self.requests.lock().unwrap().push(request);

        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(MockReply::Text(reply)) => Ok(reply),
            Some(MockReply::Failure(failure)) => Err(failure.into()),
            None => Err(ProviderError::network("mock has no scripted reply")),
        }
    }

    fn info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", "scripted")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_are_consumed_in_order() {
        let mock = MockChatProvider::new()
            .with_reply("first")
            .with_reply("second");

        assert_eq!(mock.chat(ChatRequest::new("x")).await.unwrap(), "first");
        assert_eq!(mock.chat(ChatRequest::new("x")).await.unwrap(), "second");
        assert!(mock.chat(ChatRequest::new("x")).await.is_err());
    }

    #[tokio::test]
    async fn errors_are_scripted() {
        let mock = MockChatProvider::new().with_error(ProviderError::api(429, "slow down"));
        let err = mock.chat(ChatRequest::new("x")).await.unwrap_err();
        assert!(matches!(err, ProviderError::Api { status: 429, .. }));
    }

    #[tokio::test]
    async fn requests_are_captured() {
        let mock = MockChatProvider::new().with_reply("ok");
        mock.chat(ChatRequest::new("system text")).await.unwrap();

        let captured = mock.requests();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].system_prompt, "system text");
    }
}
