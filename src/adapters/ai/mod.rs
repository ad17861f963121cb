//! AI provider adapters.
//!
//! One adapter per backend, all implementing the [`ChatProvider`] port,
//! plus a factory that constructs the adapter named by configuration.
//! Swapping providers at runtime reconstructs the adapter and replaces the
//! reference held by [`ProviderHandle`].

mod anthropic;
mod custom;
mod gemini;
mod mock;
mod openai;

pub use anthropic::{AnthropicConfig, AnthropicProvider};
pub use custom::{CustomConfig, CustomProvider};
pub use gemini::{GeminiConfig, GeminiProvider};
pub use mock::MockChatProvider;
pub use openai::{OpenAiConfig, OpenAiProvider};

use std::sync::Arc;

use crate::config::{AiConfig, ProviderKind, ValidationError};
use crate::ports::ChatProvider;

/// Constructs the adapter for the given provider kind from credentials.
///
/// Fails when the kind's credentials are missing - checked here again
/// because runtime switches can name a provider that startup validation
/// never looked at.
pub fn build_provider(
    kind: ProviderKind,
    config: &AiConfig,
) -> Result<Arc<dyn ChatProvider>, ValidationError> {
    let timeout = config.timeout();
    match kind {
        ProviderKind::OpenAi => {
            let api_key = require(&config.openai_api_key, "AI__OPENAI_API_KEY")?;
            Ok(Arc::new(OpenAiProvider::new(
                OpenAiConfig::new(api_key)
                    .with_model(&config.openai_model)
                    .with_timeout(timeout),
            )))
        }
        ProviderKind::Anthropic => {
            let api_key = require(&config.anthropic_api_key, "AI__ANTHROPIC_API_KEY")?;
            Ok(Arc::new(AnthropicProvider::new(
                AnthropicConfig::new(api_key)
                    .with_model(&config.anthropic_model)
                    .with_timeout(timeout),
            )))
        }
        ProviderKind::Gemini => {
            let api_key = require(&config.gemini_api_key, "AI__GEMINI_API_KEY")?;
            Ok(Arc::new(GeminiProvider::new(
                GeminiConfig::new(api_key)
                    .with_model(&config.gemini_model)
                    .with_timeout(timeout),
            )))
        }
        ProviderKind::Custom => {
            let endpoint = require(&config.custom_endpoint, "AI__CUSTOM_ENDPOINT")?;
            let mut custom = CustomConfig::new(endpoint).with_timeout(timeout);
            if let Some(key) = config.custom_api_key.as_deref().filter(|k| !k.is_empty()) {
                custom = custom.with_api_key(key);
            }
            Ok(Arc::new(CustomProvider::new(custom)))
        }
    }
}

fn require<'a>(
    setting: &'a Option<String>,
    name: &'static str,
) -> Result<&'a str, ValidationError> {
    setting
        .as_deref()
        .filter(|value| !value.is_empty())
        .ok_or(ValidationError::MissingRequired(name))
}
