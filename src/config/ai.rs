//! AI provider configuration.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::error::ValidationError;

/// Which text-generation backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    #[default]
    Anthropic,
    Gemini,
    /// A non-standard endpoint speaking the simple `{system, messages}` shape.
    Custom,
}

impl ProviderKind {
    /// Stable lowercase name ("openai", "anthropic", "gemini", "custom").
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Custom => "custom",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            "gemini" => Ok(ProviderKind::Gemini),
            "custom" => Ok(ProviderKind::Custom),
            other => Err(ValidationError::invalid(
                "ai.provider",
                format!("unknown provider '{}'", other),
            )),
        }
    }
}

/// AI provider configuration.
///
/// Credentials are loaded once here; the selected adapter is constructed
/// from them at startup (and reconstructed on an operator-initiated
/// provider switch).
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Initially selected provider.
    #[serde(default)]
    pub provider: ProviderKind,

    /// OpenAI API key.
    pub openai_api_key: Option<String>,
    /// OpenAI model.
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Anthropic API key.
    pub anthropic_api_key: Option<String>,
    /// Anthropic model.
    #[serde(default = "default_anthropic_model")]
    pub anthropic_model: String,

    /// Gemini API key.
    pub gemini_api_key: Option<String>,
    /// Gemini model.
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Endpoint URL for the custom provider.
    pub custom_endpoint: Option<String>,
    /// API key for the custom provider.
    pub custom_api_key: Option<String>,

    /// HTTP client timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// HTTP client timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// True when the given provider has the credentials it needs.
    pub fn is_configured(&self, kind: ProviderKind) -> bool {
        match kind {
            ProviderKind::OpenAi => has_value(&self.openai_api_key),
            ProviderKind::Anthropic => has_value(&self.anthropic_api_key),
            ProviderKind::Gemini => has_value(&self.gemini_api_key),
            ProviderKind::Custom => has_value(&self.custom_endpoint),
        }
    }

    /// Validates that the selected provider can actually be constructed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.is_configured(self.provider) {
            return Err(ValidationError::MissingRequired(match self.provider {
                ProviderKind::OpenAi => "AI__OPENAI_API_KEY",
                ProviderKind::Anthropic => "AI__ANTHROPIC_API_KEY",
                ProviderKind::Gemini => "AI__GEMINI_API_KEY",
                ProviderKind::Custom => "AI__CUSTOM_ENDPOINT",
            }));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            openai_api_key: None,
            openai_model: default_openai_model(),
            anthropic_api_key: None,
            anthropic_model: default_anthropic_model(),
            gemini_api_key: None,
            gemini_model: default_gemini_model(),
            custom_endpoint: None,
            custom_api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn has_value(setting: &Option<String>) -> bool {
    setting.as_ref().is_some_and(|v| !v.is_empty())
}

fn default_openai_model() -> String {
    "gpt-4o".to_string()
}

fn default_anthropic_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash-lite".to_string()
}

fn default_timeout() -> u64 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_anthropic() {
        let config = AiConfig::default();
        assert_eq!(config.provider, ProviderKind::Anthropic);
        assert_eq!(config.anthropic_model, "claude-sonnet-4-20250514");
        assert_eq!(config.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn validation_requires_selected_provider_key() {
        let config = AiConfig::default();
        assert!(config.validate().is_err());

        let config = AiConfig {
            anthropic_api_key: Some("sk-ant-xxx".into()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn custom_provider_needs_endpoint_not_key() {
        let config = AiConfig {
            provider: ProviderKind::Custom,
            custom_endpoint: Some("https://defy.internal/generate".into()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert!(config.is_configured(ProviderKind::Custom));
    }

    #[test]
    fn provider_kind_parses() {
        assert_eq!("openai".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!("Gemini".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
        assert!("llama".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn empty_key_counts_as_unconfigured() {
        let config = AiConfig {
            openai_api_key: Some("".into()),
            ..Default::default()
        };
        assert!(!config.is_configured(ProviderKind::OpenAi));
    }
}
