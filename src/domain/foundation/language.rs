//! Language selection for prompts and user-facing templates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Supported interface languages.
///
/// Selects which prompt catalog entry is sent to the AI provider and which
/// user-facing template strings are rendered. Stored per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English (default for new users).
    #[default]
    En,
    /// Simplified Chinese.
    Zh,
}

impl Language {
    /// Short code used in storage and the API ("en" / "zh").
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "zh" => Ok(Language::Zh),
            other => Err(ValidationError::invalid_format(
                "language",
                format!("unsupported language code '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_codes() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!("ZH".parse::<Language>().unwrap(), Language::Zh);
    }

    #[test]
    fn rejects_unknown_codes() {
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn default_is_english() {
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Language::Zh).unwrap(), "\"zh\"");
    }
}
