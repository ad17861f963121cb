//! Joy exploration - context-aware activity recommendations.

mod recommender;

pub use recommender::{ExplorationError, Recommender, MIN_RECENT_CARDS, RECENT_CARD_LIMIT};

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Self-reported energy level, 1 through 10.
///
/// The level is passed to the generator as a raw number; the low/mid/high
/// banding lives entirely in prompt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnergyLevel(u8);

impl EnergyLevel {
    /// Validates and wraps an energy level.
    pub fn new(value: i32) -> Result<Self, ValidationError> {
        if !(1..=10).contains(&value) {
            return Err(ValidationError::out_of_range("energy_level", 1, 10, value));
        }
        Ok(Self(value as u8))
    }

    /// The raw level.
    pub fn value(&self) -> u8 {
        self.0
    }
}

/// A suggested exploration action.
///
/// Transient: produced fresh on every request and never persisted. Elements
/// come back exactly as the model emitted them; missing sub-fields are
/// tolerated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// The joy law this suggestion builds on, when the model named one.
    #[serde(default)]
    pub related_pattern: Option<String>,
    /// Why the suggestion fits the current energy level.
    #[serde(default)]
    pub fit_rationale: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_level_accepts_bounds() {
        assert_eq!(EnergyLevel::new(1).unwrap().value(), 1);
        assert_eq!(EnergyLevel::new(10).unwrap().value(), 10);
    }

    #[test]
    fn energy_level_rejects_out_of_range() {
        assert!(EnergyLevel::new(0).is_err());
        assert!(EnergyLevel::new(11).is_err());
        assert!(EnergyLevel::new(-3).is_err());
    }

    #[test]
    fn recommendation_tolerates_missing_fields() {
        let rec: Recommendation = serde_json::from_str(r#"{"title":"take a walk"}"#).unwrap();
        assert_eq!(rec.title, "take a walk");
        assert!(rec.related_pattern.is_none());
        assert_eq!(rec.fit_rationale, "");
    }
}
