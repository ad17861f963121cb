//! Recommendation generation from energy level and history.

use std::sync::Arc;

use crate::domain::card::JoyCard;
use crate::domain::chat::{extraction, ConversationTurn};
use crate::domain::foundation::Language;
use crate::domain::insight::JoyInsight;
use crate::ports::{ChatRequest, ProviderError, ProviderHandle};
use crate::prompts;

use super::{EnergyLevel, Recommendation};

/// Minimum recent cards accepted when the user has no joy laws yet.
pub const MIN_RECENT_CARDS: usize = 3;

/// How many recent cards go into the prompt.
pub const RECENT_CARD_LIMIT: usize = 5;

const EXPLORATION_TEMPERATURE: f32 = 0.9;
const EXPLORATION_MAX_TOKENS: u32 = 2000;

/// Recommendation failures.
#[derive(Debug, thiserror::Error)]
pub enum ExplorationError {
    /// Neither enough patterns nor enough recent cards; checked before any
    /// network call.
    #[error("not enough data: at least {min_cards} joy cards or one joy law required")]
    InsufficientData { min_cards: usize },

    /// Provider call failed.
    #[error("generation failed: {0}")]
    Generation(#[from] ProviderError),
}

/// Generates exploration suggestions in one provider round-trip.
pub struct Recommender {
    provider: Arc<ProviderHandle>,
    recent_limit: usize,
}

impl Recommender {
    /// Creates a recommender with the default recent-card window.
    pub fn new(provider: Arc<ProviderHandle>) -> Self {
        Self {
            provider,
            recent_limit: RECENT_CARD_LIMIT,
        }
    }

    /// Overrides the recent-card window.
    pub fn with_recent_limit(mut self, recent_limit: usize) -> Self {
        self.recent_limit = recent_limit;
        self
    }

    /// Recommends activities for the current energy level.
    ///
    /// `patterns` must already exclude rejected insights. Requires at least
    /// one pattern or [`MIN_RECENT_CARDS`] recent cards.
    pub async fn recommend(
        &self,
        language: Language,
        energy: EnergyLevel,
        patterns: &[JoyInsight],
        recent_cards: &[JoyCard],
    ) -> Result<Vec<Recommendation>, ExplorationError> {
        if patterns.is_empty() && recent_cards.len() < MIN_RECENT_CARDS {
            return Err(ExplorationError::InsufficientData {
                min_cards: MIN_RECENT_CARDS,
            });
        }

        let insights_json = serialize_patterns(patterns);
        let cards_json = serialize_recent(recent_cards, self.recent_limit);
        let prompt =
            prompts::exploration_prompt(language, energy.value(), &insights_json, &cards_json);

        let request = ChatRequest::new(prompts::exploration_system_prompt(language))
            .with_history(vec![ConversationTurn::user(prompt)])
            .with_temperature(EXPLORATION_TEMPERATURE)
            .with_max_tokens(EXPLORATION_MAX_TOKENS);

        let reply = self.provider.current().chat(request).await?;
        Ok(parse_recommendations(&reply))
    }
}

fn serialize_patterns(patterns: &[JoyInsight]) -> String {
    let payload: Vec<_> = patterns
        .iter()
        .map(|insight| {
            serde_json::json!({
                "insight": insight.insight_text,
                "statement": insight.statement,
                "type": insight.pattern_type,
            })
        })
        .collect();
    serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "[]".to_string())
}

fn serialize_recent(cards: &[JoyCard], limit: usize) -> String {
    let payload: Vec<_> = cards
        .iter()
        .take(limit)
        .map(|card| {
            serde_json::json!({
                "summary": card.card_summary,
                "raw": card.raw_input,
            })
        })
        .collect();
    serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "[]".to_string())
}

fn parse_recommendations(reply: &str) -> Vec<Recommendation> {
    extraction::extract_array(reply, "recommendations")
        .into_iter()
        .filter_map(|element| match serde_json::from_value(element) {
            Ok(recommendation) => Some(recommendation),
            Err(error) => {
                tracing::warn!(%error, "discarding non-object recommendation element");
                None
            }
        })
        .collect()
}
