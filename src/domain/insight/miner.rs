//! Pattern mining over a batch of joy cards.

use serde::Deserialize;
use std::sync::Arc;

use crate::domain::card::JoyCard;
use crate::domain::chat::{extraction, ConversationTurn};
use crate::domain::foundation::Language;
use crate::ports::{ChatRequest, ProviderError, ProviderHandle};
use crate::prompts;

use super::CardEvidence;

/// Minimum number of cards required before mining is attempted.
pub const MIN_CARDS_FOR_MINING: usize = 5;

const MINING_TEMPERATURE: f32 = 0.8;
const MINING_MAX_TOKENS: u32 = 3000;

/// An insight element exactly as the model returned it.
///
/// Every sub-field is optional: elements are passed through with missing
/// fields tolerated, never rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MinedInsight {
    #[serde(default)]
    pub insight: String,
    #[serde(default)]
    pub statement: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub evidence: Vec<CardEvidence>,
    #[serde(default)]
    pub pattern_type: Option<String>,
}

/// Mining failures.
#[derive(Debug, thiserror::Error)]
pub enum MiningError {
    /// Not enough cards; checked before any network call.
    #[error("at least {need} cards are required to mine patterns, got {have}")]
    InsufficientData { have: usize, need: usize },

    /// Provider call failed.
    #[error("generation failed: {0}")]
    Generation(#[from] ProviderError),
}

/// Mines recurring patterns out of a user's accumulated cards.
///
/// Single-shot: every call serializes the whole batch into one prompt and
/// makes one provider round-trip. Repeated calls over identical input may
/// legitimately yield different results - the generator is non-deterministic
/// and that is accepted, not corrected.
pub struct InsightMiner {
    provider: Arc<ProviderHandle>,
    min_cards: usize,
}

impl InsightMiner {
    /// Creates a miner with the default card threshold.
    pub fn new(provider: Arc<ProviderHandle>) -> Self {
        Self {
            provider,
            min_cards: MIN_CARDS_FOR_MINING,
        }
    }

    /// Overrides the minimum card count.
    pub fn with_min_cards(mut self, min_cards: usize) -> Self {
        self.min_cards = min_cards;
        self
    }

    /// Minimum card count currently enforced.
    pub fn min_cards(&self) -> usize {
        self.min_cards
    }

    /// Mines zero or more pattern statements from the given cards.
    pub async fn mine(
        &self,
        language: Language,
        cards: &[JoyCard],
    ) -> Result<Vec<MinedInsight>, MiningError> {
        if cards.len() < self.min_cards {
            return Err(MiningError::InsufficientData {
                have: cards.len(),
                need: self.min_cards,
            });
        }

        let cards_json = serialize_cards(cards);
        let request = ChatRequest::new(prompts::insight_system_prompt(language))
            .with_history(vec![ConversationTurn::user(
                prompts::insight_generation_prompt(language, &cards_json),
            )])
            .with_temperature(MINING_TEMPERATURE)
            .with_max_tokens(MINING_MAX_TOKENS);

        let reply = self.provider.current().chat(request).await?;
        Ok(parse_mined(&reply))
    }
}

/// Serializes cards for the mining prompt: id, summary, raw input, and all
/// five formula fields.
fn serialize_cards(cards: &[JoyCard]) -> String {
    let payload: Vec<_> = cards
        .iter()
        .map(|card| {
            serde_json::json!({
                "id": card.id.to_string(),
                "summary": card.card_summary,
                "raw_input": card.raw_input,
                "formula": card.formula,
            })
        })
        .collect();
    serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "[]".to_string())
}

fn parse_mined(reply: &str) -> Vec<MinedInsight> {
    extraction::extract_array(reply, "insights")
        .into_iter()
        .filter_map(|element| match serde_json::from_value(element) {
            Ok(mined) => Some(mined),
            Err(error) => {
                tracing::warn!(%error, "discarding non-object insight element");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockChatProvider;
    use crate::domain::card::Formula;
    use crate::domain::foundation::UserId;

    fn cards(count: usize) -> Vec<JoyCard> {
        let user = UserId::new();
        (0..count)
            .map(|i| {
                JoyCard::new(
                    user,
                    format!("happy moment {}", i),
                    Formula {
                        scene: Some("cafe".into()),
                        ..Default::default()
                    },
                    Some(format!("moment {}", i)),
                    Vec::new(),
                )
            })
            .collect()
    }

    fn miner_with_reply(reply: &str) -> InsightMiner {
        let provider = Arc::new(ProviderHandle::new(Arc::new(
            MockChatProvider::new().with_reply(reply),
        )));
        InsightMiner::new(provider)
    }

    #[tokio::test]
    async fn four_cards_is_insufficient() {
        let miner = miner_with_reply("unused");
        let err = miner.mine(Language::En, &cards(4)).await.unwrap_err();
        assert!(matches!(
            err,
            MiningError::InsufficientData { have: 4, need: 5 }
        ));
    }

    #[tokio::test]
    async fn five_cards_passes_precondition() {
        let miner = miner_with_reply("no structured data in this reply");
        let mined = miner.mine(Language::En, &cards(5)).await.unwrap();
        // Extraction miss means zero results, not a failure.
        assert!(mined.is_empty());
    }

    #[tokio::test]
    async fn parses_insights_from_fenced_reply() {
        let reply = r#"I found a pattern!

```json
{"insights":[{"insight":"warm drinks anchor your joy","statement":"warmth brings joy","keywords":["warmth","coffee"],"evidence":[{"card_id":"c1","quote":"held a hot cup"}],"pattern_type":"Sensory Delight"}]}
```"#;
        let miner = miner_with_reply(reply);
        let mined = miner.mine(Language::En, &cards(5)).await.unwrap();
        assert_eq!(mined.len(), 1);
        assert_eq!(mined[0].insight, "warm drinks anchor your joy");
        assert_eq!(mined[0].keywords.len(), 2);
        assert_eq!(mined[0].evidence[0].card_id, "c1");
    }

    #[tokio::test]
    async fn element_missing_pattern_type_still_appears() {
        let reply = r#"```json
{"insights":[{"insight":"x"},{"insight":"y","pattern_type":"Solitude & Reflection"}]}
```"#;
        let miner = miner_with_reply(reply);
        let mined = miner.mine(Language::En, &cards(5)).await.unwrap();
        assert_eq!(mined.len(), 2);
        assert!(mined[0].pattern_type.is_none());
        assert_eq!(mined[1].pattern_type.as_deref(), Some("Solitude & Reflection"));
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let provider = Arc::new(ProviderHandle::new(Arc::new(
            MockChatProvider::new().with_error(ProviderError::network("down")),
        )));
        let miner = InsightMiner::new(provider);
        let err = miner.mine(Language::En, &cards(5)).await.unwrap_err();
        assert!(matches!(err, MiningError::Generation(_)));
    }

    #[test]
    fn serialized_cards_carry_all_fields() {
        let cards = cards(1);
        let json = serialize_cards(&cards);
        assert!(json.contains("raw_input"));
        assert!(json.contains("scene"));
        assert!(json.contains(&cards[0].id.to_string()));
    }
}
