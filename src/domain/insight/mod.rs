//! Joy insights - recurring happiness patterns mined from cards.

mod miner;

pub use miner::{InsightMiner, MinedInsight, MiningError, MIN_CARDS_FOR_MINING};

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{InsightId, Timestamp, UserId};

/// A quote from a card backing an insight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEvidence {
    /// Id of the card the quote came from.
    #[serde(default)]
    pub card_id: String,
    /// The user's own words.
    #[serde(default)]
    pub quote: String,
}

/// A persisted pattern statement ("Joy Law").
///
/// Produced only by mining a batch of cards; afterwards it lives as an
/// independent entity, mutable only through the confirmed/rejected flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoyInsight {
    pub id: InsightId,
    pub user_id: UserId,
    /// Core insight text (1-2 sentences).
    pub insight_text: String,
    /// One-line statement of the pattern.
    pub statement: Option<String>,
    /// 5-8 short phrases lifted from the cards.
    pub keywords: Vec<String>,
    /// Card quotes supporting the pattern.
    pub evidence: Vec<CardEvidence>,
    /// Pattern classification label.
    pub pattern_type: Option<String>,
    pub is_confirmed: bool,
    pub is_rejected: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl JoyInsight {
    /// Builds a persistable insight from a mined payload.
    ///
    /// Missing sub-fields are tolerated, never dropped: an element without
    /// insight text is stored with an empty string.
    pub fn from_mined(user_id: UserId, mined: MinedInsight) -> Self {
        let now = Timestamp::now();
        Self {
            id: InsightId::new(),
            user_id,
            insight_text: mined.insight,
            statement: mined.statement,
            keywords: mined.keywords,
            evidence: mined.evidence,
            pattern_type: mined.pattern_type,
            is_confirmed: false,
            is_rejected: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the insight confirmed, clearing any rejection.
    pub fn confirm(&mut self) {
        self.is_confirmed = true;
        self.is_rejected = false;
        self.updated_at = Timestamp::now();
    }

    /// Marks the insight rejected, clearing any confirmation.
    pub fn reject(&mut self) {
        self.is_rejected = true;
        self.is_confirmed = false;
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(user: UserId) -> JoyInsight {
        JoyInsight::from_mined(
            user,
            MinedInsight {
                insight: "public speaking is your joy anchor".into(),
                statement: Some("speaking to a room brings fulfillment".into()),
                keywords: vec!["presenting".into(), "being heard".into()],
                evidence: vec![CardEvidence {
                    card_id: "card-1".into(),
                    quote: "gave a talk and everyone listened".into(),
                }],
                pattern_type: Some("Creative Expression".into()),
            },
        )
    }

    #[test]
    fn fresh_insight_is_unflagged() {
        let insight = sample(UserId::new());
        assert!(!insight.is_confirmed);
        assert!(!insight.is_rejected);
    }

    #[test]
    fn confirm_and_reject_are_mutually_exclusive() {
        let mut insight = sample(UserId::new());

        insight.confirm();
        assert!(insight.is_confirmed);
        assert!(!insight.is_rejected);

        insight.reject();
        assert!(!insight.is_confirmed);
        assert!(insight.is_rejected);

        insight.confirm();
        assert!(insight.is_confirmed);
        assert!(!insight.is_rejected);
    }

    #[test]
    fn mined_payload_without_text_is_kept() {
        let insight = JoyInsight::from_mined(UserId::new(), MinedInsight::default());
        assert_eq!(insight.insight_text, "");
        assert!(insight.pattern_type.is_none());
    }
}
