//! Joy cards - the structured distillation of a happiness moment.

use serde::{Deserialize, Serialize};

use crate::domain::chat::ConversationTurn;
use crate::domain::foundation::{CardId, Timestamp, UserId};

/// The five-field joy formula.
///
/// Every field is optional: the model fills what the conversation surfaced
/// and nothing here second-guesses how many fields are enough.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formula {
    /// Where/when/atmosphere.
    #[serde(default)]
    pub scene: Option<String>,
    /// Who was involved.
    #[serde(default)]
    pub people: Option<String>,
    /// What happened.
    #[serde(default)]
    pub event: Option<String>,
    /// The motivation or spark.
    #[serde(default)]
    pub trigger: Option<String>,
    /// The core sensory or emotional moment.
    #[serde(default)]
    pub sensation: Option<String>,
}

impl Formula {
    /// Number of populated fields.
    pub fn populated_fields(&self) -> usize {
        [
            &self.scene,
            &self.people,
            &self.event,
            &self.trigger,
            &self.sensation,
        ]
        .iter()
        .filter(|f| f.is_some())
        .count()
    }
}

/// A finalized happiness record, owned by the user account.
///
/// Cards outlive the session that produced them; the session keeps a
/// back-reference, not the reverse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoyCard {
    pub id: CardId,
    pub user_id: UserId,
    /// The user message that completed the card.
    pub raw_input: String,
    /// Structured formula as extracted.
    pub formula: Formula,
    /// One-sentence summary.
    pub card_summary: Option<String>,
    /// Snapshot of the conversation that produced this card.
    pub conversation_history: Vec<ConversationTurn>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl JoyCard {
    /// Creates a new card for a user.
    pub fn new(
        user_id: UserId,
        raw_input: impl Into<String>,
        formula: Formula,
        card_summary: Option<String>,
        conversation_history: Vec<ConversationTurn>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: CardId::new(),
            user_id,
            raw_input: raw_input.into(),
            formula,
            card_summary,
            conversation_history,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formula_counts_populated_fields() {
        let formula = Formula {
            scene: Some("cafe".into()),
            sensation: Some("warmth".into()),
            ..Default::default()
        };
        assert_eq!(formula.populated_fields(), 2);
        assert_eq!(Formula::default().populated_fields(), 0);
    }

    #[test]
    fn formula_tolerates_missing_fields_in_json() {
        let formula: Formula = serde_json::from_str(r#"{"scene":"park"}"#).unwrap();
        assert_eq!(formula.scene.as_deref(), Some("park"));
        assert!(formula.people.is_none());
    }

    #[test]
    fn new_card_belongs_to_user() {
        let user = UserId::new();
        let card = JoyCard::new(user, "great coffee", Formula::default(), None, Vec::new());
        assert_eq!(card.user_id, user);
        assert_eq!(card.created_at, card.updated_at);
    }
}
