//! Chat sessions - the container for an elicitation conversation.

use serde::{Deserialize, Serialize};

use crate::domain::chat::ConversationTurn;
use crate::domain::foundation::{
    CardId, SessionId, StateMachine, Timestamp, UserId, ValidationError,
};

/// Lifecycle of a chat session.
///
/// `Active` is the only state that accepts turns; both `Completed` and
/// `Abandoned` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Completed,
    Abandoned,
}

impl StateMachine for SessionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (SessionStatus::Active, SessionStatus::Completed)
                | (SessionStatus::Active, SessionStatus::Abandoned)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            SessionStatus::Active => vec![SessionStatus::Completed, SessionStatus::Abandoned],
            SessionStatus::Completed | SessionStatus::Abandoned => Vec::new(),
        }
    }
}

/// What a session is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    CardCreation,
    Exploration,
}

/// A conversation session owned by a user.
///
/// Turns live only as long as their session; a completed session keeps a
/// back-reference to the card it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: SessionId,
    pub user_id: UserId,
    pub session_type: SessionType,
    pub status: SessionStatus,
    pub joy_card_id: Option<CardId>,
    pub turns: Vec<ConversationTurn>,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

impl ChatSession {
    /// Opens a new card-creation session.
    pub fn card_creation(user_id: UserId) -> Self {
        Self {
            id: SessionId::new(),
            user_id,
            session_type: SessionType::CardCreation,
            status: SessionStatus::Active,
            joy_card_id: None,
            turns: Vec::new(),
            created_at: Timestamp::now(),
            completed_at: None,
        }
    }

    /// True while the session accepts turns.
    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    /// Replaces the turn history with the updated one from a processed turn.
    pub fn set_turns(&mut self, turns: Vec<ConversationTurn>) {
        self.turns = turns;
    }

    /// Marks the session completed, recording the card it produced.
    pub fn complete(&mut self, card_id: CardId) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(SessionStatus::Completed)?;
        self.joy_card_id = Some(card_id);
        self.completed_at = Some(Timestamp::now());
        Ok(())
    }

    /// Marks the session abandoned (user-initiated exit).
    pub fn abandon(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(SessionStatus::Abandoned)?;
        self.completed_at = Some(Timestamp::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_active_and_empty() {
        let session = ChatSession::card_creation(UserId::new());
        assert!(session.is_active());
        assert!(session.turns.is_empty());
        assert!(session.joy_card_id.is_none());
    }

    #[test]
    fn complete_records_card_reference() {
        let mut session = ChatSession::card_creation(UserId::new());
        let card_id = CardId::new();
        session.complete(card_id).unwrap();
        assert_eq!(session.status, SessionStatus::Completed);
        assert_eq!(session.joy_card_id, Some(card_id));
        assert!(session.completed_at.is_some());
    }

    #[test]
    fn terminal_states_reject_further_transitions() {
        let mut session = ChatSession::card_creation(UserId::new());
        session.abandon().unwrap();
        assert!(session.complete(CardId::new()).is_err());
        assert!(session.abandon().is_err());
    }

    #[test]
    fn active_is_not_terminal_but_ends_are() {
        assert!(!SessionStatus::Active.is_terminal());
        assert!(SessionStatus::Completed.is_terminal());
        assert!(SessionStatus::Abandoned.is_terminal());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SessionStatus::Abandoned).unwrap(),
            "\"abandoned\""
        );
    }
}
