//! Conversation turns exchanged with the joy coach.

use serde::{Deserialize, Serialize};

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// End-user input.
    User,
    /// Coach (model) reply.
    Assistant,
}

/// A single turn in an elicitation conversation.
///
/// Turns are append-only within a session and their order is reproduced
/// verbatim to the provider on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Who sent this turn.
    pub role: TurnRole,
    /// Turn content.
    pub content: String,
}

impl ConversationTurn {
    /// Creates a new turn.
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    /// Creates an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_roles() {
        assert_eq!(ConversationTurn::user("hi").role, TurnRole::User);
        assert_eq!(ConversationTurn::assistant("hey").role, TurnRole::Assistant);
    }

    #[test]
    fn role_serializes_lowercase() {
        let turn = ConversationTurn::user("hello");
        let json = serde_json::to_string(&turn).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hello"}"#);
    }

    #[test]
    fn roundtrips_through_json() {
        let turns = vec![
            ConversationTurn::assistant("hey! what made you happy today?"),
            ConversationTurn::user("had a great coffee"),
        ];
        let json = serde_json::to_string(&turns).unwrap();
        let back: Vec<ConversationTurn> = serde_json::from_str(&json).unwrap();
        assert_eq!(turns, back);
    }
}
