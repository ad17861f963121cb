//! User accounts.
//!
//! Authentication is identifier-based (the `X-User-ID` header); unknown
//! identifiers are auto-created on first contact.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Language, Timestamp, UserId};

/// A user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// External identifier presented by the client.
    pub user_identifier: String,
    pub display_name: Option<String>,
    /// Interface and prompt language.
    pub language: Language,
    pub created_at: Timestamp,
    pub last_active: Timestamp,
}

impl User {
    /// Creates a fresh account for an identifier.
    pub fn new(user_identifier: impl Into<String>) -> Self {
        let identifier = user_identifier.into();
        let now = Timestamp::now();
        Self {
            id: UserId::new(),
            display_name: Some(format!("User_{}", identifier)),
            user_identifier: identifier,
            language: Language::default(),
            created_at: now,
            last_active: now,
        }
    }
}
