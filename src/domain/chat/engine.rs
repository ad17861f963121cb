//! The joy coach conversation engine.
//!
//! Completion is detected opportunistically on every turn: the coach is
//! free-form until its reply carries a machine-readable completed formula.
//! The engine is pure per call - it holds no conversation state between
//! turns; the session entity owns lifecycle and history.

use std::sync::Arc;

use crate::domain::foundation::Language;
use crate::ports::{ChatRequest, ProviderError, ProviderHandle};
use crate::prompts;

use super::extraction::{self, CompletedFormula};
use super::ConversationTurn;

const CHAT_TEMPERATURE: f32 = 0.7;
const CHAT_MAX_TOKENS: u32 = 2000;

/// Inputs that end a conversation without calling the provider.
const EXIT_COMMANDS: &[&str] = &["退出", "quit", "exit"];

/// Outcome state of a processed turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// Keep talking; no completed formula yet.
    Active,
    /// A completed formula was extracted; the conversation is done.
    Complete,
}

/// Result of advancing the conversation by one turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The coach's reply, shown to the user verbatim (the data block, when
    /// present, is not stripped out).
    pub reply: String,
    /// Whether this turn completed the formula.
    pub state: TurnState,
    /// The extracted formula when complete.
    pub completion: Option<CompletedFormula>,
    /// Updated history (user turn + coach reply appended) for the caller
    /// to persist.
    pub history: Vec<ConversationTurn>,
}

impl TurnOutcome {
    /// True once a formula was extracted.
    pub fn is_complete(&self) -> bool {
        self.state == TurnState::Complete
    }
}

/// Turn processing failures.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// Provider call failed; nothing was committed.
    #[error("generation failed: {0}")]
    Generation(#[from] ProviderError),
}

/// Drives the elicitation dialogue against the current provider.
pub struct ChatEngine {
    provider: Arc<ProviderHandle>,
}

impl ChatEngine {
    /// Creates an engine over the given provider handle.
    pub fn new(provider: Arc<ProviderHandle>) -> Self {
        Self { provider }
    }

    /// True when the input is an exit command.
    ///
    /// Callers check this before invoking [`advance`](Self::advance) and
    /// abandon the session instead; no provider call is made for an exit.
    pub fn is_exit_command(input: &str) -> bool {
        let normalized = input.trim().to_lowercase();
        EXIT_COMMANDS.contains(&normalized.as_str())
    }

    /// Processes one user turn.
    ///
    /// Appends the user message, asks the provider for a reply with the
    /// locale's coach prompt, and tests the reply for a completed formula.
    /// A provider failure propagates unchanged; the caller decides whether
    /// to persist anything for a failed turn.
    pub async fn advance(
        &self,
        language: Language,
        history: &[ConversationTurn],
        user_message: &str,
    ) -> Result<TurnOutcome, ChatError> {
        let mut turns = history.to_vec();
        turns.push(ConversationTurn::user(user_message));

        let request = ChatRequest::new(prompts::coach_system_prompt(language))
            .with_history(turns.clone())
            .with_temperature(CHAT_TEMPERATURE)
            .with_max_tokens(CHAT_MAX_TOKENS);

        let reply = self.provider.current().chat(request).await?;
        let completion = extraction::extract_formula(&reply);

        turns.push(ConversationTurn::assistant(reply.clone()));

        let state = if completion.is_some() {
            TurnState::Complete
        } else {
            TurnState::Active
        };

        Ok(TurnOutcome {
            reply,
            state,
            completion,
            history: turns,
        })
    }
}
