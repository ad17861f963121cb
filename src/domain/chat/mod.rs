//! Conversational elicitation of joy formulas.

pub mod extraction;

mod engine;
mod turn;

pub use engine::{ChatEngine, ChatError, TurnOutcome, TurnState};
pub use extraction::CompletedFormula;
pub use turn::{ConversationTurn, TurnRole};
