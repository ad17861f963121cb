//! Foundation value objects shared across the domain.

mod errors;
mod ids;
mod language;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{CardId, InsightId, SessionId, UserId};
pub use language::Language;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
