//! Chat endpoints - the elicitation conversation.

use axum::extract::{Json, State};
use serde::{Deserialize, Serialize};

use crate::domain::card::JoyCard;
use crate::domain::chat::{ChatEngine, ConversationTurn};
use crate::domain::foundation::SessionId;
use crate::domain::session::ChatSession;
use crate::prompts;

use super::dto::{ApiError, CardView};
use super::middleware::RequireAuth;
use super::AppState;

/// Response for POST /api/chat/start.
#[derive(Debug, Serialize)]
pub struct ChatStartResponse {
    pub session_id: String,
    pub initial_message: String,
}

/// Request for POST /api/chat/message.
#[derive(Debug, Deserialize)]
pub struct ChatMessageRequest {
    pub session_id: String,
    pub message: String,
}

/// Response for POST /api/chat/message.
#[derive(Debug, Serialize)]
pub struct ChatMessageResponse {
    pub ai_response: String,
    pub is_complete: bool,
    pub card: Option<CardView>,
    pub session_status: String,
}

/// POST /api/chat/start - open a new card-creation conversation.
pub async fn start_chat(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<ChatStartResponse>, ApiError> {
    let mut session = ChatSession::card_creation(user.id);

    let initial_message = prompts::initial_message(user.language).to_string();
    session.set_turns(vec![ConversationTurn::assistant(initial_message.clone())]);

    state
        .sessions
        .create(&session)
        .await
        .map_err(ApiError::internal)?;

    Ok(Json(ChatStartResponse {
        session_id: session.id.to_string(),
        initial_message,
    }))
}

/// POST /api/chat/message - advance the conversation by one user turn.
///
/// Exit keywords abandon the session before any provider call. When the
/// coach's reply carries a completed formula, a joy card is persisted and
/// the session ends.
pub async fn send_message(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<ChatMessageRequest>,
) -> Result<Json<ChatMessageResponse>, ApiError> {
    let session_id: SessionId = request
        .session_id
        .parse()
        .map_err(|_| ApiError::BadRequest("invalid session id".to_string()))?;

    let mut session = state
        .sessions
        .find_by_id(&session_id)
        .await
        .map_err(ApiError::internal)?
        .filter(|session| session.user_id == user.id)
        .ok_or_else(|| ApiError::NotFound("session".to_string()))?;

    if !session.is_active() {
        return Err(ApiError::BadRequest("session already ended".to_string()));
    }

    // Exit short-circuits before the provider is ever invoked.
    if ChatEngine::is_exit_command(&request.message) {
        session.abandon().map_err(ApiError::internal)?;
        state
            .sessions
            .update(&session)
            .await
            .map_err(ApiError::internal)?;

        return Ok(Json(ChatMessageResponse {
            ai_response: prompts::conversation_ended(user.language).to_string(),
            is_complete: false,
            card: None,
            session_status: "abandoned".to_string(),
        }));
    }

    let outcome = state
        .engine
        .advance(user.language, &session.turns, &request.message)
        .await
        .map_err(|error| {
            tracing::error!(%error, "chat turn failed");
            ApiError::Generation(prompts::generation_failed(user.language).to_string())
        })?;

    session.set_turns(outcome.history);

    let mut card_view = None;
    if let Some(completed) = outcome.completion {
        let card = JoyCard::new(
            user.id,
            request.message.clone(),
            completed.formula,
            completed.summary,
            session.turns.clone(),
        );
        state
            .cards
            .create(&card)
            .await
            .map_err(ApiError::internal)?;
        session.complete(card.id).map_err(ApiError::internal)?;
        card_view = Some(CardView::from(&card));
    }

    state
        .sessions
        .update(&session)
        .await
        .map_err(ApiError::internal)?;

    let is_complete = card_view.is_some();
    Ok(Json(ChatMessageResponse {
        ai_response: outcome.reply,
        is_complete,
        card: card_view,
        session_status: if is_complete { "completed" } else { "active" }.to_string(),
    }))
}
