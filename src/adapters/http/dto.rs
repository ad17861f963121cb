//! Shared DTOs and API error handling for the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::card::{Formula, JoyCard};
use crate::domain::insight::{CardEvidence, JoyInsight};
use crate::domain::user::User;

/// Error payload returned by every failing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

/// API error type that converts failures to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized,
    NotFound(String),
    /// Provider call failed; message is already user-facing.
    Generation(String),
    Internal(String),
}

impl ApiError {
    /// Wraps an infrastructure failure, logging the detail and returning a
    /// generic message to the client.
    pub fn internal(error: impl std::fmt::Display) -> Self {
        tracing::error!(%error, "internal error");
        Self::Internal("internal error".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", message),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "missing or invalid X-User-ID header".to_string(),
            ),
            ApiError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{} not found", resource),
            ),
            ApiError::Generation(message) => {
                (StatusCode::BAD_GATEWAY, "GENERATION_FAILED", message)
            }
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: message,
                code,
            }),
        )
            .into_response()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Views
// ════════════════════════════════════════════════════════════════════════════

/// User account view.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: String,
    pub user_identifier: String,
    pub display_name: Option<String>,
    pub language: String,
    pub created_at: String,
    pub last_active: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            user_identifier: user.user_identifier.clone(),
            display_name: user.display_name.clone(),
            language: user.language.code().to_string(),
            created_at: user.created_at.as_datetime().to_rfc3339(),
            last_active: user.last_active.as_datetime().to_rfc3339(),
        }
    }
}

/// Joy card view.
#[derive(Debug, Serialize)]
pub struct CardView {
    pub id: String,
    pub raw_input: String,
    pub formula: Formula,
    pub card_summary: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&JoyCard> for CardView {
    fn from(card: &JoyCard) -> Self {
        Self {
            id: card.id.to_string(),
            raw_input: card.raw_input.clone(),
            formula: card.formula.clone(),
            card_summary: card.card_summary.clone(),
            created_at: card.created_at.as_datetime().to_rfc3339(),
            updated_at: card.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Joy insight view.
#[derive(Debug, Serialize)]
pub struct InsightView {
    pub id: String,
    pub insight_text: String,
    pub statement: Option<String>,
    pub keywords: Vec<String>,
    pub evidence: Vec<CardEvidence>,
    pub pattern_type: Option<String>,
    pub is_confirmed: bool,
    pub is_rejected: bool,
    pub created_at: String,
}

impl From<&JoyInsight> for InsightView {
    fn from(insight: &JoyInsight) -> Self {
        Self {
            id: insight.id.to_string(),
            insight_text: insight.insight_text.clone(),
            statement: insight.statement.clone(),
            keywords: insight.keywords.clone(),
            evidence: insight.evidence.clone(),
            pattern_type: insight.pattern_type.clone(),
            is_confirmed: insight.is_confirmed,
            is_rejected: insight.is_rejected,
            created_at: insight.created_at.as_datetime().to_rfc3339(),
        }
    }
}
