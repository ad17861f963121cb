//! Joy insight endpoints - mining and review.

use axum::extract::{Json, Path, State};
use serde::Serialize;

use crate::domain::foundation::InsightId;
use crate::domain::insight::{JoyInsight, MiningError};
use crate::prompts;

use super::dto::{ApiError, InsightView};
use super::middleware::RequireAuth;
use super::AppState;

/// Response for POST /api/insights/generate.
#[derive(Debug, Serialize)]
pub struct GenerateInsightsResponse {
    pub insights: Vec<InsightView>,
    pub message: String,
}

/// POST /api/insights/generate - mine patterns over all the caller's cards.
pub async fn generate_insights(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<GenerateInsightsResponse>, ApiError> {
    let cards = state
        .cards
        .list_all_by_user(&user.id)
        .await
        .map_err(ApiError::internal)?;

    let mined = state
        .miner
        .mine(user.language, &cards)
        .await
        .map_err(|error| match error {
            MiningError::InsufficientData { have, need } => {
                ApiError::BadRequest(prompts::need_more_cards(user.language, have, need))
            }
            MiningError::Generation(cause) => {
                tracing::error!(%cause, "insight mining failed");
                ApiError::Generation(prompts::generation_failed(user.language).to_string())
            }
        })?;

    let mut created = Vec::with_capacity(mined.len());
    for payload in mined {
        let insight = JoyInsight::from_mined(user.id, payload);
        state
            .insights
            .create(&insight)
            .await
            .map_err(ApiError::internal)?;
        created.push(insight);
    }

    let message = format!("generated {} joy laws", created.len());
    Ok(Json(GenerateInsightsResponse {
        insights: created.iter().map(InsightView::from).collect(),
        message,
    }))
}

/// GET /api/insights - list the caller's insights, newest first.
pub async fn list_insights(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<InsightView>>, ApiError> {
    let insights = state
        .insights
        .list_by_user(&user.id)
        .await
        .map_err(ApiError::internal)?;

    Ok(Json(insights.iter().map(InsightView::from).collect()))
}

/// Response for confirm/reject operations.
#[derive(Debug, Serialize)]
pub struct FlagResponse {
    pub message: String,
}

/// PUT /api/insights/:insight_id/confirm - confirm an insight.
pub async fn confirm_insight(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(insight_id): Path<String>,
) -> Result<Json<FlagResponse>, ApiError> {
    let mut insight = load_insight(&state, &user.id, &insight_id).await?;
    insight.confirm();
    state
        .insights
        .update(&insight)
        .await
        .map_err(ApiError::internal)?;

    Ok(Json(FlagResponse {
        message: "confirmed".to_string(),
    }))
}

/// PUT /api/insights/:insight_id/reject - reject an insight.
pub async fn reject_insight(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(insight_id): Path<String>,
) -> Result<Json<FlagResponse>, ApiError> {
    let mut insight = load_insight(&state, &user.id, &insight_id).await?;
    insight.reject();
    state
        .insights
        .update(&insight)
        .await
        .map_err(ApiError::internal)?;

    Ok(Json(FlagResponse {
        message: "rejected".to_string(),
    }))
}

async fn load_insight(
    state: &AppState,
    user_id: &crate::domain::foundation::UserId,
    insight_id: &str,
) -> Result<JoyInsight, ApiError> {
    let insight_id: InsightId = insight_id
        .parse()
        .map_err(|_| ApiError::BadRequest("invalid insight id".to_string()))?;

    state
        .insights
        .find_by_id(&insight_id, user_id)
        .await
        .map_err(ApiError::internal)?
        .ok_or_else(|| ApiError::NotFound("insight".to_string()))
}
