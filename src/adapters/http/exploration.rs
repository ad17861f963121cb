//! Joy exploration endpoints.

use axum::extract::{Json, State};
use serde::{Deserialize, Serialize};

use crate::domain::exploration::{EnergyLevel, ExplorationError, Recommendation};
use crate::prompts;

use super::dto::ApiError;
use super::middleware::RequireAuth;
use super::AppState;

/// Request for POST /api/exploration/recommend.
#[derive(Debug, Deserialize)]
pub struct ExplorationRequest {
    pub energy_level: i32,
}

/// Response for POST /api/exploration/recommend.
#[derive(Debug, Serialize)]
pub struct ExplorationResponse {
    pub energy_level: u8,
    pub recommendations: Vec<Recommendation>,
}

/// POST /api/exploration/recommend - suggest activities for the current
/// energy level, grounded in the caller's joy laws and recent cards.
///
/// Recommendations are transient; nothing is persisted.
pub async fn recommend(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<ExplorationRequest>,
) -> Result<Json<ExplorationResponse>, ApiError> {
    let energy = EnergyLevel::new(request.energy_level)
        .map_err(|error| ApiError::BadRequest(error.to_string()))?;

    let insights = state
        .insights
        .list_by_user(&user.id)
        .await
        .map_err(ApiError::internal)?;
    let patterns: Vec<_> = insights
        .into_iter()
        .filter(|insight| !insight.is_rejected)
        .collect();

    let recent_cards = state
        .cards
        .list_by_user(&user.id, 0, 5)
        .await
        .map_err(ApiError::internal)?;

    let recommendations = state
        .recommender
        .recommend(user.language, energy, &patterns, &recent_cards)
        .await
        .map_err(|error| match error {
            ExplorationError::InsufficientData { .. } => ApiError::BadRequest(
                prompts::exploration_insufficient_data(user.language).to_string(),
            ),
            ExplorationError::Generation(cause) => {
                tracing::error!(%cause, "exploration recommendation failed");
                ApiError::Generation(prompts::generation_failed(user.language).to_string())
            }
        })?;

    Ok(Json(ExplorationResponse {
        energy_level: energy.value(),
        recommendations,
    }))
}
