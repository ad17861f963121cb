//! Joy card endpoints.

use axum::extract::{Json, Path, Query, State};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::CardId;

use super::dto::{ApiError, CardView};
use super::middleware::RequireAuth;
use super::AppState;

/// Paging parameters for card listings.
#[derive(Debug, Deserialize)]
pub struct CardListParams {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    20
}

/// Response for GET /api/cards.
#[derive(Debug, Serialize)]
pub struct CardListResponse {
    pub cards: Vec<CardView>,
    pub total: i64,
}

/// GET /api/cards - list the caller's cards, newest first.
pub async fn list_cards(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<CardListParams>,
) -> Result<Json<CardListResponse>, ApiError> {
    let cards = state
        .cards
        .list_by_user(&user.id, params.skip, params.limit.clamp(0, 100))
        .await
        .map_err(ApiError::internal)?;

    let total = state
        .cards
        .count_by_user(&user.id)
        .await
        .map_err(ApiError::internal)?;

    Ok(Json(CardListResponse {
        cards: cards.iter().map(CardView::from).collect(),
        total,
    }))
}

/// GET /api/cards/:card_id - fetch one card.
pub async fn get_card(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(card_id): Path<String>,
) -> Result<Json<CardView>, ApiError> {
    let card_id: CardId = card_id
        .parse()
        .map_err(|_| ApiError::BadRequest("invalid card id".to_string()))?;

    let card = state
        .cards
        .find_by_id(&card_id, &user.id)
        .await
        .map_err(ApiError::internal)?
        .ok_or_else(|| ApiError::NotFound("card".to_string()))?;

    Ok(Json(CardView::from(&card)))
}

/// Response for DELETE /api/cards/:card_id.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// DELETE /api/cards/:card_id - delete one card.
pub async fn delete_card(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(card_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let card_id: CardId = card_id
        .parse()
        .map_err(|_| ApiError::BadRequest("invalid card id".to_string()))?;

    let deleted = state
        .cards
        .delete(&card_id, &user.id)
        .await
        .map_err(ApiError::internal)?;

    if !deleted {
        return Err(ApiError::NotFound("card".to_string()));
    }

    Ok(Json(DeleteResponse {
        message: "deleted".to_string(),
    }))
}
