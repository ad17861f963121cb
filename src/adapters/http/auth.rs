//! Account endpoints.

use axum::extract::{Json, State};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Language;

use super::dto::{ApiError, UserView};
use super::middleware::RequireAuth;
use super::AppState;

/// GET /api/auth/me - current account info.
pub async fn me(RequireAuth(user): RequireAuth) -> Json<UserView> {
    Json(UserView::from(&user))
}

/// Request for PUT /api/auth/language.
#[derive(Debug, Deserialize)]
pub struct LanguageRequest {
    pub language: String,
}

/// Response for PUT /api/auth/language.
#[derive(Debug, Serialize)]
pub struct LanguageResponse {
    pub message: String,
    pub language: String,
}

/// PUT /api/auth/language - switch the account's interface language.
pub async fn set_language(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<LanguageRequest>,
) -> Result<Json<LanguageResponse>, ApiError> {
    let language: Language = request
        .language
        .parse()
        .map_err(|error: crate::domain::foundation::ValidationError| {
            ApiError::BadRequest(error.to_string())
        })?;

    state
        .users
        .set_language(&user.id, language)
        .await
        .map_err(ApiError::internal)?;

    Ok(Json(LanguageResponse {
        message: "language updated".to_string(),
        language: language.code().to_string(),
    }))
}
