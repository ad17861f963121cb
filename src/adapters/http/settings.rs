//! Operator settings endpoints.

use axum::extract::{Json, State};
use serde::{Deserialize, Serialize};

use crate::adapters::ai::build_provider;
use crate::config::ProviderKind;

use super::dto::ApiError;
use super::middleware::RequireAuth;
use super::AppState;

/// Request for PUT /api/settings/provider.
#[derive(Debug, Deserialize)]
pub struct ProviderRequest {
    pub provider: String,
}

/// Response for PUT /api/settings/provider.
#[derive(Debug, Serialize)]
pub struct ProviderResponse {
    pub message: String,
    pub provider: String,
    pub model: String,
}

/// PUT /api/settings/provider - switch the active text-generation backend.
///
/// Reconstructs the adapter from configured credentials and swaps the
/// shared handle; in-flight requests finish on the adapter they resolved.
pub async fn set_provider(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(request): Json<ProviderRequest>,
) -> Result<Json<ProviderResponse>, ApiError> {
    let kind: ProviderKind = request
        .provider
        .parse()
        .map_err(|error: crate::config::ValidationError| ApiError::BadRequest(error.to_string()))?;

    let provider = build_provider(kind, &state.ai_config)
        .map_err(|error| ApiError::BadRequest(error.to_string()))?;

    state.provider.swap(provider);
    let info = state.provider.info();
    tracing::info!(provider = %info.name, model = %info.model, "switched AI provider");

    Ok(Json(ProviderResponse {
        message: format!("switched to {}", info.name),
        provider: info.name,
        model: info.model,
    }))
}
