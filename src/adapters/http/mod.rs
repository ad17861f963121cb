//! HTTP adapter - the REST API surface.
//!
//! Routes mirror the product surface: chat (elicitation), cards, insights,
//! exploration, account, and operator settings. All `/api` routes sit
//! behind the identifier-header auth middleware.

pub mod middleware;

mod auth;
mod cards;
mod chat;
mod dto;
mod exploration;
mod insights;
mod settings;

pub use dto::{ApiError, CardView, ErrorResponse, InsightView, UserView};
pub use middleware::{CurrentUser, RequireAuth, USER_ID_HEADER};

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::{middleware::from_fn_with_state, Json, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::AiConfig;
use crate::domain::chat::ChatEngine;
use crate::domain::exploration::Recommender;
use crate::domain::insight::InsightMiner;
use crate::ports::{
    CardRepository, ChatProvider, InsightRepository, ProviderHandle, SessionRepository,
    UserRepository,
};

/// Shared application state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub cards: Arc<dyn CardRepository>,
    pub insights: Arc<dyn InsightRepository>,
    pub provider: Arc<ProviderHandle>,
    pub ai_config: Arc<AiConfig>,
    pub engine: Arc<ChatEngine>,
    pub miner: Arc<InsightMiner>,
    pub recommender: Arc<Recommender>,
}

impl AppState {
    /// Wires the state from repositories, an initial provider, and the AI
    /// credential configuration (kept for runtime provider switches).
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        cards: Arc<dyn CardRepository>,
        insights: Arc<dyn InsightRepository>,
        initial_provider: Arc<dyn ChatProvider>,
        ai_config: AiConfig,
    ) -> Self {
        let provider = Arc::new(ProviderHandle::new(initial_provider));
        Self {
            users,
            sessions,
            cards,
            insights,
            engine: Arc::new(ChatEngine::new(provider.clone())),
            miner: Arc::new(InsightMiner::new(provider.clone())),
            recommender: Arc::new(Recommender::new(provider.clone())),
            provider,
            ai_config: Arc::new(ai_config),
        }
    }
}

/// Builds the full application router.
pub fn app_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/auth/language", put(auth::set_language))
        .route("/chat/start", post(chat::start_chat))
        .route("/chat/message", post(chat::send_message))
        .route("/cards", get(cards::list_cards))
        .route(
            "/cards/:card_id",
            get(cards::get_card).delete(cards::delete_card),
        )
        .route("/insights/generate", post(insights::generate_insights))
        .route("/insights", get(insights::list_insights))
        .route("/insights/:insight_id/confirm", put(insights::confirm_insight))
        .route("/insights/:insight_id/reject", put(insights::reject_insight))
        .route("/exploration/recommend", post(exploration::recommend))
        .route("/settings/provider", put(settings::set_provider))
        .layer(from_fn_with_state(
            state.users.clone(),
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// GET / - service banner.
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to JoyFormula API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /health - liveness check.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}
