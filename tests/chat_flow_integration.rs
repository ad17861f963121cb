//! End-to-end tests for the chat flow: start a session, talk until a card
//! is produced, and exercise the session lifecycle guards.
//!
//! The router runs against in-memory repositories and a scripted mock
//! provider - no network, no database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use joyformula::adapters::ai::MockChatProvider;
use joyformula::adapters::http::{app_router, AppState};
use joyformula::adapters::memory::{
    InMemoryCardRepository, InMemoryInsightRepository, InMemorySessionRepository,
    InMemoryUserRepository,
};
use joyformula::config::AiConfig;

const COMPLETE_REPLY: &str = r#"wait, i think i found your joy formula here!

```json
{"stage":"complete","formula":{"scene":"Blue Bottle cafe","people":"just the two of us","event":"coffee catch-up with an old friend","trigger":"reconnecting","sensation":"completely relaxed"},"card_summary":"A relaxed coffee catch-up at Blue Bottle"}
```"#;

fn app_with(provider: MockChatProvider) -> Router {
    let state = AppState::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemorySessionRepository::new()),
        Arc::new(InMemoryCardRepository::new()),
        Arc::new(InMemoryInsightRepository::new()),
        Arc::new(provider),
        AiConfig::default(),
    );
    app_router(state)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("X-User-ID", user);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn two_turn_conversation_produces_a_card() {
    let app = app_with(
        MockChatProvider::new()
            .with_reply("omg that sounds so nice! what was the best part?")
            .with_reply(COMPLETE_REPLY),
    );

    let (status, started) = send(&app, "POST", "/api/chat/start", Some("alice"), None).await;
    assert_eq!(status, StatusCode::OK);
    let session_id = started["session_id"].as_str().unwrap().to_string();
    assert!(!started["initial_message"].as_str().unwrap().is_empty());

    // Turn 1: plain prose, no data block.
    let (status, turn1) = send(
        &app,
        "POST",
        "/api/chat/message",
        Some("alice"),
        Some(json!({
            "session_id": session_id,
            "message": "had a great coffee with a friend today"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(turn1["is_complete"], json!(false));
    assert!(turn1["card"].is_null());
    assert_eq!(turn1["session_status"], json!("active"));

    // Turn 2: reply carries the fenced complete block.
    let (status, turn2) = send(
        &app,
        "POST",
        "/api/chat/message",
        Some("alice"),
        Some(json!({
            "session_id": session_id,
            "message": "it was at Blue Bottle, just the two of us, felt so relaxed"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(turn2["is_complete"], json!(true));
    assert_eq!(turn2["session_status"], json!("completed"));
    assert_eq!(turn2["card"]["formula"]["scene"], json!("Blue Bottle cafe"));
    assert_eq!(
        turn2["card"]["card_summary"],
        json!("A relaxed coffee catch-up at Blue Bottle")
    );
    // The reply is returned verbatim, data block included.
    assert!(turn2["ai_response"].as_str().unwrap().contains("```json"));

    // The card is persisted and listed.
    let (status, cards) = send(&app, "GET", "/api/cards", Some("alice"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cards["total"], json!(1));
    assert_eq!(
        cards["cards"][0]["formula"]["sensation"],
        json!("completely relaxed")
    );

    // The session is terminal: a third turn is rejected.
    let (status, _) = send(
        &app,
        "POST",
        "/api/chat/message",
        Some("alice"),
        Some(json!({"session_id": session_id, "message": "one more thing"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn exit_keyword_abandons_without_calling_the_provider() {
    let provider = MockChatProvider::new().with_reply("should never be used");
    let app = app_with(provider.clone());

    let (_, started) = send(&app, "POST", "/api/chat/start", Some("alice"), None).await;
    let session_id = started["session_id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/api/chat/message",
        Some("alice"),
        Some(json!({"session_id": session_id, "message": "quit"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_status"], json!("abandoned"));
    assert_eq!(body["is_complete"], json!(false));

    // The provider was never invoked.
    assert!(provider.requests().is_empty());

    // Abandoned is terminal.
    let (status, _) = send(
        &app,
        "POST",
        "/api/chat/message",
        Some("alice"),
        Some(json!({"session_id": session_id, "message": "hello again"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn provider_failure_surfaces_as_generation_error() {
    let app = app_with(MockChatProvider::new().with_error(
        joyformula::ports::ProviderError::network("connection refused"),
    ));

    let (_, started) = send(&app, "POST", "/api/chat/start", Some("alice"), None).await;
    let session_id = started["session_id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/api/chat/message",
        Some("alice"),
        Some(json!({"session_id": session_id, "message": "hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], json!("GENERATION_FAILED"));
}

#[tokio::test]
async fn missing_user_header_is_unauthorized() {
    let app = app_with(MockChatProvider::new());
    let (status, body) = send(&app, "POST", "/api/chat/start", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], json!("UNAUTHORIZED"));
}

#[tokio::test]
async fn sessions_are_scoped_to_their_owner() {
    let app = app_with(MockChatProvider::new().with_reply("hey"));

    let (_, started) = send(&app, "POST", "/api/chat/start", Some("alice"), None).await;
    let session_id = started["session_id"].as_str().unwrap().to_string();

    // Bob cannot post into Alice's session.
    let (status, _) = send(
        &app,
        "POST",
        "/api/chat/message",
        Some("bob"),
        Some(json!({"session_id": session_id, "message": "hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_and_root_are_public() {
    let app = app_with(MockChatProvider::new());

    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));

    let (status, _) = send(&app, "GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
}
