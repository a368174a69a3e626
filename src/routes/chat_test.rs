use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::post;
use serde_json::{Value, json};
use tower::ServiceExt;

use super::*;
use crate::config::HostConfig;
use crate::routes::api_routes;

// =============================================================================
// Helpers
// =============================================================================

async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/chat")
}

fn state_with_backend(url: Option<String>) -> AppState {
    let mut config = HostConfig::from_lookup(|_| None).unwrap();
    config.chat_backend_url = url;
    AppState::new(config).unwrap()
}

async fn post_chat(state: AppState, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let res = api_routes(state).oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn echo(Json(req): Json<ChatRequest>) -> Json<Value> {
    Json(json!({
        "id": "t-1",
        "kind": "assistant_text",
        "text": format!("{}:{}", req.chat_id, req.message),
    }))
}

// =============================================================================
// normalize_request
// =============================================================================

#[test]
fn normalize_trims_message_and_chat_id() {
    let req = normalize_request(ChatRequest { chat_id: " c-1 ".into(), message: "  hi  ".into() }).unwrap();
    assert_eq!(req, ChatRequest { chat_id: "c-1".into(), message: "hi".into() });
}

#[test]
fn normalize_rejects_blank_message() {
    let err = normalize_request(ChatRequest { chat_id: "c-1".into(), message: " \n ".into() }).unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn upstream_turn_without_id_gets_one() {
    let turn: UpstreamTurn = serde_json::from_str(r#"{"kind":"assistant_text","text":"ok"}"#).unwrap();
    let turn = ConversationTurn::from(turn);
    assert!(uuid::Uuid::parse_str(turn.id.as_str()).is_ok());
    assert_eq!(turn.payload, TurnPayload::AssistantText { text: "ok".into() });
}

// =============================================================================
// POST /api/chat
// =============================================================================

#[tokio::test]
async fn empty_message_is_rejected_before_backend_lookup() {
    let (status, body) = post_chat(state_with_backend(None), json!({"chat_id": "c-1", "message": "   "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "message is empty");
}

#[tokio::test]
async fn missing_backend_is_service_unavailable() {
    let (status, body) = post_chat(state_with_backend(None), json!({"chat_id": "c-1", "message": "hello"})).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "chat backend not configured");
}

#[tokio::test]
async fn backend_turn_is_returned_with_forwarded_body() {
    let url = spawn_backend(Router::new().route("/chat", post(echo))).await;
    let (status, body) =
        post_chat(state_with_backend(Some(url)), json!({"chat_id": "c-1", "message": "  hello "})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": "t-1", "kind": "assistant_text", "text": "c-1:hello"}));
}

#[tokio::test]
async fn backend_turn_without_id_is_assigned_one() {
    let backend = Router::new().route(
        "/chat",
        post(|| async { Json(json!({"kind": "tool_result", "tool": "lookup", "content": {"rows": 2}})) }),
    );
    let url = spawn_backend(backend).await;
    let (status, body) = post_chat(state_with_backend(Some(url)), json!({"chat_id": "c-1", "message": "hi"})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(body["kind"], "tool_result");
    assert_eq!(body["content"]["rows"], 2);
}

#[tokio::test]
async fn backend_error_status_is_bad_gateway() {
    let backend = Router::new().route("/chat", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
    let url = spawn_backend(backend).await;
    let (status, body) = post_chat(state_with_backend(Some(url)), json!({"chat_id": "c-1", "message": "hi"})).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "chat backend error: status 500");
}

#[tokio::test]
async fn undecodable_backend_body_is_bad_gateway() {
    let backend = Router::new().route("/chat", post(|| async { "not json" }));
    let url = spawn_backend(backend).await;
    let (status, _) = post_chat(state_with_backend(Some(url)), json!({"chat_id": "c-1", "message": "hi"})).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn unreachable_backend_is_bad_gateway() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let (status, _) = post_chat(
        state_with_backend(Some(format!("http://{addr}/chat"))),
        json!({"chat_id": "c-1", "message": "hi"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}
