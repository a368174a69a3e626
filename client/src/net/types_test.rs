use super::*;

#[test]
fn chat_request_uses_snake_case_fields() {
    let req = ChatRequest { chat_id: "c-1".into(), message: "hello".into() };
    assert_eq!(
        serde_json::to_value(&req).expect("serialize"),
        serde_json::json!({"chat_id": "c-1", "message": "hello"})
    );
}

#[test]
fn assistant_turn_parses_from_backend_shape() {
    let turn: ConversationTurn =
        serde_json::from_str(r#"{"id":"t-1","kind":"assistant_text","text":"hi there"}"#).expect("parse");
    assert_eq!(turn.id, TurnId::from("t-1"));
    assert_eq!(turn.payload, TurnPayload::AssistantText { text: "hi there".into() });
}

#[test]
fn api_error_body_shape() {
    let body: ApiErrorBody = serde_json::from_str(r#"{"error":"message is empty"}"#).expect("parse");
    assert_eq!(body.error, "message is empty");
}
