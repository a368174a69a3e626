use super::*;

fn user(text: &str) -> TurnPayload {
    TurnPayload::UserText { text: text.to_owned() }
}

fn position(state: &ConversationState, id: &TurnId) -> Option<usize> {
    state.turns().iter().position(|turn| &turn.id == id)
}

fn assistant_turn(id: &str, text: &str) -> ConversationTurn {
    ConversationTurn {
        id: TurnId::from(id),
        payload: TurnPayload::AssistantText { text: text.to_owned() },
    }
}

// =============================================================
// Local appends
// =============================================================

#[test]
fn default_state_is_empty() {
    let state = ConversationState::default();
    assert!(state.is_empty());
    assert_eq!(state.len(), 0);
    assert_eq!(state.pending_count(), 0);
}

#[test]
fn append_local_grows_by_one_per_call_with_unique_ids() {
    let mut state = ConversationState::default();
    let mut seen = HashSet::new();
    for i in 0..50 {
        let turn = state.append_local(user(&format!("msg {i}")));
        assert!(seen.insert(turn.id.clone()), "duplicate id {}", turn.id);
        assert_eq!(state.len(), i + 1);
    }
    assert_eq!(seen.len(), 50);
}

#[test]
fn append_local_preserves_submission_order() {
    let mut state = ConversationState::default();
    let first = state.append_local(user("one"));
    let second = state.append_local(user("two"));
    assert_eq!(position(&state, &first.id), Some(0));
    assert_eq!(position(&state, &second.id), Some(1));
}

#[test]
fn append_local_tracks_turn_as_pending() {
    let mut state = ConversationState::default();
    let turn = state.append_local(user("hello"));
    assert_eq!(state.delivery(&turn.id), Some(DeliveryStatus::Pending));
    assert_eq!(state.pending_count(), 1);
}

// =============================================================
// Confirmed appends
// =============================================================

#[test]
fn append_confirmed_without_local_match_appends_at_end() {
    let mut state = ConversationState::default();
    state.append_local(user("hello"));
    assert!(state.append_confirmed(assistant_turn("srv-1", "unsolicited")));
    assert_eq!(state.len(), 2);
    assert_eq!(state.turns()[1].id, TurnId::from("srv-1"));
    assert_eq!(state.delivery(&TurnId::from("srv-1")), None);
}

#[test]
fn append_confirmed_is_idempotent_by_id() {
    let mut state = ConversationState::default();
    assert!(state.append_confirmed(assistant_turn("t1", "first")));
    assert!(!state.append_confirmed(assistant_turn("t1", "replayed")));
    assert_eq!(state.len(), 1);
    assert_eq!(
        state.turns()[0].payload,
        TurnPayload::AssistantText { text: "first".to_owned() }
    );
}

#[test]
fn mark_confirmed_and_failed_only_touch_status() {
    let mut state = ConversationState::default();
    let a = state.append_local(user("a"));
    let b = state.append_local(user("b"));
    state.mark_confirmed(&a.id);
    state.mark_failed(&b.id);
    assert_eq!(state.delivery(&a.id), Some(DeliveryStatus::Confirmed));
    assert_eq!(state.delivery(&b.id), Some(DeliveryStatus::Failed));
    assert_eq!(state.len(), 2);
    assert_eq!(position(&state, &b.id), Some(1));
}

#[test]
fn mark_status_for_unknown_id_is_ignored() {
    let mut state = ConversationState::default();
    state.mark_failed(&TurnId::from("missing"));
    assert_eq!(state.delivery(&TurnId::from("missing")), None);
}

#[test]
fn pending_count_drops_as_submissions_resolve() {
    let mut state = ConversationState::default();
    let a = state.append_local(user("a"));
    let b = state.append_local(user("b"));
    state.append_confirmed(assistant_turn("srv", "unsolicited"));
    assert_eq!(state.pending_count(), 2);

    state.mark_confirmed(&a.id);
    assert_eq!(state.pending_count(), 1);
    state.mark_failed(&b.id);
    assert_eq!(state.pending_count(), 0);
}

// =============================================================
// Wire shape
// =============================================================

#[test]
fn confirmed_turn_deserializes_from_flat_tagged_json() {
    let turn: ConversationTurn = serde_json::from_value(serde_json::json!({
        "id": "t9",
        "kind": "assistant_text",
        "text": "Hi there"
    }))
    .expect("turn should parse");
    assert_eq!(turn.id, TurnId::from("t9"));
    assert_eq!(turn.payload, TurnPayload::AssistantText { text: "Hi there".to_owned() });
}

#[test]
fn tool_result_turn_keeps_structured_content() {
    let turn: ConversationTurn = serde_json::from_value(serde_json::json!({
        "id": "t10",
        "kind": "tool_result",
        "tool": "stock_price",
        "content": { "symbol": "ACME", "price": 12.5 }
    }))
    .expect("tool turn should parse");
    match turn.payload {
        TurnPayload::ToolResult { tool, content } => {
            assert_eq!(tool, "stock_price");
            assert_eq!(content["symbol"], "ACME");
        }
        other => panic!("unexpected payload {other:?}"),
    }
}

// =============================================================
// Shared sink
// =============================================================

#[test]
fn shared_sink_confirm_appends_and_marks_local_turn() {
    let sink = Rc::new(RefCell::new(ConversationState::default()));
    let local = sink.append_local(user("hello"));
    sink.confirm(&local.id, assistant_turn("t1", "hi"));
    let state = sink.borrow();
    assert_eq!(state.len(), 2);
    assert_eq!(state.delivery(&local.id), Some(DeliveryStatus::Confirmed));
}
