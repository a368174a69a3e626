//! Conversation turn queue with optimistic (local) and confirmed appends.
//!
//! DESIGN
//! ======
//! The queue is append-only. Local user turns land synchronously with a fresh
//! UUID so the prompt appears before the backend answers; confirmed turns
//! arrive later in completion order. Identity is the only deduplication key:
//! inserting a turn whose id is already present is a no-op.
//!
//! Delivery status is display metadata kept beside the turns. It never
//! removes or reorders anything, so a failed submission stays visible.

#[cfg(test)]
#[path = "conversation_test.rs"]
mod conversation_test;

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Opaque, never-reused identifier of one conversation turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnId(String);

impl TurnId {
    /// Generate a fresh client-side identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TurnId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for TurnId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display payload of a turn, tagged by who produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnPayload {
    /// Text typed by the local user.
    UserText { text: String },
    /// Markdown text produced by the assistant.
    AssistantText { text: String },
    /// Structured result of an assistant tool invocation.
    ToolResult {
        tool: String,
        #[serde(default)]
        content: serde_json::Value,
    },
}

/// One display-ready entry in the conversation feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub id: TurnId,
    #[serde(flatten)]
    pub payload: TurnPayload,
}

impl ConversationTurn {
    /// Build a local turn with a freshly generated id.
    #[must_use]
    pub fn new_local(payload: TurnPayload) -> Self {
        Self { id: TurnId::generate(), payload }
    }
}

/// Delivery state of a locally authored turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// Appended locally; the backend has not answered yet.
    #[default]
    Pending,
    /// The backend answered for this submission.
    Confirmed,
    /// The backend call failed. The turn stays in place.
    Failed,
}

/// Ordered, append-only conversation feed.
#[derive(Clone, Debug, Default)]
pub struct ConversationState {
    turns: Vec<ConversationTurn>,
    ids: HashSet<TurnId>,
    delivery: HashMap<TurnId, DeliveryStatus>,
}

impl ConversationState {
    /// Create a local turn for `payload` and append it.
    pub fn append_local(&mut self, payload: TurnPayload) -> ConversationTurn {
        let turn = ConversationTurn::new_local(payload);
        self.push_local(turn.clone());
        turn
    }

    /// Append an already-built local turn and track it as pending.
    ///
    /// Returns `false` if a turn with the same id is already present.
    pub fn push_local(&mut self, turn: ConversationTurn) -> bool {
        let id = turn.id.clone();
        if !self.push(turn) {
            return false;
        }
        self.delivery.insert(id, DeliveryStatus::Pending);
        true
    }

    /// Append a server-confirmed turn, keeping its id.
    ///
    /// A confirmed turn without a matching local entry is valid. Returns
    /// `false` when the id is already present (idempotent insert).
    pub fn append_confirmed(&mut self, turn: ConversationTurn) -> bool {
        self.push(turn)
    }

    fn push(&mut self, turn: ConversationTurn) -> bool {
        if !self.ids.insert(turn.id.clone()) {
            return false;
        }
        self.turns.push(turn);
        true
    }

    /// Record that the backend answered the submission that produced `id`.
    pub fn mark_confirmed(&mut self, id: &TurnId) {
        if let Some(status) = self.delivery.get_mut(id) {
            *status = DeliveryStatus::Confirmed;
        }
    }

    /// Record that the submission that produced `id` failed.
    pub fn mark_failed(&mut self, id: &TurnId) {
        if let Some(status) = self.delivery.get_mut(id) {
            *status = DeliveryStatus::Failed;
        }
    }

    /// Delivery status for a local turn; `None` for confirmed/server turns.
    #[must_use]
    pub fn delivery(&self, id: &TurnId) -> Option<DeliveryStatus> {
        self.delivery.get(id).copied()
    }

    #[must_use]
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of local turns still waiting for the backend.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.delivery
            .values()
            .filter(|status| **status == DeliveryStatus::Pending)
            .count()
    }
}

/// Something the submission pipeline can append turns into.
///
/// Implemented for the Leptos signal used by the chat page and for a shared
/// `RefCell` used outside a reactive owner.
pub trait TurnSink {
    /// Append a local turn built from `payload` and return it.
    fn append_local(&self, payload: TurnPayload) -> ConversationTurn;
    /// Append a confirmed turn and mark the local turn `local_id` confirmed.
    fn confirm(&self, local_id: &TurnId, turn: ConversationTurn);
    /// Mark the local turn `local_id` as failed.
    fn fail(&self, local_id: &TurnId);
}

impl TurnSink for Rc<RefCell<ConversationState>> {
    fn append_local(&self, payload: TurnPayload) -> ConversationTurn {
        self.borrow_mut().append_local(payload)
    }

    fn confirm(&self, local_id: &TurnId, turn: ConversationTurn) {
        let mut state = self.borrow_mut();
        state.append_confirmed(turn);
        state.mark_confirmed(local_id);
    }

    fn fail(&self, local_id: &TurnId) {
        self.borrow_mut().mark_failed(local_id);
    }
}

impl TurnSink for leptos::prelude::RwSignal<ConversationState> {
    fn append_local(&self, payload: TurnPayload) -> ConversationTurn {
        use leptos::prelude::Update;

        let turn = ConversationTurn::new_local(payload);
        let local = turn.clone();
        self.update(move |state| {
            state.push_local(local);
        });
        turn
    }

    fn confirm(&self, local_id: &TurnId, turn: ConversationTurn) {
        use leptos::prelude::Update;

        self.update(|state| {
            state.append_confirmed(turn);
            state.mark_confirmed(local_id);
        });
    }

    fn fail(&self, local_id: &TurnId) {
        use leptos::prelude::Update;

        self.update(|state| state.mark_failed(local_id));
    }
}
