use std::cell::Cell;

use futures::executor::block_on;

use super::*;
use crate::state::conversation::{ConversationState, ConversationTurn, TurnId, TurnPayload, TurnSink};
use crate::state::session::SessionUser;
use crate::state::submission::{BackendError, ChatBackend};

struct FakeUrl {
    path: RefCell<String>,
    writes: RefCell<Vec<String>>,
}

impl FakeUrl {
    fn at(path: &str) -> Self {
        Self { path: RefCell::new(path.to_owned()), writes: RefCell::new(Vec::new()) }
    }
}

impl UrlSurface for FakeUrl {
    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn replace_path(&self, path: &str) {
        *self.path.borrow_mut() = path.to_owned();
        self.writes.borrow_mut().push(path.to_owned());
    }
}

#[derive(Default)]
struct CountingRefresher {
    count: Cell<u32>,
}

impl PageRefresher for CountingRefresher {
    fn refresh(&self) {
        self.count.set(self.count.get() + 1);
    }
}

struct FailingStore;

impl IdentityStore for FailingStore {
    fn save(&self, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Write("quota exceeded".to_owned()))
    }
}

fn signed_in() -> Session {
    Session::authenticated(SessionUser { id: "u1".to_owned(), name: "Ann".to_owned() })
}

fn assistant(id: &str) -> ConversationTurn {
    ConversationTurn { id: TurnId::from(id), payload: TurnPayload::AssistantText { text: "ok".to_owned() } }
}

// =============================================================
// Identity resolution and persistence
// =============================================================

#[test]
fn mount_uses_supplied_identity_and_persists_it() {
    let store = MemoryIdentityStore::default();
    store.save("older").unwrap();
    let lifecycle = ConversationLifecycle::mount(Some(ConversationId::from("route-id")), &store, 0);
    assert_eq!(lifecycle.identity(), &ConversationId::from("route-id"));
    assert_eq!(store.stored().as_deref(), Some("route-id"));
    assert!(lifecycle.is_persisted());
}

#[test]
fn new_chat_mount_never_adopts_stored_identity() {
    let store = MemoryIdentityStore::default();
    store.save("old-conv").unwrap();
    let mut lifecycle = ConversationLifecycle::mount(None, &store, 0);
    assert_ne!(lifecycle.identity().as_str(), "old-conv");
    assert_eq!(store.stored().as_deref(), Some(lifecycle.identity().as_str()));

    let url = FakeUrl::at("/");
    let refresher = CountingRefresher::default();
    lifecycle.sync(1, &signed_in(), &url, &refresher);
    assert_eq!(*url.writes.borrow(), vec![lifecycle.identity().chat_path()]);
    assert_ne!(url.writes.borrow()[0], "/chat/old-conv");
}

#[test]
fn consecutive_new_chat_mounts_get_distinct_identities() {
    let store = MemoryIdentityStore::default();
    let first = ConversationLifecycle::mount(None, &store, 0);
    let second = ConversationLifecycle::mount(None, &store, 0);
    assert_ne!(first.identity(), second.identity());
    assert_eq!(store.stored().as_deref(), Some(second.identity().as_str()));
}

#[test]
fn persist_failure_keeps_in_memory_identity() {
    let mut lifecycle = ConversationLifecycle::mount(Some(ConversationId::from("c1")), &FailingStore, 0);
    assert!(!lifecycle.is_persisted());
    assert_eq!(lifecycle.identity().as_str(), "c1");

    let url = FakeUrl::at("/");
    let refresher = CountingRefresher::default();
    let effects = lifecycle.sync(2, &signed_in(), &url, &refresher);
    assert!(effects.refreshed);
    assert_eq!(lifecycle.identity().as_str(), "c1");
}

#[test]
fn every_mount_overwrites_the_stored_identity() {
    let store = MemoryIdentityStore::default();
    let mut lifecycle = ConversationLifecycle::mount(Some(ConversationId::from("c1")), &store, 0);
    store.save("other-tab").expect("memory store write");
    lifecycle.persist(&store);
    assert!(lifecycle.is_persisted());
    assert_eq!(store.stored().as_deref(), Some("c1"));

    ConversationLifecycle::mount(Some(ConversationId::from("c1")), &store, 0);
    assert_eq!(store.stored().as_deref(), Some("c1"));
}

// =============================================================
// URL rewrite on first turn
// =============================================================

#[test]
fn first_turn_rewrites_url_for_authenticated_session() {
    let store = MemoryIdentityStore::default();
    let mut lifecycle = ConversationLifecycle::mount(Some(ConversationId::from("c1")), &store, 0);
    let url = FakeUrl::at("/");
    let refresher = CountingRefresher::default();

    let effects = lifecycle.sync(1, &signed_in(), &url, &refresher);

    assert_eq!(effects.rewrote_url.as_deref(), Some("/chat/c1"));
    assert_eq!(*url.writes.borrow(), vec!["/chat/c1".to_owned()]);
    assert_eq!(refresher.count.get(), 0);
}

#[test]
fn first_turn_skips_rewrite_for_anonymous_session() {
    let store = MemoryIdentityStore::default();
    let mut lifecycle = ConversationLifecycle::mount(Some(ConversationId::from("c1")), &store, 0);
    let url = FakeUrl::at("/");
    let refresher = CountingRefresher::default();

    let effects = lifecycle.sync(1, &Session::anonymous(), &url, &refresher);

    assert_eq!(effects.rewrote_url, None);
    assert!(url.writes.borrow().is_empty());
}

#[test]
fn first_turn_skips_rewrite_when_path_already_has_chat() {
    let store = MemoryIdentityStore::default();
    let mut lifecycle = ConversationLifecycle::mount(Some(ConversationId::from("c1")), &store, 0);
    let url = FakeUrl::at("/chat/c1");
    let refresher = CountingRefresher::default();

    lifecycle.sync(1, &signed_in(), &url, &refresher);

    assert!(url.writes.borrow().is_empty());
}

#[test]
fn url_rewrite_happens_once() {
    let store = MemoryIdentityStore::default();
    let mut lifecycle = ConversationLifecycle::mount(Some(ConversationId::from("c1")), &store, 0);
    let url = FakeUrl::at("/");
    let refresher = CountingRefresher::default();

    lifecycle.sync(1, &signed_in(), &url, &refresher);
    *url.path.borrow_mut() = "/".to_owned();
    lifecycle.sync(1, &signed_in(), &url, &refresher);
    lifecycle.sync(3, &signed_in(), &url, &refresher);

    assert_eq!(url.writes.borrow().len(), 1);
}

#[test]
fn path_reflects_conversation_matches_chat_segment_only() {
    assert!(path_reflects_conversation("/chat/abc"));
    assert!(!path_reflects_conversation("/"));
    assert!(!path_reflects_conversation("/chatter"));
}

// =============================================================
// Refresh edge
// =============================================================

#[test]
fn refresh_fires_once_when_length_reaches_two() {
    let store = MemoryIdentityStore::default();
    let mut lifecycle = ConversationLifecycle::mount(None, &store, 0);
    let url = FakeUrl::at("/");
    let refresher = CountingRefresher::default();

    for len in [0, 1, 2, 2, 3, 4] {
        lifecycle.sync(len, &Session::anonymous(), &url, &refresher);
    }

    assert_eq!(refresher.count.get(), 1);
}

#[test]
fn refresh_fires_once_when_length_jumps_past_two() {
    let store = MemoryIdentityStore::default();
    let mut lifecycle = ConversationLifecycle::mount(None, &store, 0);
    let url = FakeUrl::at("/");
    let refresher = CountingRefresher::default();

    let effects = lifecycle.sync(3, &Session::anonymous(), &url, &refresher);
    lifecycle.sync(5, &Session::anonymous(), &url, &refresher);

    assert!(effects.refreshed);
    assert_eq!(refresher.count.get(), 1);
}

#[test]
fn batched_confirmations_on_fresh_conversation_refresh_once() {
    let store = MemoryIdentityStore::default();
    let mut lifecycle = ConversationLifecycle::mount(None, &store, 0);
    let url = FakeUrl::at("/");
    let refresher = CountingRefresher::default();
    let mut state = ConversationState::default();

    state.append_confirmed(assistant("a"));
    state.append_confirmed(assistant("b"));
    lifecycle.sync(state.len(), &Session::anonymous(), &url, &refresher);
    lifecycle.sync(state.len(), &Session::anonymous(), &url, &refresher);

    assert_eq!(refresher.count.get(), 1);
}

#[test]
fn mounting_existing_history_never_refreshes() {
    let store = MemoryIdentityStore::default();
    let mut lifecycle = ConversationLifecycle::mount(Some(ConversationId::from("c1")), &store, 4);
    let url = FakeUrl::at("/chat/c1");
    let refresher = CountingRefresher::default();

    lifecycle.sync(5, &signed_in(), &url, &refresher);

    assert_eq!(refresher.count.get(), 0);
}

// =============================================================
// End-to-end with the submission pipeline
// =============================================================

struct InstantBackend;

impl ChatBackend for InstantBackend {
    fn submit_user_message(
        &self,
        _conversation: &ConversationId,
        _text: &str,
    ) -> impl std::future::Future<Output = Result<ConversationTurn, BackendError>> {
        async { Ok(assistant("T1")) }
    }
}

#[test]
fn hello_exchange_fires_refresh_exactly_once() {
    let store = MemoryIdentityStore::default();
    let mut lifecycle = ConversationLifecycle::mount(None, &store, 0);
    let url = FakeUrl::at("/");
    let refresher = CountingRefresher::default();
    let sink = std::rc::Rc::new(RefCell::new(ConversationState::default()));

    let local = sink.append_local(TurnPayload::UserText { text: "hello".to_owned() });
    lifecycle.sync(sink.borrow().len(), &signed_in(), &url, &refresher);
    assert_eq!(sink.borrow().len(), 1);
    assert_eq!(refresher.count.get(), 0);

    let turn = block_on(InstantBackend.submit_user_message(lifecycle.identity(), "hello")).expect("backend ok");
    sink.confirm(&local.id, turn);
    lifecycle.sync(sink.borrow().len(), &signed_in(), &url, &refresher);

    let ids: Vec<String> = sink.borrow().turns().iter().map(|t| t.id.to_string()).collect();
    assert_eq!(ids, vec![local.id.to_string(), "T1".to_owned()]);
    assert_eq!(refresher.count.get(), 1);
    assert_eq!(url.writes.borrow().len(), 1);
}
