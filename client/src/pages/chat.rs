//! Chat page: owns every controller and wires them to the views.
//!
//! ARCHITECTURE
//! ============
//! State sits above the views so switching views never loses it:
//! - `conversation` is the optimistic turn queue,
//! - `lifecycle` resolves/persists the identity and fires the URL rewrite
//!   and page-data refresh,
//! - `anchor` is the bottom-pinning model for the chat feed,
//! - `views` decides which of chat / dashboard / education is mounted,
//! - `notices` + `notifier` turn missing configuration keys into toasts,
//! - `call` is the microphone handshake.
//!
//! Effects are keyed on the smallest inputs: the turn count and session for
//! the lifecycle, the missing-key list for the notifier.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::chat_panel::ChatPanel;
use crate::components::dashboard_embed::DashboardEmbed;
use crate::components::education::EducationView;
use crate::components::header_menu::HeaderMenu;
use crate::components::toast_stack::{ToastStack, schedule_dismiss};
use crate::net::api::{HttpChatBackend, fetch_dashboard_report, fetch_missing_keys, fetch_session};
use crate::state::call::{CallHandshake, start_call};
use crate::state::conversation::ConversationState;
use crate::state::lifecycle::{ConversationId, ConversationLifecycle, IDENTITY_STORAGE_KEY};
use crate::state::notices::{MissingConfigNotifier, NoticeCenter, NoticeLevel};
use crate::state::scroll_anchor::ScrollAnchor;
use crate::state::session::Session;
use crate::state::submission::{normalize_input, submit_user_message};
use crate::state::view::{ViewMode, ViewSelector};
use crate::util::media::{BrowserCapture, BrowserMedia};
use crate::util::navigation::{BrowserUrl, SignalRefresher};

#[cfg(feature = "hydrate")]
fn identity_store() -> crate::util::ui_persistence::LocalStorageIdentityStore {
    crate::util::ui_persistence::LocalStorageIdentityStore::new(IDENTITY_STORAGE_KEY)
}

#[cfg(not(feature = "hydrate"))]
fn identity_store() -> crate::state::lifecycle::MemoryIdentityStore {
    let _ = IDENTITY_STORAGE_KEY;
    crate::state::lifecycle::MemoryIdentityStore::default()
}

/// Session shown while `/api/auth/me` is in flight.
pub(crate) fn pending_session() -> Session {
    Session { user: None, loading: true }
}

/// Tell the user when the conversation only lives in memory.
pub(crate) fn announce_ephemeral_identity(persisted: bool, center: &mut NoticeCenter) -> Option<u64> {
    (!persisted).then(|| center.push(NoticeLevel::Info, "This conversation will not be restored after a reload."))
}

/// Route id, ignoring an empty segment.
pub(crate) fn route_conversation_id(raw: Option<String>) -> Option<ConversationId> {
    raw.map(|id| id.trim().to_owned())
        .filter(|id| !id.is_empty())
        .map(ConversationId::from)
}

/// Chat page for `/` and `/chat/:id`.
#[component]
pub fn ChatPage() -> impl IntoView {
    let params = use_params_map();
    let supplied = route_conversation_id(params.with_untracked(|p| p.get("id")));

    let conversation = RwSignal::new(ConversationState::default());
    let lifecycle = StoredValue::new(ConversationLifecycle::mount(
        supplied,
        &identity_store(),
        conversation.with_untracked(ConversationState::len),
    ));
    let anchor = RwSignal::new(ScrollAnchor::default());
    let views = RwSignal::new(ViewSelector::default());
    let notices = RwSignal::new(NoticeCenter::default());
    let notifier = StoredValue::new(MissingConfigNotifier::default());
    let call = RwSignal::new_local(CallHandshake::<BrowserCapture>::default());
    let input = RwSignal::new(String::new());
    let restore_scroll = RwSignal::new(None::<f64>);
    let refresh_seq = RwSignal::new(0_u64);
    let refresher = SignalRefresher::new(refresh_seq);

    let session = LocalResource::new(move || {
        refresh_seq.track();
        fetch_session()
    });
    let missing_keys = LocalResource::new(move || {
        refresh_seq.track();
        fetch_missing_keys()
    });
    let dashboard_report = LocalResource::new(fetch_dashboard_report);

    let current_session = Signal::derive(move || session.get().unwrap_or_else(pending_session));
    let active_view = Memo::new(move |_| views.with(ViewSelector::active));
    let calling = Signal::derive(move || call.with(CallHandshake::is_calling));
    let call_pending = Signal::derive(move || call.with(CallHandshake::is_requesting));

    let persisted = lifecycle.with_value(ConversationLifecycle::is_persisted);
    if let Some(id) = notices.try_update(|center| announce_ephemeral_identity(persisted, center)).flatten() {
        schedule_dismiss(notices, id);
    }

    // Lifecycle: URL rewrite on the first turn, one refresh after the first exchange.
    Effect::new(move || {
        let len = conversation.with(ConversationState::len);
        let session_now = current_session.get();
        lifecycle.update_value(|lc| {
            lc.sync(len, &session_now, &BrowserUrl, &refresher);
        });
    });

    // Missing configuration: one toast per key per mount.
    Effect::new(move || {
        let Some(keys) = missing_keys.get() else {
            return;
        };
        let created = notifier
            .try_update_value(|n| notices.try_update(|center| n.notify(&keys, center)))
            .flatten()
            .unwrap_or_default();
        for id in created {
            schedule_dismiss(notices, id);
        }
    });

    let on_submit = Callback::new(move |raw: String| {
        let Some(text) = normalize_input(&raw) else {
            return;
        };
        let conversation_id = lifecycle.with_value(|lc| lc.identity().clone());
        leptos::task::spawn_local(async move {
            if let Err(e) = submit_user_message(&conversation, &HttpChatBackend, &conversation_id, text).await {
                leptos::logging::warn!("{e}");
                conversation.update(|c| c.mark_failed(&e.local_id));
            }
        });
    });

    let on_call = Callback::new(move |()| {
        leptos::task::spawn_local(async move {
            // Failures are logged by the handshake and leave the call idle.
            start_call(&call, &BrowserMedia).await.ok();
        });
    });

    let on_end_call = Callback::new(move |()| {
        call.update(CallHandshake::end_call);
    });

    let on_select = Callback::new(move |next: ViewMode| {
        let outgoing = if views.with_untracked(|v| v.is_active(ViewMode::Chat)) {
            anchor.with_untracked(|a| a.geometry().scroll_top)
        } else {
            0.0
        };
        let switch = views
            .try_update(|v| {
                let switch = v.select(next, outgoing);
                // Set before `views` notifies so the incoming view mounts with it.
                if let Some(switch) = switch {
                    restore_scroll.set(switch.restore_scroll);
                }
                switch
            })
            .flatten();
        if let Some(switch) = switch {
            leptos::logging::log!("view {} -> {}", switch.from.label(), switch.to.label());
        }
    });

    let dashboard = Signal::derive(move || dashboard_report.get().flatten());

    view! {
        <div class="chat-page">
            <HeaderMenu active=active_view session=current_session on_select=on_select/>
            <main class="chat-page__view">
                {move || match active_view.get() {
                    ViewMode::Chat => view! {
                        <ChatPanel
                            conversation=conversation
                            anchor=anchor
                            input=input
                            calling=calling
                            call_pending=call_pending
                            restore_scroll=restore_scroll.get_untracked()
                            on_submit=on_submit
                            on_call=on_call
                            on_end_call=on_end_call
                        />
                    }
                    .into_any(),
                    ViewMode::Dashboard => view! { <DashboardEmbed report=dashboard/> }.into_any(),
                    ViewMode::Education => view! { <EducationView/> }.into_any(),
                }}
            </main>
            <ToastStack notices=notices/>
        </div>
    }
}
