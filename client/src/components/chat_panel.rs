//! Chat view: scrollable feed, scroll-to-bottom button and prompt form.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted only while the chat view is active. On mount it attaches the
//! scroll observers to its container and either restores the offset saved
//! when the view was last left or jumps to the newest turn. On unmount the
//! observers are disconnected; the anchor model itself lives in the page.

use leptos::prelude::*;

use crate::components::chat_list::ChatList;
use crate::components::empty_screen::EmptyScreen;
use crate::components::prompt_form::PromptForm;
use crate::state::conversation::ConversationState;
use crate::state::scroll_anchor::ScrollAnchor;
#[cfg(feature = "hydrate")]
use crate::state::scroll_anchor::ScrollCommand;
#[cfg(feature = "hydrate")]
use crate::util::scroll_observer::{self, ScrollObservers};

#[component]
pub fn ChatPanel(
    conversation: RwSignal<ConversationState>,
    anchor: RwSignal<ScrollAnchor>,
    input: RwSignal<String>,
    calling: Signal<bool>,
    call_pending: Signal<bool>,
    /// Offset to restore instead of jumping to the newest turn.
    restore_scroll: Option<f64>,
    on_submit: Callback<String>,
    on_call: Callback<()>,
    on_end_call: Callback<()>,
) -> impl IntoView {
    let scroll_ref = NodeRef::<leptos::html::Div>::new();
    let content_ref = NodeRef::<leptos::html::Div>::new();
    let sentinel_ref = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "hydrate")]
    {
        let observers = StoredValue::new_local(None::<ScrollObservers>);
        let attached = StoredValue::new(false);

        Effect::new(move || {
            let (Some(container), Some(content), Some(sentinel)) =
                (scroll_ref.get(), content_ref.get(), sentinel_ref.get())
            else {
                return;
            };
            if attached.get_value() {
                return;
            }
            attached.set_value(true);

            observers.set_value(scroll_observer::attach(&container, &content, &sentinel, anchor));
            match restore_scroll {
                Some(offset) => {
                    let command = anchor.try_update(|a| a.restore(offset)).unwrap_or(ScrollCommand::Stay);
                    scroll_observer::apply_command(&container, command);
                }
                None => scroll_observer::scroll_feed_to_bottom(&container, anchor),
            }
        });

        on_cleanup(move || {
            if let Some(active) = observers.try_update_value(Option::take).flatten() {
                active.disconnect();
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = restore_scroll;

    let on_scroll_to_bottom = move |_| {
        #[cfg(feature = "hydrate")]
        {
            if let Some(container) = scroll_ref.get_untracked() {
                scroll_observer::scroll_feed_to_bottom(&container, anchor);
            }
        }
    };

    let is_empty = move || conversation.with(ConversationState::is_empty);
    let show_jump = move || !anchor.with(ScrollAnchor::is_at_bottom);

    view! {
        <section class="chat-panel">
            <div class="chat-panel__scroll" node_ref=scroll_ref>
                <div class="chat-panel__content" node_ref=content_ref>
                    <Show when=is_empty fallback=move || view! { <ChatList conversation=conversation/> }>
                        <EmptyScreen/>
                    </Show>
                    <div class="chat-panel__sentinel" node_ref=sentinel_ref></div>
                </div>
            </div>
            <Show when=show_jump>
                <button class="btn chat-panel__jump" type="button" on:click=on_scroll_to_bottom>
                    "Scroll to bottom"
                </button>
            </Show>
            <PromptForm
                input=input
                calling=calling
                call_pending=call_pending
                on_submit=on_submit
                on_call=on_call
                on_end_call=on_end_call
            />
        </section>
    }
}
