//! Conversation feed rendering.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders the [`ConversationState`] in insertion order. User turns carry
//! their delivery status as a reactive modifier class so pending and failed
//! prompts are distinguishable without being removed or re-rendered.

use leptos::prelude::*;

use crate::state::conversation::{ConversationState, ConversationTurn, DeliveryStatus, TurnPayload};
use crate::util::markdown::{render_markdown_html, tool_result_text};

/// CSS modifier for a turn's delivery status.
fn delivery_class(status: Option<DeliveryStatus>) -> &'static str {
    match status {
        Some(DeliveryStatus::Pending) => "chat-list__turn--pending",
        Some(DeliveryStatus::Failed) => "chat-list__turn--failed",
        Some(DeliveryStatus::Confirmed) | None => "",
    }
}

fn turn_view(turn: ConversationTurn, conversation: RwSignal<ConversationState>) -> AnyView {
    let id = turn.id.clone();
    let status = Memo::new(move |_| conversation.with(|state| state.delivery(&id)));
    let class = move || format!("chat-list__turn {}", delivery_class(status.get()));
    let turn_id = turn.id.to_string();
    match turn.payload {
        TurnPayload::UserText { text } => view! {
            <div class=class data-turn-id=turn_id>
                <div class="chat-list__bubble chat-list__bubble--user">{text}</div>
                {move || {
                    (status.get() == Some(DeliveryStatus::Failed))
                        .then(|| view! { <span class="chat-list__failed">"Not delivered"</span> })
                }}
            </div>
        }
        .into_any(),
        TurnPayload::AssistantText { text } => {
            let rendered = render_markdown_html(&text);
            view! {
                <div class=class data-turn-id=turn_id>
                    <div class="chat-list__bubble chat-list__bubble--assistant" inner_html=rendered></div>
                </div>
            }
            .into_any()
        }
        TurnPayload::ToolResult { tool, content } => {
            let body = tool_result_text(&content);
            view! {
                <div class=class data-turn-id=turn_id>
                    <div class="chat-list__bubble chat-list__bubble--tool">
                        <span class="chat-list__tool-name">{tool}</span>
                        <pre class="chat-list__tool-body">{body}</pre>
                    </div>
                </div>
            }
            .into_any()
        }
    }
}

/// Ordered list of conversation turns, keyed by turn id so existing rows
/// stay mounted as the feed grows.
#[component]
pub fn ChatList(conversation: RwSignal<ConversationState>) -> impl IntoView {
    let awaiting_reply = move || conversation.with(|state| state.pending_count() > 0);

    view! {
        <div class="chat-list">
            <For
                each=move || conversation.with(|state| state.turns().to_vec())
                key=|turn| turn.id.clone()
                children=move |turn| turn_view(turn, conversation)
            />
            <Show when=awaiting_reply>
                <div class="chat-list__waiting">"Waiting for a reply…"</div>
            </Show>
        </div>
    }
}
