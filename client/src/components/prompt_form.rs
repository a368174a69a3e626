//! Prompt input with send and call buttons.
//!
//! SYSTEM CONTEXT
//! ==============
//! The form only collects text. It clears the input as soon as a prompt is
//! submitted and hands the raw text to the page, which normalizes it and
//! runs the submission pipeline.

#[cfg(test)]
#[path = "prompt_form_test.rs"]
mod prompt_form_test;

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use crate::util::device;

/// `true` when a keydown should submit the form instead of inserting a newline.
pub(crate) fn is_submit_key(key: &str, shift: bool, composing: bool) -> bool {
    key == "Enter" && !shift && !composing
}

/// Textarea + send button + phone button.
#[component]
pub fn PromptForm(
    input: RwSignal<String>,
    calling: Signal<bool>,
    /// Microphone permission prompt is open.
    call_pending: Signal<bool>,
    on_submit: Callback<String>,
    on_call: Callback<()>,
    on_end_call: Callback<()>,
) -> impl IntoView {
    let textarea_ref = NodeRef::<leptos::html::Textarea>::new();

    Effect::new(move || {
        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = textarea_ref.get() {
                let _ = el.focus();
            }
        }
    });

    let do_submit = move || {
        let raw = input.get_untracked();
        input.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            if device::is_narrow_viewport() {
                if let Some(el) = textarea_ref.get_untracked() {
                    let _ = el.blur();
                }
            }
        }

        on_submit.run(raw);
    };

    let on_form_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        do_submit();
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if is_submit_key(&ev.key(), ev.shift_key(), ev.is_composing()) {
            ev.prevent_default();
            do_submit();
        }
    };

    let on_phone = move |_| {
        if calling.get_untracked() {
            on_end_call.run(());
        } else {
            on_call.run(());
        }
    };

    view! {
        <form class="prompt-form" on:submit=on_form_submit>
            <textarea
                class="prompt-form__input"
                name="message"
                rows="1"
                placeholder="Send a message."
                spellcheck="false"
                autocomplete="off"
                node_ref=textarea_ref
                prop:value=move || input.get()
                on:input=move |ev| input.set(event_target_value(&ev))
                on:keydown=on_keydown
            ></textarea>
            <div class="prompt-form__actions">
                <button
                    class="btn prompt-form__send"
                    type="submit"
                    disabled=move || input.with(String::is_empty)
                >
                    "Send"
                </button>
                <button
                    class="btn prompt-form__call"
                    class:prompt-form__call--active=move || calling.get()
                    type="button"
                    disabled=move || call_pending.get()
                    on:click=on_phone
                >
                    {move || if calling.get() { "End call" } else { "Call" }}
                </button>
            </div>
        </form>
    }
}
