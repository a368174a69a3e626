//! Intro shown while the conversation has no turns.

use leptos::prelude::*;

#[component]
pub fn EmptyScreen() -> impl IntoView {
    view! {
        <div class="empty-screen">
            <h1 class="empty-screen__title">"Welcome to Chatdesk"</h1>
            <p class="empty-screen__body">
                "Ask a question about your data. Switch to the dashboard for the live report, "
                "or open the education tab for a walkthrough."
            </p>
        </div>
    }
}
