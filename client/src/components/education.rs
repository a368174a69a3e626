//! Static education view.

use leptos::prelude::*;

const TOPICS: [(&str, &str); 3] = [
    (
        "Asking questions",
        "Describe what you want to know in plain language. Follow-up questions keep the context of the conversation.",
    ),
    (
        "Reading the dashboard",
        "The dashboard tab shows the live report. Filters are hidden; click a visual to drill into it.",
    ),
    (
        "Voice",
        "The call button asks for microphone access and records while the call is active.",
    ),
];

#[component]
pub fn EducationView() -> impl IntoView {
    view! {
        <section class="education">
            <h2 class="education__title">"Getting started"</h2>
            {TOPICS
                .into_iter()
                .map(|(title, body)| {
                    view! {
                        <article class="education__topic">
                            <h3>{title}</h3>
                            <p>{body}</p>
                        </article>
                    }
                })
                .collect::<Vec<_>>()}
        </section>
    }
}
