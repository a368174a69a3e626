//! Header bar with the view selector menu.
//!
//! SYSTEM CONTEXT
//! ==============
//! The header is the only place a view change can originate. It renders one
//! entry per [`ViewMode`] and reports clicks upward; the page owns the
//! [`crate::state::view::ViewSelector`] and decides what mounts.

use leptos::prelude::*;

use crate::state::session::Session;
use crate::state::view::ViewMode;

/// Top bar with the app title, view menu and signed-in user.
#[component]
pub fn HeaderMenu(
    active: Memo<ViewMode>,
    session: Signal<Session>,
    on_select: Callback<ViewMode>,
) -> impl IntoView {
    let user_label = move || {
        session.with(|s| {
            s.user
                .as_ref()
                .map_or_else(|| "Guest".to_owned(), |u| u.name.clone())
        })
    };

    view! {
        <header class="header-menu">
            <span class="header-menu__title">"Chatdesk"</span>
            <nav class="header-menu__views">
                {ViewMode::ALL
                    .into_iter()
                    .map(|mode| {
                        view! {
                            <button
                                class="header-menu__view"
                                class:header-menu__view--active=move || active.get() == mode
                                type="button"
                                on:click=move |_| on_select.run(mode)
                            >
                                {mode.label()}
                            </button>
                        }
                    })
                    .collect::<Vec<_>>()}
            </nav>
            <span class="header-menu__user">{user_label}</span>
        </header>
    }
}
