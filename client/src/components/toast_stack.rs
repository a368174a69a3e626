//! Toast notices rendered from the shared [`NoticeCenter`].
//!
//! Notices are dismissible by click and expire on their own after
//! [`NOTICE_TTL_MS`] in the browser.

use leptos::prelude::*;

use crate::state::notices::{NoticeCenter, NoticeLevel};

/// Lifetime of a notice before it is dismissed automatically.
pub const NOTICE_TTL_MS: u64 = 6_000;

/// Dismiss notice `id` after [`NOTICE_TTL_MS`].
pub fn schedule_dismiss(notices: RwSignal<NoticeCenter>, id: u64) {
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(async move {
            gloo_timers::future::sleep(std::time::Duration::from_millis(NOTICE_TTL_MS)).await;
            notices.try_update(|center| center.dismiss(id));
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (notices, id);
    }
}

#[component]
pub fn ToastStack(notices: RwSignal<NoticeCenter>) -> impl IntoView {
    view! {
        <div class="toast-stack" role="status">
            {move || {
                notices
                    .with(|center| center.iter().cloned().collect::<Vec<_>>())
                    .into_iter()
                    .map(|notice| {
                        let id = notice.id;
                        let is_error = notice.level == NoticeLevel::Error;
                        view! {
                            <div class="toast" class:toast--error=is_error>
                                <span class="toast__message">{notice.message}</span>
                                <button
                                    class="toast__close"
                                    type="button"
                                    on:click=move |_| notices.update(|center| center.dismiss(id))
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
