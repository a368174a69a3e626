//! Dashboard view hosting the embedded analytics report.
//!
//! SYSTEM CONTEXT
//! ==============
//! The report widget is a third-party script exposing a global
//! `powerbi.embed(container, config)`. This view builds the config from the
//! host-provided [`DashboardReport`] and subscribes the widget's lifecycle
//! events to log lines. The widget is loaded only while the view is mounted.
//!
//! ERROR HANDLING
//! ==============
//! A missing widget script, a missing report descriptor or a failed embed
//! call leaves a placeholder and a log line; nothing propagates.

use leptos::prelude::*;

use crate::state::dashboard::DashboardReport;
#[cfg(feature = "hydrate")]
use crate::state::dashboard::{DashboardEmbedConfig, EmbedEvent};
#[cfg(feature = "hydrate")]
use crate::util::device;

#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, JsValue, closure::Closure};

#[cfg(feature = "hydrate")]
fn js_prop(target: &JsValue, key: &str) -> Result<JsValue, String> {
    js_sys::Reflect::get(target, &JsValue::from_str(key)).map_err(|e| format!("{key}: {e:?}"))
}

#[cfg(feature = "hydrate")]
fn event_detail(event: &JsValue) -> Option<String> {
    let detail = js_sys::Reflect::get(event, &JsValue::from_str("detail")).ok()?;
    if detail.is_undefined() || detail.is_null() {
        return None;
    }
    js_sys::JSON::stringify(&detail).ok().map(String::from)
}

#[cfg(feature = "hydrate")]
fn embed_report(container: &web_sys::Element, report: &DashboardReport) -> Result<(), String> {
    let config = DashboardEmbedConfig::new(report, device::is_mobile());
    let json = serde_json::to_string(&config).map_err(|e| e.to_string())?;
    let config_js = js_sys::JSON::parse(&json).map_err(|e| format!("{e:?}"))?;

    let widget = js_prop(&js_sys::global(), "powerbi")?;
    if widget.is_undefined() {
        return Err("report widget script not loaded".to_owned());
    }
    let embed: js_sys::Function = js_prop(&widget, "embed")?
        .dyn_into()
        .map_err(|_| "powerbi.embed is not a function".to_owned())?;
    let embedded = embed.call2(&widget, container, &config_js).map_err(|e| format!("embed failed: {e:?}"))?;

    let on: js_sys::Function = js_prop(&embedded, "on")?
        .dyn_into()
        .map_err(|_| "embedded report has no event API".to_owned())?;
    for event in EmbedEvent::ALL {
        let handler = Closure::wrap(Box::new(move |ev: JsValue| {
            event.log(event_detail(&ev).as_deref());
        }) as Box<dyn FnMut(JsValue)>);
        on.call2(&embedded, &JsValue::from_str(event.name()), handler.as_ref())
            .map_err(|e| format!("subscribe {}: {e:?}", event.name()))?;
        // The widget keeps these handlers for the life of the embedded report.
        handler.forget();
    }
    Ok(())
}

/// Dashboard view. `report` is `None` until fetched or when not configured.
#[component]
pub fn DashboardEmbed(report: Signal<Option<DashboardReport>>) -> impl IntoView {
    let container_ref = NodeRef::<leptos::html::Div>::new();
    let status = RwSignal::new(None::<String>);

    #[cfg(feature = "hydrate")]
    {
        let embedded_id = StoredValue::new(None::<String>);
        Effect::new(move || {
            let (Some(container), Some(report)) = (container_ref.get(), report.get()) else {
                return;
            };
            if embedded_id.with_value(|id| id.as_deref() == Some(report.report_id.as_str())) {
                return;
            }
            embedded_id.set_value(Some(report.report_id.clone()));
            match embed_report(&container, &report) {
                Ok(()) => status.set(None),
                Err(e) => {
                    leptos::logging::warn!("dashboard embed failed: {e}");
                    status.set(Some("The report could not be loaded.".to_owned()));
                }
            }
        });
    }

    view! {
        <section class="dashboard-embed">
            <Show when=move || report.with(Option::is_none)>
                <p class="dashboard-embed__placeholder">"No report is configured."</p>
            </Show>
            {move || status.get().map(|msg| view! { <p class="dashboard-embed__error">{msg}</p> })}
            <div class="dashboard-embed__frame" node_ref=container_ref></div>
        </section>
    }
}
