//! Embedded analytics report configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The dashboard view hosts a third-party report widget. The host hands out a
//! [`DashboardReport`] descriptor; this module turns it into the JSON object
//! the widget's `embed` call expects and names the lifecycle events the view
//! subscribes to. Events are logged and otherwise ignored.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use serde::{Deserialize, Serialize};

/// Widget token type for embed tokens.
pub const TOKEN_TYPE_EMBED: u8 = 1;
/// Widget layout for desktop viewports.
pub const LAYOUT_MASTER: u8 = 0;
/// Widget layout for phones in portrait orientation.
pub const LAYOUT_MOBILE_PORTRAIT: u8 = 2;
/// Widget background mode that lets the page show through.
pub const BACKGROUND_TRANSPARENT: u8 = 1;

/// Report descriptor served by `GET /api/dashboard/embed`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub report_id: String,
    pub embed_url: String,
    pub access_token: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaneState {
    pub expanded: bool,
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmbedPanes {
    pub filters: PaneState,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedSettings {
    pub layout_type: u8,
    pub panes: EmbedPanes,
    pub background: u8,
    pub nav_content_pane_enabled: bool,
}

/// Object passed to the widget's `embed(container, config)` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardEmbedConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
    pub embed_url: String,
    pub access_token: String,
    pub token_type: u8,
    pub settings: EmbedSettings,
}

impl DashboardEmbedConfig {
    #[must_use]
    pub fn new(report: &DashboardReport, is_mobile: bool) -> Self {
        Self {
            kind: "report",
            id: report.report_id.clone(),
            embed_url: report.embed_url.clone(),
            access_token: report.access_token.clone(),
            token_type: TOKEN_TYPE_EMBED,
            settings: EmbedSettings {
                layout_type: if is_mobile { LAYOUT_MOBILE_PORTRAIT } else { LAYOUT_MASTER },
                panes: EmbedPanes { filters: PaneState { expanded: false, visible: false } },
                background: BACKGROUND_TRANSPARENT,
                nav_content_pane_enabled: false,
            },
        }
    }
}

/// Widget lifecycle events the view listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmbedEvent {
    Loaded,
    Rendered,
    Error,
    VisualClicked,
    PageChanged,
}

impl EmbedEvent {
    pub const ALL: [EmbedEvent; 5] = [
        EmbedEvent::Loaded,
        EmbedEvent::Rendered,
        EmbedEvent::Error,
        EmbedEvent::VisualClicked,
        EmbedEvent::PageChanged,
    ];

    /// Event name as the widget emits it.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            EmbedEvent::Loaded => "loaded",
            EmbedEvent::Rendered => "rendered",
            EmbedEvent::Error => "error",
            EmbedEvent::VisualClicked => "visualClicked",
            EmbedEvent::PageChanged => "pageChanged",
        }
    }

    /// Log one occurrence of this event with its optional detail payload.
    pub fn log(self, detail: Option<&str>) {
        match (self, detail) {
            (EmbedEvent::Error, Some(d)) => leptos::logging::warn!("dashboard embed error: {d}"),
            (EmbedEvent::Error, None) => leptos::logging::warn!("dashboard embed error"),
            (other, Some(d)) => leptos::logging::log!("dashboard {}: {d}", other.name()),
            (other, None) => leptos::logging::log!("dashboard {}", other.name()),
        }
    }
}
