//! Configuration status and dashboard descriptor endpoints.

use axum::Json;
use axum::extract::State;
use chatdesk_client::net::types::DashboardReport;

use super::error::ApiError;
use crate::state::AppState;

/// `GET /api/config/missing-keys`: required keys absent from the environment.
pub async fn missing_keys(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.config.missing_keys.clone())
}

/// `GET /api/dashboard/embed`: report descriptor or 404.
pub async fn dashboard_embed(State(state): State<AppState>) -> Result<Json<DashboardReport>, ApiError> {
    state
        .config
        .dashboard
        .clone()
        .map(Json)
        .ok_or(ApiError::NotConfigured("dashboard"))
}
