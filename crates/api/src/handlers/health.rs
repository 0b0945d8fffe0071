use axum::extract::State;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Serialize;

use promoloop_core::rotation;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    pub service: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the render vendor credential is present.
    pub renderer_configured: bool,
    /// Today's rotation pick.
    pub date: NaiveDate,
    pub script: &'static str,
    pub demo: &'static str,
}

/// GET /health -- liveness plus today's rotation pick.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let selection = rotation::select_for(Utc::now().date_naive());

    Json(HealthResponse {
        status: "ok",
        service: "promoloop",
        version: env!("CARGO_PKG_VERSION"),
        renderer_configured: state.pipeline.renderer_configured(),
        date: selection.date,
        script: selection.script.key,
        demo: selection.demo.key,
    })
}
