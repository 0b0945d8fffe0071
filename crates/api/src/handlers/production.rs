//! Full-pipeline endpoints: composite video, multi-format fan-out, and
//! the daily autopilot job.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use promoloop_core::formats::{FormatKey, FORMATS};
use promoloop_pipeline::{FormatResult, VideoArtifact};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::ApiToken;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct CreateFullVideoRequest {
    pub topic: Option<String>,
    /// Output format key (default: `landscape`).
    pub format: Option<String>,
    /// Whether the artifact claims the daily latest slot (default: true).
    pub promote: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateMultiFormatRequest {
    pub topic: Option<String>,
    /// Format keys to render (default: all).
    pub formats: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AutopilotRequest {
    pub topic: Option<String>,
}

fn parse_format(key: &str) -> Result<FormatKey, AppError> {
    FormatKey::parse(key)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown format '{key}'")))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /create-full-video -- background + avatar composite pipeline.
pub async fn create_full_video(
    _auth: ApiToken,
    State(state): State<AppState>,
    body: Option<Json<CreateFullVideoRequest>>,
) -> AppResult<Json<VideoArtifact>> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let format = match request.format.as_deref() {
        Some(key) => parse_format(key)?,
        None => FormatKey::Landscape,
    };

    let artifact = state
        .pipeline
        .create_full_video(
            request.topic.as_deref(),
            format,
            request.promote.unwrap_or(true),
        )
        .await?;
    Ok(Json(artifact))
}

/// POST /create-multi-format -- fan out the full pipeline across output
/// formats. Failures are isolated per format.
pub async fn create_multi_format(
    _auth: ApiToken,
    State(state): State<AppState>,
    body: Option<Json<CreateMultiFormatRequest>>,
) -> AppResult<Json<Vec<FormatResult>>> {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let formats: Vec<FormatKey> = match &request.formats {
        Some(keys) => keys
            .iter()
            .map(|k| parse_format(k))
            .collect::<Result<_, _>>()?,
        None => FORMATS.iter().map(|f| f.key).collect(),
    };

    let results = state
        .pipeline
        .create_multi_format(request.topic.as_deref(), &formats)
        .await;
    Ok(Json(results))
}

/// POST /daily-autopilot -- run the full daily job on a detached task.
///
/// Responds immediately; results surface via the notification channels.
pub async fn daily_autopilot(
    _auth: ApiToken,
    State(state): State<AppState>,
    body: Option<Json<AutopilotRequest>>,
) -> AppResult<Json<Value>> {
    let topic = body.and_then(|Json(r)| r.topic);

    let pipeline = state.pipeline.clone();
    state.jobs.spawn(async move {
        let report = pipeline.run_autopilot(topic.as_deref()).await;
        tracing::info!(
            succeeded = report.succeeded(),
            total = report.formats.len(),
            "Autopilot job finished"
        );
    });

    Ok(Json(json!({ "status": "started" })))
}
