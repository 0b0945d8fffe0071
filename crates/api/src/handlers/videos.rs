//! Avatar-only render endpoints: create, poll, list.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use promoloop_heygen::RenderStatus;
use promoloop_pipeline::{CreateOutcome, VideoArtifact};
use promoloop_storage::ArtifactRecord;

use crate::error::AppResult;
use crate::middleware::auth::ApiToken;
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: u32 = 10;
const MAX_LIST_LIMIT: u32 = 50;

// ---------------------------------------------------------------------------
// Request / response payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    /// Explicit script key; absent means today's rotation pick.
    pub topic: Option<String>,
    /// When false, respond right after submission with the job id.
    #[serde(default = "default_wait")]
    pub wait_for_completion: bool,
}

impl Default for CreateVideoRequest {
    fn default() -> Self {
        Self {
            topic: None,
            wait_for_completion: true,
        }
    }
}

fn default_wait() -> bool {
    true
}

#[derive(Serialize)]
pub struct RenderStartedResponse {
    pub status: &'static str,
    pub job_id: String,
    pub avatar: &'static str,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct VideoPublishedResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub video: VideoArtifact,
}

#[derive(Debug, Deserialize)]
pub struct ListVideosParams {
    pub limit: Option<u32>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /create-video -- avatar-only render, optionally waiting for the
/// published artifact.
pub async fn create_video(
    _auth: ApiToken,
    State(state): State<AppState>,
    body: Option<Json<CreateVideoRequest>>,
) -> AppResult<Response> {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let outcome = state
        .pipeline
        .create_avatar_video(request.topic.as_deref(), request.wait_for_completion)
        .await?;

    let response = match outcome {
        CreateOutcome::Started { job_id, avatar } => Json(RenderStartedResponse {
            status: "started",
            job_id,
            avatar,
            message: "Render submitted. Poll /status/{id} for progress.",
        })
        .into_response(),
        CreateOutcome::Published(video) => Json(VideoPublishedResponse {
            status: "published",
            video,
        })
        .into_response(),
    };
    Ok(response)
}

/// GET /status/{id} -- one poll of a render job.
pub async fn video_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<RenderStatus>> {
    let status = state.pipeline.render_status(&id).await?;
    Ok(Json(status))
}

/// GET /videos -- recently published artifacts, newest first.
pub async fn list_videos(
    State(state): State<AppState>,
    Query(params): Query<ListVideosParams>,
) -> AppResult<Json<Vec<ArtifactRecord>>> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .min(MAX_LIST_LIMIT);
    let videos = state.pipeline.recent_videos(limit).await?;
    Ok(Json(videos))
}
