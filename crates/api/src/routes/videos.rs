//! Route definitions for avatar-only renders.
//!
//! ```text
//! POST /create-video     create_video  (bearer)
//! GET  /status/{id}      video_status
//! GET  /videos           list_videos
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::videos;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-video", post(videos::create_video))
        .route("/status/{id}", get(videos::video_status))
        .route("/videos", get(videos::list_videos))
}
