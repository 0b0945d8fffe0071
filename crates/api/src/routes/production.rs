//! Route definitions for the full pipeline.
//!
//! ```text
//! POST /create-full-video     create_full_video    (bearer)
//! POST /create-multi-format   create_multi_format  (bearer)
//! POST /daily-autopilot       daily_autopilot      (bearer)
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::production;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-full-video", post(production::create_full_video))
        .route("/create-multi-format", post(production::create_multi_format))
        .route("/daily-autopilot", post(production::daily_autopilot))
}
