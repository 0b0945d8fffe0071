pub mod catalog;
pub mod health;
pub mod production;
pub mod videos;

use axum::Router;

use crate::state::AppState;

/// Build the public route tree (everything mounts at the root).
///
/// ```text
/// GET  /health                liveness + today's rotation pick
/// GET  /today                 today's script/demo selection
/// GET  /formats               output format catalog
/// POST /create-video          avatar-only render            (bearer)
/// GET  /status/{id}           poll a render job
/// GET  /videos                recent published artifacts
/// POST /create-full-video     background composite pipeline (bearer)
/// POST /create-multi-format   fan-out across formats        (bearer)
/// POST /daily-autopilot       detached daily job            (bearer)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(catalog::router())
        .merge(videos::router())
        .merge(production::router())
}
