use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tokio_util::task::TaskTracker;
use tower::ServiceExt;

use promoloop_api::config::ServerConfig;
use promoloop_api::router::build_app_router;
use promoloop_api::state::{build_pipeline, AppState};
use promoloop_social::NotifierSettings;

/// Build a test `ServerConfig` with safe defaults.
///
/// No vendor credentials are present, so render and social calls fail as
/// not-configured without any network traffic. Two bearer tokens are
/// accepted to cover rotation scenarios.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        api_tokens: vec!["test-token".to_string(), "legacy-token".to_string()],
        heygen_api_key: None,
        supabase_url: "http://localhost:54321".to_string(),
        supabase_service_key: "test-service-key".to_string(),
        recorder_binary: PathBuf::from("node"),
        recorder_script: None,
        work_dir: std::env::temp_dir().join("promoloop-api-tests"),
        assets_dir: std::env::temp_dir().join("promoloop-api-tests/assets"),
        brand_label: "themora.io".to_string(),
        youtube: None,
        twitter: None,
        notifier: NotifierSettings::default(),
    }
}

/// Build the full application router with all middleware layers.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app() -> Router {
    let config = test_config();
    let pipeline = build_pipeline(&config);

    let state = AppState {
        pipeline: Arc::new(pipeline),
        config: Arc::new(config.clone()),
        jobs: TaskTracker::new(),
    };

    build_app_router(state, &config)
}

/// Send a GET request to the app and return the raw response.
pub async fn get(app: Router, path: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap();

    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body, optionally with a bearer token.
pub async fn post_json(
    app: Router,
    path: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = builder.body(Body::from(body.to_string())).unwrap();

    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
