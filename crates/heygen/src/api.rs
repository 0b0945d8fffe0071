//! HTTP wrapper for the HeyGen v2 generate / v1 status endpoints.

use std::time::Duration;

use bytes::Bytes;
use serde_json::json;

use crate::poll;
use crate::types::{coerce_error_message, optional_error_message, RenderState, RenderStatus};

/// Default production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.heygen.com";

/// Status poll cadence during a completion wait.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Hard deadline for a completion wait.
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(600);

/// Connection settings for [`HeyGenClient`].
///
/// `api_key` is optional on purpose: the service boots without vendor
/// credentials and submissions fail with [`HeyGenError::NotConfigured`]
/// at call time instead.
#[derive(Debug, Clone)]
pub struct HeyGenSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub poll_interval: Duration,
    pub max_wait: Duration,
}

impl Default for HeyGenSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }
}

/// Errors from the HeyGen API layer.
#[derive(Debug, thiserror::Error)]
pub enum HeyGenError {
    /// No vendor credential is configured; nothing was sent.
    #[error("HEYGEN_API_KEY not configured")]
    NotConfigured,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The vendor answered but rejected the submission.
    #[error("HeyGen rejected the submission: {message}")]
    Vendor { message: String },

    /// A non-2xx response outside the submit path (e.g. result download).
    #[error("HeyGen API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The vendor reported the render job as failed.
    #[error("Render failed: {detail}")]
    RenderFailed { detail: String },

    /// The completion wait crossed its deadline.
    #[error("Render timed out after {waited_secs}s")]
    Timeout { waited_secs: u64 },
}

/// Background input for a render submission.
#[derive(Debug, Clone)]
pub enum Background {
    /// Flat color backdrop, e.g. `#00FF00` for later chroma keying.
    Color { value: String },
    /// Vendor-side compositing over a hosted clip. The vendor loops and
    /// cover-fits the clip behind the presenter.
    Video { url: String },
}

impl Background {
    fn to_payload(&self) -> serde_json::Value {
        match self {
            Background::Color { value } => json!({
                "type": "color",
                "value": value,
            }),
            Background::Video { url } => json!({
                "type": "video",
                "url": url,
                "play_style": "loop",
                "fit": "cover",
            }),
        }
    }
}

/// A fully-specified render submission.
#[derive(Debug, Clone)]
pub struct RenderSpec {
    pub script_text: String,
    pub avatar_id: String,
    pub voice_id: String,
    pub avatar_scale: f64,
    pub avatar_offset_x: f64,
    pub avatar_offset_y: f64,
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: String,
    pub background: Option<Background>,
}

impl RenderSpec {
    /// Spec with the canonical landscape geometry and no background.
    pub fn new(script_text: String, avatar_id: String, voice_id: String) -> Self {
        Self {
            script_text,
            avatar_id,
            voice_id,
            avatar_scale: 1.5,
            avatar_offset_x: 0.0,
            avatar_offset_y: 0.0,
            width: 1920,
            height: 1080,
            aspect_ratio: "16:9".to_string(),
            background: None,
        }
    }

    pub fn with_geometry(
        mut self,
        width: u32,
        height: u32,
        aspect_ratio: &str,
        avatar_scale: f64,
        avatar_offset_x: f64,
        avatar_offset_y: f64,
    ) -> Self {
        self.width = width;
        self.height = height;
        self.aspect_ratio = aspect_ratio.to_string();
        self.avatar_scale = avatar_scale;
        self.avatar_offset_x = avatar_offset_x;
        self.avatar_offset_y = avatar_offset_y;
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = Some(background);
        self
    }

    /// Build the v2 generate request body.
    pub fn payload(&self) -> serde_json::Value {
        let mut character = json!({
            "type": "avatar",
            "avatar_id": self.avatar_id,
            "avatar_style": "normal",
            "scale": self.avatar_scale,
        });
        if self.avatar_offset_x != 0.0 || self.avatar_offset_y != 0.0 {
            character["offset"] = json!({
                "x": self.avatar_offset_x,
                "y": self.avatar_offset_y,
            });
        }

        let mut input = json!({
            "character": character,
            "voice": {
                "type": "text",
                "input_text": self.script_text,
                "voice_id": self.voice_id,
                "speed": 1.0,
            },
        });
        if let Some(background) = &self.background {
            input["background"] = background.to_payload();
        }

        json!({
            "video_inputs": [input],
            "dimension": { "width": self.width, "height": self.height },
            "aspect_ratio": self.aspect_ratio,
        })
    }
}

/// A submitted render job, identified by the vendor-assigned id.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub id: String,
}

/// HTTP client for the HeyGen API.
pub struct HeyGenClient {
    client: reqwest::Client,
    settings: HeyGenSettings,
}

impl HeyGenClient {
    pub fn new(settings: HeyGenSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across vendor clients).
    pub fn with_client(client: reqwest::Client, settings: HeyGenSettings) -> Self {
        Self { client, settings }
    }

    pub fn is_configured(&self) -> bool {
        self.settings.api_key.is_some()
    }

    /// Submit a render job.
    ///
    /// Sends a `POST /v2/video/generate` request. The vendor's answer is
    /// parsed leniently: anything without a `data.video_id` is treated as
    /// a rejection and surfaced as [`HeyGenError::Vendor`] with the error
    /// payload flattened to a message string.
    pub async fn generate(&self, spec: &RenderSpec) -> Result<RenderJob, HeyGenError> {
        let api_key = self.api_key()?;

        tracing::info!(
            avatar_id = %spec.avatar_id,
            width = spec.width,
            height = spec.height,
            "Submitting render job"
        );

        let response = self
            .client
            .post(format!("{}/v2/video/generate", self.settings.base_url))
            .header("X-Api-Key", api_key)
            .json(&spec.payload())
            .send()
            .await?;

        let value: serde_json::Value = response.json().await?;
        match value.pointer("/data/video_id").and_then(|v| v.as_str()) {
            Some(id) if !id.is_empty() => {
                tracing::info!(video_id = %id, "Render job accepted");
                Ok(RenderJob { id: id.to_string() })
            }
            _ => {
                let message = coerce_error_message(value.get("error"));
                tracing::warn!(error = %message, "Render submission rejected");
                Err(HeyGenError::Vendor { message })
            }
        }
    }

    /// Check a render job's status once.
    ///
    /// Sends a `GET /v1/video_status.get` request and maps the vendor's
    /// status string onto [`RenderState`]; an omitted status reads as
    /// still pending.
    pub async fn video_status(&self, video_id: &str) -> Result<RenderStatus, HeyGenError> {
        let api_key = self.api_key()?;

        let response = self
            .client
            .get(format!("{}/v1/video_status.get", self.settings.base_url))
            .query(&[("video_id", video_id)])
            .header("X-Api-Key", api_key)
            .send()
            .await?;

        let value: serde_json::Value = response.json().await?;
        let data = value.get("data");

        Ok(RenderStatus {
            state: RenderState::from_vendor(
                data.and_then(|d| d.get("status")).and_then(|s| s.as_str()),
            ),
            video_url: data
                .and_then(|d| d.get("video_url"))
                .and_then(|u| u.as_str())
                .map(str::to_string),
            error: optional_error_message(data.and_then(|d| d.get("error"))),
        })
    }

    /// Block until the job completes and return the result URL.
    ///
    /// Polls [`Self::video_status`] on the configured interval until the
    /// configured deadline (15s / 600s by default).
    pub async fn await_completion(&self, video_id: &str) -> Result<String, HeyGenError> {
        poll::wait_for_completion(
            self.settings.poll_interval,
            self.settings.max_wait,
            || async {
                let status = self.video_status(video_id).await?;
                tracing::info!(video_id = %video_id, state = %status.state, "Render status");
                Ok(status)
            },
        )
        .await
    }

    /// Download a finished clip into memory.
    pub async fn download(&self, url: &str) -> Result<Bytes, HeyGenError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(HeyGenError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        tracing::info!(bytes = bytes.len(), "Downloaded render result");
        Ok(bytes)
    }

    // ---- private helpers ----

    fn api_key(&self) -> Result<&str, HeyGenError> {
        self.settings
            .api_key
            .as_deref()
            .ok_or(HeyGenError::NotConfigured)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn spec() -> RenderSpec {
        RenderSpec::new(
            "Hello from the catalog".to_string(),
            "Abigail_expressive_2024112501".to_string(),
            "fb8c5c3f02854c57a4da182d4ed59467".to_string(),
        )
    }

    // -- Payload shape -----------------------------------------------------

    #[test]
    fn payload_carries_character_and_voice() {
        let payload = spec().payload();

        assert_eq!(
            payload["video_inputs"][0]["character"]["avatar_id"],
            "Abigail_expressive_2024112501"
        );
        assert_eq!(payload["video_inputs"][0]["character"]["avatar_style"], "normal");
        assert_eq!(payload["video_inputs"][0]["voice"]["type"], "text");
        assert_eq!(payload["video_inputs"][0]["voice"]["speed"], 1.0);
        assert_eq!(payload["dimension"]["width"], 1920);
        assert_eq!(payload["dimension"]["height"], 1080);
        assert_eq!(payload["aspect_ratio"], "16:9");
    }

    #[test]
    fn payload_omits_background_by_default() {
        let payload = spec().payload();
        assert!(payload["video_inputs"][0].get("background").is_none());
    }

    #[test]
    fn color_background_is_typed() {
        let payload = spec()
            .with_background(Background::Color {
                value: "#00FF00".to_string(),
            })
            .payload();

        assert_eq!(payload["video_inputs"][0]["background"]["type"], "color");
        assert_eq!(payload["video_inputs"][0]["background"]["value"], "#00FF00");
    }

    #[test]
    fn video_background_loops_and_covers() {
        let payload = spec()
            .with_background(Background::Video {
                url: "https://storage.example/bg.mp4".to_string(),
            })
            .payload();

        let background = &payload["video_inputs"][0]["background"];
        assert_eq!(background["type"], "video");
        assert_eq!(background["play_style"], "loop");
        assert_eq!(background["fit"], "cover");
    }

    #[test]
    fn payload_omits_zero_offset() {
        let payload = spec().payload();
        assert!(payload["video_inputs"][0]["character"].get("offset").is_none());
    }

    #[test]
    fn payload_includes_nonzero_offset() {
        let payload = spec()
            .with_geometry(1080, 1920, "9:16", 1.0, 0.0, 0.2)
            .payload();

        let character = &payload["video_inputs"][0]["character"];
        assert_eq!(character["offset"]["y"], 0.2);
        assert_eq!(payload["aspect_ratio"], "9:16");
    }

    // -- Credential gate ---------------------------------------------------

    #[tokio::test]
    async fn generate_without_key_fails_fast() {
        let client = HeyGenClient::new(HeyGenSettings::default());
        let result = client.generate(&spec()).await;
        assert_matches!(result, Err(HeyGenError::NotConfigured));
    }

    #[tokio::test]
    async fn status_without_key_fails_fast() {
        let client = HeyGenClient::new(HeyGenSettings::default());
        let result = client.video_status("abc123").await;
        assert_matches!(result, Err(HeyGenError::NotConfigured));
    }
}
