//! Pipeline request states, outcomes, and reports.

use std::fmt;

use chrono::NaiveDate;
use promoloop_core::catalog::Language;
use promoloop_core::formats::FormatKey;
use serde::Serialize;

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Stages of a single video request.
///
/// Runs move forward through
/// Idle → BackgroundAcquired → RenderSubmitted → RenderCompleted →
/// Composited → Published → Done, skipping stages their variant does not
/// need; `Failed` absorbs from any non-terminal stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    BackgroundAcquired,
    RenderSubmitted,
    RenderCompleted,
    Composited,
    Published,
    Done,
    Failed(String),
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed(_))
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Idle => f.write_str("idle"),
            PipelineState::BackgroundAcquired => f.write_str("background_acquired"),
            PipelineState::RenderSubmitted => f.write_str("render_submitted"),
            PipelineState::RenderCompleted => f.write_str("render_completed"),
            PipelineState::Composited => f.write_str("composited"),
            PipelineState::Published => f.write_str("published"),
            PipelineState::Done => f.write_str("done"),
            PipelineState::Failed(reason) => write!(f, "failed({reason})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Delivery mode
// ---------------------------------------------------------------------------

/// How a published video was assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// Plain avatar on a flat backdrop; no background was requested.
    AvatarOnly,
    /// The render vendor composited the background clip server-side.
    VendorBackground,
    /// Local keying/overlay over the recorded clip.
    Composite,
    /// Background acquisition failed; the run degraded to avatar-only.
    Fallback,
}

impl DeliveryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMode::AvatarOnly => "avatar_only",
            DeliveryMode::VendorBackground => "vendor_background",
            DeliveryMode::Composite => "composite",
            DeliveryMode::Fallback => "fallback",
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// A published video and everything a caller needs to reference it.
#[derive(Debug, Clone, Serialize)]
pub struct VideoArtifact {
    /// Vendor render-job id.
    pub job_id: String,
    pub filename: String,
    /// Public URL in our storage bucket.
    pub public_url: String,
    /// The vendor's (expiring) result URL.
    pub vendor_url: String,
    pub title: String,
    pub script_key: &'static str,
    pub language: Language,
    pub avatar: &'static str,
    pub format: FormatKey,
    pub mode: DeliveryMode,
}

/// Result of the avatar-only create operation.
#[derive(Debug, Clone)]
pub enum CreateOutcome {
    /// Fire-and-forget: submission succeeded, the caller polls the job id.
    Started {
        job_id: String,
        avatar: &'static str,
    },
    /// The run waited for the render and published the artifact.
    Published(VideoArtifact),
}

/// Per-format outcome of a fan-out run.
#[derive(Debug, Clone, Serialize)]
pub struct FormatResult {
    pub format: FormatKey,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<VideoArtifact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FormatResult {
    pub fn ok(artifact: VideoArtifact) -> Self {
        Self {
            format: artifact.format,
            success: true,
            artifact: Some(artifact),
            error: None,
        }
    }

    pub fn failed(format: FormatKey, error: String) -> Self {
        Self {
            format,
            success: false,
            artifact: None,
            error: Some(error),
        }
    }
}

/// Outcome of publishing to one external platform.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformPost {
    pub platform: &'static str,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlatformPost {
    pub fn ok(platform: &'static str, url: String) -> Self {
        Self {
            platform,
            success: true,
            url: Some(url),
            error: None,
        }
    }

    pub fn failed(platform: &'static str, error: String) -> Self {
        Self {
            platform,
            success: false,
            url: None,
            error: Some(error),
        }
    }
}

/// Everything one autopilot run produced.
#[derive(Debug, Clone, Serialize)]
pub struct AutopilotReport {
    pub date: NaiveDate,
    pub script_key: &'static str,
    pub formats: Vec<FormatResult>,
    pub posts: Vec<PlatformPost>,
}

impl AutopilotReport {
    /// Number of formats that produced an artifact.
    pub fn succeeded(&self) -> usize {
        self.formats.iter().filter(|r| r.success).count()
    }

    /// Human-readable summary for the notification channels.
    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Daily autopilot {}: {}/{} formats succeeded (script: {})",
            self.date,
            self.succeeded(),
            self.formats.len(),
            self.script_key
        )];

        for result in &self.formats {
            let detail = match (&result.artifact, &result.error) {
                (Some(artifact), _) => artifact.public_url.clone(),
                (None, Some(error)) => format!("failed: {error}"),
                (None, None) => "failed".to_string(),
            };
            lines.push(format!("  {}: {}", result.format, detail));
        }

        for post in &self.posts {
            let detail = match (&post.url, &post.error) {
                (Some(url), _) => url.clone(),
                (None, Some(error)) => format!("failed: {error}"),
                (None, None) => "failed".to_string(),
            };
            lines.push(format!("  {}: {}", post.platform, detail));
        }

        lines.join("\n")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
