//! The video pipeline.
//!
//! Drives one request through
//! Idle → BackgroundAcquired → RenderSubmitted → RenderCompleted →
//! Composited → Published → Done, absorbing any failure into
//! `Failed(reason)`. Background trouble is the one exception to
//! fail-fast: the full pipeline degrades to an avatar-only render rather
//! than losing the day's video.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use promoloop_core::catalog;
use promoloop_core::demo::{DemoSource, DemoType};
use promoloop_core::formats::{format_for, FormatKey, OutputFormat, FORMATS};
use promoloop_core::naming::artifact_filename;
use promoloop_core::rotation;
use promoloop_heygen::{Background, RenderSpec, RenderStatus};
use promoloop_media::{BackgroundRecorder, RecorderError};
use promoloop_storage::ArtifactRecord;

use crate::error::PipelineError;
use crate::ports::{ArtifactStore, AvatarRenderer, MediaTools, SocialChannels};
use crate::types::{
    AutopilotReport, CreateOutcome, DeliveryMode, FormatResult, PipelineState, PlatformPost,
    VideoArtifact,
};

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Filesystem and branding knobs for pipeline runs.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Scratch space for per-run temp files.
    pub work_dir: PathBuf,
    /// Pre-recorded demo clips, keyed by the asset names in the demo
    /// catalog.
    pub assets_dir: PathBuf,
    /// Watermark text drawn on composited videos.
    pub brand_label: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            work_dir: std::env::temp_dir().join("promoloop"),
            assets_dir: PathBuf::from("assets"),
            brand_label: "themora.io".to_string(),
        }
    }
}

/// How the render submission will get its background.
enum RenderPlan {
    /// The vendor composites over the staged clip; `staged_object` is the
    /// temporary storage object holding it.
    VendorBackground { url: String, staged_object: String },
    /// Render against pure green, then key locally over `clip`.
    LocalComposite { clip: PathBuf },
    /// No background available: flat backdrop, avatar-only result.
    Flat,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Orchestrates renders, compositing, publishing, and social posting.
///
/// One instance is shared across requests; per-run scratch files live in
/// a uuid-named directory under [`PipelineSettings::work_dir`] and are
/// removed best-effort when the run ends.
pub struct VideoPipeline {
    renderer: Arc<dyn AvatarRenderer>,
    store: Arc<dyn ArtifactStore>,
    media: Arc<dyn MediaTools>,
    recorder: Option<Arc<dyn BackgroundRecorder>>,
    social: Arc<dyn SocialChannels>,
    settings: PipelineSettings,
}

impl VideoPipeline {
    pub fn new(
        renderer: Arc<dyn AvatarRenderer>,
        store: Arc<dyn ArtifactStore>,
        media: Arc<dyn MediaTools>,
        recorder: Option<Arc<dyn BackgroundRecorder>>,
        social: Arc<dyn SocialChannels>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            renderer,
            store,
            media,
            recorder,
            social,
            settings,
        }
    }

    // -- avatar-only --------------------------------------------------------

    /// Render an avatar video on a flat backdrop and publish it.
    ///
    /// With `wait` false this returns right after submission
    /// ([`CreateOutcome::Started`]); the caller polls the job id and no
    /// artifact is published.
    pub async fn create_avatar_video(
        &self,
        topic: Option<&str>,
        wait: bool,
    ) -> Result<CreateOutcome, PipelineError> {
        let result = self.run_avatar_video(topic, wait).await;
        if let Err(e) = &result {
            tracing::warn!(state = %PipelineState::Failed(e.to_string()), "Avatar pipeline aborted");
        }
        result
    }

    async fn run_avatar_video(
        &self,
        topic: Option<&str>,
        wait: bool,
    ) -> Result<CreateOutcome, PipelineError> {
        let today = Utc::now().date_naive();
        let script = rotation::resolve_script(topic, today);
        let avatar = catalog::random_avatar();
        let voice = catalog::voice_for(script.language, avatar.gender);
        let backdrop = catalog::random_backdrop();

        tracing::info!(
            script = script.key,
            language = script.language.as_str(),
            avatar = avatar.name,
            backdrop,
            "Creating avatar video"
        );

        let mut state = PipelineState::Idle;

        let spec = RenderSpec::new(
            script.body.to_string(),
            avatar.id.to_string(),
            voice.to_string(),
        )
        .with_background(Background::Color {
            value: backdrop.to_string(),
        });

        let job = self.renderer.submit(&spec).await?;
        advance(&mut state, PipelineState::RenderSubmitted);

        if !wait {
            tracing::info!(job_id = %job.id, "Returning without waiting for render");
            return Ok(CreateOutcome::Started {
                job_id: job.id,
                avatar: avatar.name,
            });
        }

        let vendor_url = self.renderer.await_completion(&job.id).await?;
        advance(&mut state, PipelineState::RenderCompleted);

        let video = self.renderer.download(&vendor_url).await?;
        let filename = artifact_filename(script.key, FormatKey::Landscape, Utc::now());
        let public_url = self.store.upload(video, &filename).await?;
        advance(&mut state, PipelineState::Published);

        self.store.promote_to_latest(&filename, &public_url).await?;
        advance(&mut state, PipelineState::Done);

        Ok(CreateOutcome::Published(VideoArtifact {
            job_id: job.id,
            filename,
            public_url,
            vendor_url,
            title: script.title.to_string(),
            script_key: script.key,
            language: script.language,
            avatar: avatar.name,
            format: FormatKey::Landscape,
            mode: DeliveryMode::AvatarOnly,
        }))
    }

    // -- full pipeline ------------------------------------------------------

    /// Render an avatar video over a website demo background.
    ///
    /// Background acquisition failures degrade the run to an avatar-only
    /// result (`DeliveryMode::Fallback`); they never fail the request.
    /// `promote` controls whether the published artifact claims the daily
    /// latest slot.
    pub async fn create_full_video(
        &self,
        topic: Option<&str>,
        format_key: FormatKey,
        promote: bool,
    ) -> Result<VideoArtifact, PipelineError> {
        let run_dir = self.settings.work_dir.join(format!("run-{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&run_dir).await?;

        let result = self
            .run_full_video(topic, format_key, promote, &run_dir)
            .await;

        cleanup_dir(&run_dir).await;

        if let Err(e) = &result {
            tracing::warn!(
                format = %format_key,
                state = %PipelineState::Failed(e.to_string()),
                "Full pipeline aborted"
            );
        }
        result
    }

    async fn run_full_video(
        &self,
        topic: Option<&str>,
        format_key: FormatKey,
        promote: bool,
        run_dir: &Path,
    ) -> Result<VideoArtifact, PipelineError> {
        let today = Utc::now().date_naive();
        let script = rotation::resolve_script(topic, today);
        let demo = rotation::resolve_demo(topic, today);
        let avatar = catalog::random_avatar();
        let voice = catalog::voice_for(script.language, avatar.gender);
        let format = format_for(format_key);

        tracing::info!(
            script = script.key,
            demo = demo.key,
            avatar = avatar.name,
            format = %format_key,
            "Starting full video pipeline"
        );

        let mut state = PipelineState::Idle;

        // Background acquisition. Failure never aborts the run.
        let background = match self.acquire_background(demo, format, run_dir).await {
            Ok(clip) => {
                advance(&mut state, PipelineState::BackgroundAcquired);
                Some(clip)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Background unavailable, continuing avatar-only");
                None
            }
        };

        // Prefer vendor-side compositing; fall back to local keying when
        // the clip cannot be staged for the vendor.
        let plan = match background {
            Some(clip) => match self.stage_background_clip(&clip, run_dir).await {
                Ok((url, staged_object)) => RenderPlan::VendorBackground { url, staged_object },
                Err(e) => {
                    tracing::warn!(error = %e, "Background staging failed, switching to local compositing");
                    RenderPlan::LocalComposite { clip }
                }
            },
            None => RenderPlan::Flat,
        };

        let background_input = match &plan {
            RenderPlan::VendorBackground { url, .. } => Background::Video { url: url.clone() },
            RenderPlan::LocalComposite { .. } => Background::Color {
                value: catalog::CHROMA_GREEN.to_string(),
            },
            RenderPlan::Flat => Background::Color {
                value: catalog::random_backdrop().to_string(),
            },
        };

        let spec = RenderSpec::new(
            script.body.to_string(),
            avatar.id.to_string(),
            voice.to_string(),
        )
        .with_geometry(
            format.width,
            format.height,
            format.aspect_ratio,
            format.avatar_scale,
            format.avatar_offset_x,
            format.avatar_offset_y,
        )
        .with_background(background_input);

        let job = self.renderer.submit(&spec).await?;
        advance(&mut state, PipelineState::RenderSubmitted);

        let vendor_url = self.renderer.await_completion(&job.id).await?;
        advance(&mut state, PipelineState::RenderCompleted);

        let rendered = self.renderer.download(&vendor_url).await?;

        // The vendor has fetched the staged clip by now; drop it.
        if let RenderPlan::VendorBackground { staged_object, .. } = &plan {
            if let Err(e) = self.store.remove_object(staged_object).await {
                tracing::warn!(object = %staged_object, error = %e, "Staged background cleanup failed");
            }
        }

        let (video, mode) = match plan {
            RenderPlan::VendorBackground { .. } => {
                // Already composited server-side; branding failure keeps
                // the unbranded video.
                let raw = run_dir.join("vendor.mp4");
                tokio::fs::write(&raw, &rendered).await?;
                let branded = run_dir.join("branded.mp4");
                match self
                    .media
                    .apply_branding(&raw, &branded, &self.settings.brand_label)
                    .await
                {
                    Ok(path) => {
                        let bytes = tokio::fs::read(&path).await?;
                        (Bytes::from(bytes), DeliveryMode::VendorBackground)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Branding overlay failed, publishing unbranded video");
                        (rendered, DeliveryMode::VendorBackground)
                    }
                }
            }
            RenderPlan::LocalComposite { clip } => {
                let foreground = run_dir.join("avatar.mp4");
                tokio::fs::write(&foreground, &rendered).await?;
                let output = run_dir.join("composited.mp4");
                let outcome = self
                    .media
                    .composite(&clip, &foreground, &output, format, &self.settings.brand_label)
                    .await?;
                let bytes = tokio::fs::read(&outcome.output).await?;
                (Bytes::from(bytes), DeliveryMode::Composite)
            }
            RenderPlan::Flat => (rendered, DeliveryMode::Fallback),
        };
        advance(&mut state, PipelineState::Composited);

        let filename = artifact_filename(script.key, format_key, Utc::now());
        let public_url = self.store.upload(video, &filename).await?;
        advance(&mut state, PipelineState::Published);

        if promote {
            self.store.promote_to_latest(&filename, &public_url).await?;
        }
        advance(&mut state, PipelineState::Done);

        Ok(VideoArtifact {
            job_id: job.id,
            filename,
            public_url,
            vendor_url,
            title: script.title.to_string(),
            script_key: script.key,
            language: script.language,
            avatar: avatar.name,
            format: format_key,
            mode,
        })
    }

    /// Produce the background clip for a demo: drive the recorder for
    /// live demos, resolve the shipped asset for recorded ones.
    async fn acquire_background(
        &self,
        demo: &DemoType,
        format: &OutputFormat,
        run_dir: &Path,
    ) -> Result<PathBuf, PipelineError> {
        match &demo.source {
            DemoSource::Recorded { asset } => {
                let path = self.settings.assets_dir.join(asset);
                if path.exists() {
                    tracing::info!(asset = %path.display(), "Using pre-recorded demo clip");
                    Ok(path)
                } else {
                    Err(PipelineError::Recorder(RecorderError::MissingOutput(
                        path.to_string_lossy().to_string(),
                    )))
                }
            }
            DemoSource::Live { steps } => {
                let recorder = self
                    .recorder
                    .as_ref()
                    .ok_or(PipelineError::RecorderUnavailable)?;
                let output = run_dir.join("background.webm");
                let clip = recorder
                    .record(steps, format.width, format.height, &output)
                    .await?;
                Ok(clip)
            }
        }
    }

    /// Convert the clip to mp4 and upload it so the vendor can fetch it.
    ///
    /// Returns the public URL and the object name for later cleanup.
    async fn stage_background_clip(
        &self,
        clip: &Path,
        run_dir: &Path,
    ) -> Result<(String, String), PipelineError> {
        let mp4 = run_dir.join("background.mp4");
        self.media.convert_to_mp4(clip, &mp4).await?;

        let bytes = tokio::fs::read(&mp4).await?;
        let object = format!("backgrounds/bg-{}.mp4", Uuid::new_v4());
        let url = self.store.upload(Bytes::from(bytes), &object).await?;
        Ok((url, object))
    }

    // -- fan-out ------------------------------------------------------------

    /// Run the full pipeline once per format, sequentially.
    ///
    /// Failures are isolated per format; only the canonical landscape
    /// output claims the daily latest slot.
    pub async fn create_multi_format(
        &self,
        topic: Option<&str>,
        formats: &[FormatKey],
    ) -> Vec<FormatResult> {
        let mut results = Vec::with_capacity(formats.len());
        for &format in formats {
            let promote = format == FormatKey::Landscape;
            match self.create_full_video(topic, format, promote).await {
                Ok(artifact) => results.push(FormatResult::ok(artifact)),
                Err(e) => {
                    tracing::error!(format = %format, error = %e, "Format pipeline failed");
                    results.push(FormatResult::failed(format, e.to_string()));
                }
            }
        }
        results
    }

    // -- autopilot ----------------------------------------------------------

    /// The scheduled daily run: fan out over every format, post the
    /// successes to the social platforms, then broadcast a summary.
    ///
    /// Never fails; every problem ends up in the report.
    pub async fn run_autopilot(&self, topic: Option<&str>) -> AutopilotReport {
        let today = Utc::now().date_naive();
        let script = rotation::resolve_script(topic, today);
        let all: Vec<FormatKey> = FORMATS.iter().map(|f| f.key).collect();

        tracing::info!(script = script.key, "Autopilot run started");
        let formats = self.create_multi_format(topic, &all).await;

        let mut posts = Vec::new();
        let landscape = formats
            .iter()
            .find(|r| r.format == FormatKey::Landscape)
            .and_then(|r| r.artifact.as_ref());

        // YouTube gets the landscape cut only.
        if let Some(artifact) = landscape {
            if self.social.youtube_configured() {
                posts.push(self.publish_youtube(artifact).await);
            } else {
                tracing::debug!("YouTube not configured, skipping");
            }
        }

        // Twitter announces the best available link.
        if formats.iter().any(|r| r.success) && self.social.twitter_configured() {
            let link = posts
                .iter()
                .find(|p| p.platform == "youtube" && p.success)
                .and_then(|p| p.url.clone())
                .or_else(|| {
                    formats
                        .iter()
                        .filter_map(|r| r.artifact.as_ref())
                        .next()
                        .map(|a| a.public_url.clone())
                });
            if let Some(link) = link {
                let text = format!("{}\n{link}", script.title);
                posts.push(match self.social.post_twitter(&text).await {
                    Ok(url) => PlatformPost::ok("twitter", url),
                    Err(e) => {
                        tracing::warn!(error = %e, "Tweet failed");
                        PlatformPost::failed("twitter", e.to_string())
                    }
                });
            }
        }

        let report = AutopilotReport {
            date: today,
            script_key: script.key,
            formats,
            posts,
        };

        self.social.notify(&report.summary()).await;
        tracing::info!(
            succeeded = report.succeeded(),
            total = report.formats.len(),
            "Autopilot run finished"
        );
        report
    }

    async fn publish_youtube(&self, artifact: &VideoArtifact) -> PlatformPost {
        let video = match self.store.download(&artifact.public_url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "Could not fetch artifact for YouTube");
                return PlatformPost::failed("youtube", e.to_string());
            }
        };

        let description = catalog::script_by_key(artifact.script_key)
            .map(|s| format!("{}\n\nhttps://themora.io", s.body))
            .unwrap_or_else(|| "https://themora.io".to_string());

        match self
            .social
            .post_youtube(video, &artifact.title, &description)
            .await
        {
            Ok(url) => PlatformPost::ok("youtube", url),
            Err(e) => {
                tracing::warn!(error = %e, "YouTube upload failed");
                PlatformPost::failed("youtube", e.to_string())
            }
        }
    }

    // -- passthroughs -------------------------------------------------------

    /// One status poll for a render job.
    pub async fn render_status(&self, job_id: &str) -> Result<RenderStatus, PipelineError> {
        Ok(self.renderer.status(job_id).await?)
    }

    /// Recently published artifacts, newest first.
    pub async fn recent_videos(&self, limit: u32) -> Result<Vec<ArtifactRecord>, PipelineError> {
        Ok(self.store.list_recent(limit).await?)
    }

    /// Whether the render vendor credential is present.
    pub fn renderer_configured(&self) -> bool {
        self.renderer.is_configured()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn advance(state: &mut PipelineState, next: PipelineState) {
    tracing::debug!(from = %state, to = %next, "Pipeline state");
    *state = next;
}

async fn cleanup_dir(dir: &Path) {
    if let Err(e) = tokio::fs::remove_dir_all(dir).await {
        tracing::warn!(dir = %dir.display(), error = %e, "Temp cleanup failed");
    }
}
