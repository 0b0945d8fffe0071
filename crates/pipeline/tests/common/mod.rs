//! In-memory fakes for the pipeline's collaborator ports.
//!
//! Each fake records the calls it receives and exposes atomic switches
//! that flip it into its failure mode, so tests can steer a pipeline run
//! down any branch without touching the network or spawning processes.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use chrono::Utc;

use promoloop_core::demo::BrowserAction;
use promoloop_core::formats::OutputFormat;
use promoloop_heygen::{HeyGenError, RenderJob, RenderSpec, RenderState, RenderStatus};
use promoloop_media::{
    BackgroundRecorder, CompositeError, CompositeMode, CompositeOutcome, FfmpegError,
    RecorderError,
};
use promoloop_pipeline::{
    ArtifactStore, AvatarRenderer, MediaTools, PipelineSettings, SocialChannels, VideoPipeline,
};
use promoloop_social::SocialError;
use promoloop_storage::{ArtifactRecord, StorageError};

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeRenderer {
    pub unconfigured: AtomicBool,
    /// Zero-based submission ordinals that the vendor rejects.
    pub fail_submit_jobs: Mutex<Vec<usize>>,
    /// Every accepted spec, in call order.
    pub submitted: Mutex<Vec<RenderSpec>>,
    job_counter: AtomicUsize,
}

#[async_trait::async_trait]
impl AvatarRenderer for FakeRenderer {
    fn is_configured(&self) -> bool {
        !self.unconfigured.load(Ordering::SeqCst)
    }

    async fn submit(&self, spec: &RenderSpec) -> Result<RenderJob, HeyGenError> {
        let n = self.job_counter.fetch_add(1, Ordering::SeqCst);
        if self.fail_submit_jobs.lock().unwrap().contains(&n) {
            return Err(HeyGenError::Vendor {
                message: "submission rejected".to_string(),
            });
        }
        self.submitted.lock().unwrap().push(spec.clone());
        Ok(RenderJob {
            id: format!("job-{n}"),
        })
    }

    async fn status(&self, job_id: &str) -> Result<RenderStatus, HeyGenError> {
        Ok(RenderStatus {
            state: RenderState::Completed,
            video_url: Some(format!("https://vendor.example/{job_id}.mp4")),
            error: None,
        })
    }

    async fn await_completion(&self, job_id: &str) -> Result<String, HeyGenError> {
        Ok(format!("https://vendor.example/{job_id}.mp4"))
    }

    async fn download(&self, _url: &str) -> Result<Bytes, HeyGenError> {
        Ok(Bytes::from_static(b"rendered-avatar-bytes"))
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeStore {
    /// Uploads whose filename starts with this prefix are rejected.
    pub fail_upload_prefix: Mutex<Option<String>>,
    /// (filename, byte length) per successful upload.
    pub uploads: Mutex<Vec<(String, usize)>>,
    pub removed: Mutex<Vec<String>>,
    /// The artifact table; promoted rows carry `is_latest`.
    pub rows: Mutex<Vec<ArtifactRecord>>,
    promote_lock: tokio::sync::Mutex<()>,
}

impl FakeStore {
    pub fn latest_rows(&self) -> Vec<ArtifactRecord> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.is_latest)
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl ArtifactStore for FakeStore {
    async fn upload(&self, bytes: Bytes, filename: &str) -> Result<String, StorageError> {
        if let Some(prefix) = self.fail_upload_prefix.lock().unwrap().as_deref() {
            if filename.starts_with(prefix) {
                return Err(StorageError::Api {
                    status: 503,
                    body: "bucket unavailable".to_string(),
                });
            }
        }
        self.uploads
            .lock()
            .unwrap()
            .push((filename.to_string(), bytes.len()));
        Ok(format!("https://store.example/public/videos/{filename}"))
    }

    async fn download(&self, _url: &str) -> Result<Bytes, StorageError> {
        Ok(Bytes::from_static(b"stored-artifact-bytes"))
    }

    async fn remove_object(&self, filename: &str) -> Result<(), StorageError> {
        self.removed.lock().unwrap().push(filename.to_string());
        Ok(())
    }

    /// Mirrors the production promote sequence: read the flagged rows,
    /// delete them, insert the new one, all under one async lock. The
    /// yields between steps give interleaving a chance to corrupt the
    /// slot if the lock were missing.
    async fn promote_to_latest(&self, filename: &str, url: &str) -> Result<(), StorageError> {
        let _guard = self.promote_lock.lock().await;

        let stale: Vec<String> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.is_latest)
            .map(|r| r.filename.clone())
            .collect();
        tokio::task::yield_now().await;

        for name in &stale {
            self.rows.lock().unwrap().retain(|r| &r.filename != name);
        }
        tokio::task::yield_now().await;

        self.rows.lock().unwrap().push(ArtifactRecord {
            filename: filename.to_string(),
            url: url.to_string(),
            is_latest: true,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<ArtifactRecord>, StorageError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().rev().take(limit as usize).cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// Media tools
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeMedia {
    pub fail_convert: AtomicBool,
    pub fail_composite: AtomicBool,
    pub fail_brand: AtomicBool,
    /// (background, foreground) per composite call.
    pub composites: Mutex<Vec<(PathBuf, PathBuf)>>,
    pub brand_labels: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl MediaTools for FakeMedia {
    async fn convert_to_mp4(&self, _input: &Path, output: &Path) -> Result<PathBuf, FfmpegError> {
        if self.fail_convert.load(Ordering::SeqCst) {
            return Err(FfmpegError::ExecutionFailed {
                exit_code: Some(1),
                stderr: "conversion rejected".to_string(),
            });
        }
        tokio::fs::write(output, b"mp4-background-bytes").await?;
        Ok(output.to_path_buf())
    }

    async fn composite(
        &self,
        background: &Path,
        foreground: &Path,
        output: &Path,
        _format: &OutputFormat,
        _label: &str,
    ) -> Result<CompositeOutcome, CompositeError> {
        if self.fail_composite.load(Ordering::SeqCst) {
            return Err(CompositeError::AllTiersFailed {
                last: FfmpegError::ExecutionFailed {
                    exit_code: Some(1),
                    stderr: "keying failed".to_string(),
                },
            });
        }
        self.composites
            .lock()
            .unwrap()
            .push((background.to_path_buf(), foreground.to_path_buf()));
        tokio::fs::write(output, b"composited-bytes")
            .await
            .map_err(FfmpegError::from)?;
        Ok(CompositeOutcome {
            output: output.to_path_buf(),
            mode: CompositeMode::ChromaKeyPrimary,
        })
    }

    async fn apply_branding(
        &self,
        _input: &Path,
        output: &Path,
        label: &str,
    ) -> Result<PathBuf, FfmpegError> {
        if self.fail_brand.load(Ordering::SeqCst) {
            return Err(FfmpegError::ExecutionFailed {
                exit_code: Some(1),
                stderr: "drawtext filter missing".to_string(),
            });
        }
        self.brand_labels.lock().unwrap().push(label.to_string());
        tokio::fs::write(output, b"branded-bytes").await?;
        Ok(output.to_path_buf())
    }
}

// ---------------------------------------------------------------------------
// Recorder
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeRecorder {
    pub fail: AtomicBool,
    /// (step count, width, height) per recording.
    pub recordings: Mutex<Vec<(usize, u32, u32)>>,
}

#[async_trait::async_trait]
impl BackgroundRecorder for FakeRecorder {
    async fn record(
        &self,
        steps: &[BrowserAction],
        width: u32,
        height: u32,
        output: &Path,
    ) -> Result<PathBuf, RecorderError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RecorderError::Failed {
                exit_code: Some(1),
                stderr: "browser crashed".to_string(),
            });
        }
        self.recordings
            .lock()
            .unwrap()
            .push((steps.len(), width, height));
        tokio::fs::write(output, b"webm-recording-bytes").await?;
        Ok(output.to_path_buf())
    }
}

// ---------------------------------------------------------------------------
// Social
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeSocial {
    pub youtube_enabled: AtomicBool,
    pub twitter_enabled: AtomicBool,
    pub fail_youtube: AtomicBool,
    /// (byte length, title) per upload.
    pub youtube_posts: Mutex<Vec<(usize, String)>>,
    pub tweets: Mutex<Vec<String>>,
    pub notifications: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl SocialChannels for FakeSocial {
    fn youtube_configured(&self) -> bool {
        self.youtube_enabled.load(Ordering::SeqCst)
    }

    fn twitter_configured(&self) -> bool {
        self.twitter_enabled.load(Ordering::SeqCst)
    }

    async fn post_youtube(
        &self,
        video: Bytes,
        title: &str,
        _description: &str,
    ) -> Result<String, SocialError> {
        if self.fail_youtube.load(Ordering::SeqCst) {
            return Err(SocialError::Upload("quota exceeded".to_string()));
        }
        self.youtube_posts
            .lock()
            .unwrap()
            .push((video.len(), title.to_string()));
        Ok("https://youtu.be/fake123".to_string())
    }

    async fn post_twitter(&self, text: &str) -> Result<String, SocialError> {
        self.tweets.lock().unwrap().push(text.to_string());
        Ok("https://twitter.com/i/web/status/1".to_string())
    }

    async fn notify(&self, message: &str) {
        self.notifications.lock().unwrap().push(message.to_string());
    }
}

// ---------------------------------------------------------------------------
// Rig
// ---------------------------------------------------------------------------

/// A pipeline wired entirely to fakes, plus handles to inspect them.
pub struct TestRig {
    pub renderer: Arc<FakeRenderer>,
    pub store: Arc<FakeStore>,
    pub media: Arc<FakeMedia>,
    pub recorder: Arc<FakeRecorder>,
    pub social: Arc<FakeSocial>,
    pub pipeline: VideoPipeline,
    dir: tempfile::TempDir,
}

impl TestRig {
    pub fn work_dir(&self) -> PathBuf {
        self.dir.path().join("work")
    }

    pub fn asset_path(&self, name: &str) -> PathBuf {
        self.dir.path().join("assets").join(name)
    }
}

pub fn rig() -> TestRig {
    build_rig(true)
}

/// Rig with no recorder port at all, as on hosts without a browser.
pub fn rig_without_recorder() -> TestRig {
    build_rig(false)
}

fn build_rig(with_recorder: bool) -> TestRig {
    let dir = tempfile::tempdir().expect("tempdir");
    let renderer = Arc::new(FakeRenderer::default());
    let store = Arc::new(FakeStore::default());
    let media = Arc::new(FakeMedia::default());
    let recorder = Arc::new(FakeRecorder::default());
    let social = Arc::new(FakeSocial::default());

    let settings = PipelineSettings {
        work_dir: dir.path().join("work"),
        assets_dir: dir.path().join("assets"),
        brand_label: "themora.io".to_string(),
    };

    let recorder_port: Option<Arc<dyn BackgroundRecorder>> = if with_recorder {
        Some(recorder.clone())
    } else {
        None
    };

    let pipeline = VideoPipeline::new(
        renderer.clone(),
        store.clone(),
        media.clone(),
        recorder_port,
        social.clone(),
        settings,
    );

    TestRig {
        renderer,
        store,
        media,
        recorder,
        social,
        pipeline,
        dir,
    }
}

/// Place a pre-recorded demo clip where the rig's pipeline will look for
/// it.
pub async fn seed_asset(rig: &TestRig, name: &str) {
    let assets = rig.dir.path().join("assets");
    tokio::fs::create_dir_all(&assets).await.expect("assets dir");
    tokio::fs::write(assets.join(name), b"recorded-demo-bytes")
        .await
        .expect("seed asset");
}
