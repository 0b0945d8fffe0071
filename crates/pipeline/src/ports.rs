//! Collaborator ports.
//!
//! Each external system the pipeline touches sits behind a small async
//! trait, so the orchestration logic can be driven end to end with
//! in-memory fakes. Production implementations live in
//! [`crate::adapters`]; the background recorder port is
//! [`promoloop_media::BackgroundRecorder`], shared with the media crate.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use promoloop_core::formats::OutputFormat;
use promoloop_heygen::{HeyGenError, RenderJob, RenderSpec, RenderStatus};
use promoloop_media::{CompositeError, CompositeOutcome, FfmpegError};
use promoloop_social::SocialError;
use promoloop_storage::{ArtifactRecord, StorageError};

/// The avatar render vendor: submit, poll, wait, fetch.
#[async_trait::async_trait]
pub trait AvatarRenderer: Send + Sync {
    fn is_configured(&self) -> bool;

    async fn submit(&self, spec: &RenderSpec) -> Result<RenderJob, HeyGenError>;

    /// One status check for a submitted job.
    async fn status(&self, job_id: &str) -> Result<RenderStatus, HeyGenError>;

    /// Block until the job reaches a terminal state; returns the result URL.
    async fn await_completion(&self, job_id: &str) -> Result<String, HeyGenError>;

    async fn download(&self, url: &str) -> Result<Bytes, HeyGenError>;
}

/// Object storage plus the artifact catalog.
#[async_trait::async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Store an object and return its public URL.
    async fn upload(&self, bytes: Bytes, filename: &str) -> Result<String, StorageError>;

    /// Fetch a stored object's bytes by public URL.
    async fn download(&self, url: &str) -> Result<Bytes, StorageError>;

    async fn remove_object(&self, filename: &str) -> Result<(), StorageError>;

    /// Replace the latest-slot artifact with this one.
    async fn promote_to_latest(&self, filename: &str, url: &str) -> Result<(), StorageError>;

    async fn list_recent(&self, limit: u32) -> Result<Vec<ArtifactRecord>, StorageError>;
}

/// Local video processing via the external filter tool.
#[async_trait::async_trait]
pub trait MediaTools: Send + Sync {
    async fn convert_to_mp4(&self, input: &Path, output: &Path) -> Result<PathBuf, FfmpegError>;

    /// Merge the presenter clip over the background through the tier chain.
    async fn composite(
        &self,
        background: &Path,
        foreground: &Path,
        output: &Path,
        format: &OutputFormat,
        label: &str,
    ) -> Result<CompositeOutcome, CompositeError>;

    async fn apply_branding(
        &self,
        input: &Path,
        output: &Path,
        label: &str,
    ) -> Result<PathBuf, FfmpegError>;
}

/// Outbound social platforms.
///
/// The `*_configured` probes let the caller skip platforms without
/// credentials instead of collecting `NotConfigured` failures.
#[async_trait::async_trait]
pub trait SocialChannels: Send + Sync {
    fn youtube_configured(&self) -> bool;

    fn twitter_configured(&self) -> bool;

    async fn post_youtube(
        &self,
        video: Bytes,
        title: &str,
        description: &str,
    ) -> Result<String, SocialError>;

    async fn post_twitter(&self, text: &str) -> Result<String, SocialError>;

    /// Best-effort broadcast to the notification channels; never fails.
    async fn notify(&self, message: &str);
}
