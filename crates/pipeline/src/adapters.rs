//! Production implementations of the collaborator ports.
//!
//! Thin delegation only: every method forwards to the concrete client in
//! the owning crate. Anything with behavior worth testing lives there,
//! not here.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use promoloop_core::formats::OutputFormat;
use promoloop_heygen::{HeyGenClient, HeyGenError, RenderJob, RenderSpec, RenderStatus};
use promoloop_media::{
    brand, convert, CompositeError, CompositeOutcome, Compositor, FfmpegError, FfmpegRunner,
};
use promoloop_social::{Notifier, SocialError, TwitterClient, YouTubeClient};
use promoloop_storage::{ArtifactRecord, StorageClient, StorageError};

use crate::ports::{ArtifactStore, AvatarRenderer, MediaTools, SocialChannels};

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// [`AvatarRenderer`] backed by the HeyGen client.
pub struct HeyGenRenderer {
    client: HeyGenClient,
}

impl HeyGenRenderer {
    pub fn new(client: HeyGenClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl AvatarRenderer for HeyGenRenderer {
    fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    async fn submit(&self, spec: &RenderSpec) -> Result<RenderJob, HeyGenError> {
        self.client.generate(spec).await
    }

    async fn status(&self, job_id: &str) -> Result<RenderStatus, HeyGenError> {
        self.client.video_status(job_id).await
    }

    async fn await_completion(&self, job_id: &str) -> Result<String, HeyGenError> {
        self.client.await_completion(job_id).await
    }

    async fn download(&self, url: &str) -> Result<Bytes, HeyGenError> {
        self.client.download(url).await
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// [`ArtifactStore`] backed by the storage vendor client.
pub struct SupabaseStore {
    client: StorageClient,
}

impl SupabaseStore {
    pub fn new(client: StorageClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ArtifactStore for SupabaseStore {
    async fn upload(&self, bytes: Bytes, filename: &str) -> Result<String, StorageError> {
        self.client.upload(bytes, filename).await
    }

    async fn download(&self, url: &str) -> Result<Bytes, StorageError> {
        self.client.download(url).await
    }

    async fn remove_object(&self, filename: &str) -> Result<(), StorageError> {
        self.client.remove_object(filename).await
    }

    async fn promote_to_latest(&self, filename: &str, url: &str) -> Result<(), StorageError> {
        self.client.promote_to_latest(filename, url).await
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<ArtifactRecord>, StorageError> {
        self.client.list_recent(limit).await
    }
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

/// [`MediaTools`] backed by ffmpeg subprocesses.
pub struct FfmpegMediaTools {
    runner: Arc<dyn FfmpegRunner>,
    compositor: Compositor,
}

impl FfmpegMediaTools {
    pub fn new(runner: Arc<dyn FfmpegRunner>) -> Self {
        Self {
            compositor: Compositor::new(runner.clone()),
            runner,
        }
    }
}

#[async_trait::async_trait]
impl MediaTools for FfmpegMediaTools {
    async fn convert_to_mp4(&self, input: &Path, output: &Path) -> Result<PathBuf, FfmpegError> {
        convert::convert_to_mp4(self.runner.as_ref(), input, output).await
    }

    async fn composite(
        &self,
        background: &Path,
        foreground: &Path,
        output: &Path,
        format: &OutputFormat,
        label: &str,
    ) -> Result<CompositeOutcome, CompositeError> {
        self.compositor
            .composite(background, foreground, output, format, label)
            .await
    }

    async fn apply_branding(
        &self,
        input: &Path,
        output: &Path,
        label: &str,
    ) -> Result<PathBuf, FfmpegError> {
        brand::apply_branding(self.runner.as_ref(), input, output, label).await
    }
}

// ---------------------------------------------------------------------------
// Social
// ---------------------------------------------------------------------------

/// [`SocialChannels`] bundling the three platform clients.
pub struct SocialSuite {
    youtube: YouTubeClient,
    twitter: TwitterClient,
    notifier: Notifier,
}

impl SocialSuite {
    pub fn new(youtube: YouTubeClient, twitter: TwitterClient, notifier: Notifier) -> Self {
        Self {
            youtube,
            twitter,
            notifier,
        }
    }
}

#[async_trait::async_trait]
impl SocialChannels for SocialSuite {
    fn youtube_configured(&self) -> bool {
        self.youtube.is_configured()
    }

    fn twitter_configured(&self) -> bool {
        self.twitter.is_configured()
    }

    async fn post_youtube(
        &self,
        video: Bytes,
        title: &str,
        description: &str,
    ) -> Result<String, SocialError> {
        self.youtube.upload(video, title, description).await
    }

    async fn post_twitter(&self, text: &str) -> Result<String, SocialError> {
        self.twitter.post(text).await
    }

    async fn notify(&self, message: &str) {
        self.notifier.broadcast(message).await;
    }
}
