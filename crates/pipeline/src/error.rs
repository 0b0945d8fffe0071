//! Error type for pipeline runs.

use promoloop_heygen::HeyGenError;
use promoloop_media::{CompositeError, FfmpegError, RecorderError};
use promoloop_storage::StorageError;

/// Errors that abort a pipeline run.
///
/// Background-producer errors ([`Recorder`](PipelineError::Recorder),
/// [`RecorderUnavailable`](PipelineError::RecorderUnavailable)) are caught
/// inside the full pipeline and degrade the run to avatar-only; every
/// other variant fails the request or format that hit it.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("render vendor error: {0}")]
    Render(#[from] HeyGenError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("compositing error: {0}")]
    Composite(#[from] CompositeError),

    #[error("video tool error: {0}")]
    Ffmpeg(#[from] FfmpegError),

    #[error("recorder error: {0}")]
    Recorder(#[from] RecorderError),

    #[error("no screen recorder configured")]
    RecorderUnavailable,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
