//! FFmpeg process abstraction.
//!
//! The pipeline never calls the binary directly; it goes through
//! [`FfmpegRunner`] so the compositor's tier-fallback logic is testable
//! with scripted runners instead of a real encode.

use std::path::Path;

/// Error type for ffmpeg invocations.
#[derive(Debug, thiserror::Error)]
pub enum FfmpegError {
    #[error("ffmpeg binary not found: {0}")]
    NotFound(std::io::Error),

    #[error("ffmpeg execution failed (exit code {exit_code:?}): {stderr}")]
    ExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("video file not found: {0}")]
    VideoNotFound(String),
}

/// Runs one ffmpeg invocation to completion.
#[async_trait::async_trait]
pub trait FfmpegRunner: Send + Sync {
    /// Run `ffmpeg` with the given arguments. A non-zero exit becomes
    /// [`FfmpegError::ExecutionFailed`] carrying the captured stderr.
    async fn run(&self, args: &[String]) -> Result<(), FfmpegError>;
}

/// Production runner: spawns the `ffmpeg` binary on `PATH`.
pub struct SystemFfmpeg;

#[async_trait::async_trait]
impl FfmpegRunner for SystemFfmpeg {
    async fn run(&self, args: &[String]) -> Result<(), FfmpegError> {
        let output = tokio::process::Command::new("ffmpeg")
            .args(args)
            .output()
            .await
            .map_err(FfmpegError::NotFound)?;

        if !output.status.success() {
            return Err(FfmpegError::ExecutionFailed {
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(())
    }
}

/// Check that an input file exists before invoking ffmpeg.
pub fn require_input(path: &Path) -> Result<(), FfmpegError> {
    if !path.exists() {
        return Err(FfmpegError::VideoNotFound(
            path.to_string_lossy().to_string(),
        ));
    }
    Ok(())
}
