//! Background screen-recorder collaborator.
//!
//! The recorder itself is an external Playwright CLI: it receives the
//! browser steps as JSON on stdin, drives a headless browser at the
//! requested viewport, and writes a webm at the path given by `--out`.
//! This module owns spawning it, feeding it, and policing its deadline.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use promoloop_core::demo::BrowserAction;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;

/// Recordings that run longer than this are killed.
pub const DEFAULT_RECORD_TIMEOUT: Duration = Duration::from_secs(120);

/// Errors from the recorder collaborator.
#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    #[error("recorder binary not found: {0}")]
    Spawn(std::io::Error),

    #[error("recording failed (exit code {exit_code:?}): {stderr}")]
    Failed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("recording timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    #[error("recorder exited without producing {0}")]
    MissingOutput(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Produces a background clip for a scripted browser session.
#[async_trait::async_trait]
pub trait BackgroundRecorder: Send + Sync {
    /// Drive the steps at the given viewport and return the recorded
    /// clip's path.
    async fn record(
        &self,
        steps: &[BrowserAction],
        width: u32,
        height: u32,
        output: &Path,
    ) -> Result<PathBuf, RecorderError>;
}

/// Launch settings for the Playwright recorder CLI.
#[derive(Debug, Clone)]
pub struct RecorderSettings {
    /// Interpreter binary, normally `node`.
    pub binary: PathBuf,
    /// Path to the recorder script.
    pub script: PathBuf,
    pub timeout: Duration,
}

impl RecorderSettings {
    pub fn new(binary: PathBuf, script: PathBuf) -> Self {
        Self {
            binary,
            script,
            timeout: DEFAULT_RECORD_TIMEOUT,
        }
    }
}

/// Build the stdin payload for the recorder CLI.
pub fn record_payload(steps: &[BrowserAction], width: u32, height: u32) -> serde_json::Value {
    json!({
        "steps": steps,
        "viewport": { "width": width, "height": height },
    })
}

/// Production recorder: spawns the Playwright CLI as a child process.
pub struct PlaywrightRecorder {
    settings: RecorderSettings,
}

impl PlaywrightRecorder {
    pub fn new(settings: RecorderSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl BackgroundRecorder for PlaywrightRecorder {
    async fn record(
        &self,
        steps: &[BrowserAction],
        width: u32,
        height: u32,
        output: &Path,
    ) -> Result<PathBuf, RecorderError> {
        tracing::info!(
            steps = steps.len(),
            width,
            height,
            output = %output.display(),
            "Starting screen recording"
        );

        let mut cmd = Command::new(&self.settings.binary);
        cmd.arg(&self.settings.script)
            .arg("--out")
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let start = Instant::now();
        let mut child = cmd.spawn().map_err(RecorderError::Spawn)?;

        // Write the step payload to stdin, then close it. Best-effort: if
        // the recorder closes stdin early, the error shows up at wait().
        if let Some(mut stdin) = child.stdin.take() {
            let payload = serde_json::to_vec(&record_payload(steps, width, height))
                .unwrap_or_default();
            let _ = stdin.write_all(&payload).await;
            drop(stdin);
        }

        // Read stderr in a spawned task so `child.wait()` stays callable.
        let stderr_handle = child.stderr.take();
        let stderr_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            if let Some(mut h) = stderr_handle {
                let _ = h.read_to_end(&mut buf).await;
            }
            buf
        });

        // On timeout `child` is dropped, which kills the recorder because
        // of `kill_on_drop(true)`.
        let wait_result = tokio::time::timeout(self.settings.timeout, child.wait()).await;

        let status = match wait_result {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => return Err(RecorderError::IoError(e)),
            Err(_elapsed) => {
                return Err(RecorderError::Timeout {
                    elapsed_ms: start.elapsed().as_millis() as u64,
                });
            }
        };

        if !status.success() {
            let stderr_bytes = stderr_task.await.unwrap_or_default();
            return Err(RecorderError::Failed {
                exit_code: status.code(),
                stderr: String::from_utf8_lossy(&stderr_bytes).to_string(),
            });
        }

        if !output.exists() {
            return Err(RecorderError::MissingOutput(
                output.to_string_lossy().to_string(),
            ));
        }

        tracing::info!(output = %output.display(), elapsed_ms = start.elapsed().as_millis() as u64, "Recording saved");
        Ok(output.to_path_buf())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
