//! Three-tier chroma-key compositing.
//!
//! The presenter clip arrives on a pure-green backdrop. Tier one keys it
//! out numerically, tier two keys by color name in case the numeric
//! filter misbehaves, and tier three gives up on keying and overlays the
//! clip as-is. A visible green box beats shipping no video; the
//! foreground presenter is never dropped.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use promoloop_core::formats::OutputFormat;

use crate::ffmpeg::{require_input, FfmpegError, FfmpegRunner};

/// Pure-green backdrop the render vendor produces for keying.
const KEY_COLOR: &str = "0x00FF00";

/// Pixel inset for the overlay corner and the label box.
const OVERLAY_INSET: u32 = 48;

/// One keying strategy in the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// Numeric color key tuned for the vendor's green backdrop.
    ChromaKeyPrimary,
    /// Named-color key, for installs where `chromakey` is unavailable or
    /// inconsistent.
    ChromaKeyFallback,
    /// No keying at all: plain picture-in-picture overlay.
    NoKeyOverlay,
}

impl CompositeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompositeMode::ChromaKeyPrimary => "chromakey",
            CompositeMode::ChromaKeyFallback => "colorkey",
            CompositeMode::NoKeyOverlay => "overlay",
        }
    }
}

impl std::fmt::Display for CompositeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tier order. Each tier runs only if the previous one's process exited
/// non-zero; the last tier's failure is fatal.
pub const COMPOSITE_TIERS: &[CompositeMode] = &[
    CompositeMode::ChromaKeyPrimary,
    CompositeMode::ChromaKeyFallback,
    CompositeMode::NoKeyOverlay,
];

/// Errors from the compositing chain.
#[derive(Debug, thiserror::Error)]
pub enum CompositeError {
    /// Every tier's ffmpeg invocation failed; carries the last failure.
    #[error("all composite tiers failed; last: {last}")]
    AllTiersFailed {
        #[source]
        last: FfmpegError,
    },

    /// A failure outside the tier chain (missing input file, I/O).
    #[error(transparent)]
    Ffmpeg(#[from] FfmpegError),
}

/// A successful composite and the tier that produced it.
#[derive(Debug, Clone)]
pub struct CompositeOutcome {
    pub output: PathBuf,
    pub mode: CompositeMode,
}

/// Build the filter graph for one tier.
///
/// All tiers share the same shape: normalize the background to the
/// output geometry, scale the presenter down by the format's divisor,
/// overlay bottom-right at a fixed inset, then draw the label box and
/// text. Only the keying step differs.
pub fn filter_graph(mode: CompositeMode, format: &OutputFormat, label: &str) -> String {
    let key_filter = match mode {
        CompositeMode::ChromaKeyPrimary => format!("chromakey={KEY_COLOR}:0.30:0.10,"),
        CompositeMode::ChromaKeyFallback => "colorkey=green:0.35:0.15,".to_string(),
        CompositeMode::NoKeyOverlay => String::new(),
    };

    format!(
        "[0:v]scale={w}:{h}[bg];\
         [1:v]{key_filter}scale=iw/{div}:-2[fg];\
         [bg][fg]overlay=x=main_w-overlay_w-{inset}:y=main_h-overlay_h-{inset}[comp];\
         [comp]drawbox=x={inset}:y={inset}:w=420:h=72:color=black@0.55:t=fill,\
         drawtext=text='{label}':x={tx}:y={ty}:fontsize=36:fontcolor=white[out]",
        w = format.width,
        h = format.height,
        div = format.pip_divisor,
        inset = OVERLAY_INSET,
        tx = OVERLAY_INSET + 24,
        ty = OVERLAY_INSET + 18,
    )
}

/// Build the full ffmpeg argument list for one tier.
///
/// The presenter clip's audio track (the voice) is mapped through;
/// the background recording is video-only.
pub fn composite_args(
    background: &Path,
    foreground: &Path,
    output: &Path,
    mode: CompositeMode,
    format: &OutputFormat,
    label: &str,
) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-i".to_string(),
        background.to_string_lossy().to_string(),
        "-i".to_string(),
        foreground.to_string_lossy().to_string(),
        "-filter_complex".to_string(),
        filter_graph(mode, format, label),
        "-map".to_string(),
        "[out]".to_string(),
        "-map".to_string(),
        "1:a?".to_string(),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-preset".to_string(),
        "veryfast".to_string(),
        "-crf".to_string(),
        "23".to_string(),
        "-c:a".to_string(),
        "aac".to_string(),
        "-movflags".to_string(),
        "+faststart".to_string(),
        output.to_string_lossy().to_string(),
    ]
}

/// Runs the tier chain against an [`FfmpegRunner`].
pub struct Compositor {
    runner: Arc<dyn FfmpegRunner>,
}

impl Compositor {
    pub fn new(runner: Arc<dyn FfmpegRunner>) -> Self {
        Self { runner }
    }

    /// Merge a presenter clip over a background clip.
    ///
    /// Tries [`COMPOSITE_TIERS`] in order; a tier is attempted only when
    /// the previous one's process failed. Returns the first success and
    /// which tier produced it, or [`CompositeError::AllTiersFailed`]
    /// when the chain is exhausted.
    pub async fn composite(
        &self,
        background: &Path,
        foreground: &Path,
        output: &Path,
        format: &OutputFormat,
        label: &str,
    ) -> Result<CompositeOutcome, CompositeError> {
        require_input(background)?;
        require_input(foreground)?;

        let mut last_err: Option<FfmpegError> = None;

        for mode in COMPOSITE_TIERS {
            let args = composite_args(background, foreground, output, *mode, format, label);
            match self.runner.run(&args).await {
                Ok(()) => {
                    tracing::info!(tier = %mode, output = %output.display(), "Composite complete");
                    return Ok(CompositeOutcome {
                        output: output.to_path_buf(),
                        mode: *mode,
                    });
                }
                Err(err) => {
                    tracing::warn!(tier = %mode, error = %err, "Composite tier failed");
                    last_err = Some(err);
                }
            }
        }

        match last_err {
            Some(last) => Err(CompositeError::AllTiersFailed { last }),
            None => Err(CompositeError::Ffmpeg(FfmpegError::ExecutionFailed {
                exit_code: None,
                stderr: "no composite tiers configured".to_string(),
            })),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
