//! Branding overlay for vendor-composited clips.
//!
//! When the render vendor composites the background server-side, the
//! local chain is skipped entirely; this pass draws the same label box
//! the compositor would have. Callers fall back to the unbranded clip
//! if it fails.

use std::path::{Path, PathBuf};

use crate::ffmpeg::{require_input, FfmpegError, FfmpegRunner};

/// Argument list for the label overlay. Audio is copied through
/// untouched.
pub fn branding_args(input: &Path, output: &Path, label: &str) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-i".to_string(),
        input.to_string_lossy().to_string(),
        "-vf".to_string(),
        format!(
            "drawbox=x=48:y=48:w=420:h=72:color=black@0.55:t=fill,\
             drawtext=text='{label}':x=72:y=66:fontsize=36:fontcolor=white"
        ),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-preset".to_string(),
        "veryfast".to_string(),
        "-crf".to_string(),
        "23".to_string(),
        "-c:a".to_string(),
        "copy".to_string(),
        output.to_string_lossy().to_string(),
    ]
}

/// Draw the label over a finished clip and return the output path.
pub async fn apply_branding(
    runner: &dyn FfmpegRunner,
    input: &Path,
    output: &Path,
    label: &str,
) -> Result<PathBuf, FfmpegError> {
    require_input(input)?;
    runner.run(&branding_args(input, output, label)).await?;
    tracing::info!(output = %output.display(), "Branding overlay applied");
    Ok(output.to_path_buf())
}
