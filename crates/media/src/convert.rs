//! Recorder output conversion.
//!
//! The screen recorder emits webm; both the render vendor's background
//! input and the compositor want mp4.

use std::path::{Path, PathBuf};

use crate::ffmpeg::{require_input, FfmpegError, FfmpegRunner};

/// Argument list for a webm → mp4 re-encode. Recordings carry no audio,
/// so the audio stream is dropped outright.
pub fn convert_args(input: &Path, output: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-i".to_string(),
        input.to_string_lossy().to_string(),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-preset".to_string(),
        "veryfast".to_string(),
        "-crf".to_string(),
        "23".to_string(),
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
        "-an".to_string(),
        output.to_string_lossy().to_string(),
    ]
}

/// Re-encode a recording as mp4 and return the output path.
pub async fn convert_to_mp4(
    runner: &dyn FfmpegRunner,
    input: &Path,
    output: &Path,
) -> Result<PathBuf, FfmpegError> {
    require_input(input)?;
    runner.run(&convert_args(input, output)).await?;
    tracing::info!(input = %input.display(), output = %output.display(), "Converted to mp4");
    Ok(output.to_path_buf())
}
