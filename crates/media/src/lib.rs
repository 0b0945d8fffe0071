//! External-tool drivers for the video pipeline.
//!
//! Everything here shells out: ffmpeg for compositing, conversion, and
//! branding, and a Playwright CLI for background screen recordings.
//!
//! - [`ffmpeg`] -- the [`FfmpegRunner`] process abstraction and its
//!   system implementation.
//! - [`composite`] -- the three-tier chroma-key fallback chain.
//! - [`convert`] -- recorder output (webm) to mp4.
//! - [`brand`] -- label/logo overlay for vendor-composited clips.
//! - [`recorder`] -- the [`BackgroundRecorder`] collaborator and its
//!   Playwright subprocess driver.

pub mod brand;
pub mod composite;
pub mod convert;
pub mod ffmpeg;
pub mod recorder;

pub use composite::{CompositeError, CompositeMode, CompositeOutcome, Compositor, COMPOSITE_TIERS};
pub use ffmpeg::{FfmpegError, FfmpegRunner, SystemFfmpeg};
pub use recorder::{BackgroundRecorder, PlaywrightRecorder, RecorderError, RecorderSettings};
