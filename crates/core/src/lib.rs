//! Shared domain types for the promoloop video pipeline.
//!
//! This crate holds everything the rendering and publishing crates agree
//! on but none of them own:
//!
//! - [`catalog`] -- the static promo content: scripts, avatar profiles,
//!   voice mapping, backdrop colors.
//! - [`demo`] -- website demo definitions and the browser-step vocabulary
//!   consumed by the screen recorder.
//! - [`rotation`] -- deterministic day-of-year selection over the catalogs.
//! - [`formats`] -- output format geometry (landscape, portrait, square).
//! - [`naming`] -- artifact filename construction.

pub mod catalog;
pub mod demo;
pub mod formats;
pub mod naming;
pub mod rotation;

pub use catalog::{AvatarProfile, Gender, Language, ScriptEntry};
pub use demo::{BrowserAction, DemoSource, DemoType};
pub use formats::{FormatKey, OutputFormat};
pub use rotation::DailySelection;
