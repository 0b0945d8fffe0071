//! REST client for the HeyGen avatar-video API.
//!
//! Submits text-to-avatar render jobs, polls them to a terminal state,
//! and downloads finished clips:
//!
//! - [`HeyGenClient`] -- the HTTP wrapper (submit / status / download).
//! - [`poll::wait_for_completion`] -- the fixed-interval wait loop with a
//!   hard deadline, kept generic so its timing behavior is testable
//!   without a vendor.
//! - [`types`] -- the four-state render lifecycle and vendor-payload
//!   normalization.

pub mod api;
pub mod poll;
pub mod types;

pub use api::{Background, HeyGenClient, HeyGenError, HeyGenSettings, RenderJob, RenderSpec};
pub use types::{RenderState, RenderStatus};
