//! Request orchestration for the promo video pipeline.
//!
//! [`VideoPipeline`] wires the collaborator ports together and drives each
//! request through the render/composite/publish state machine. The ports
//! keep the orchestration logic independent of the vendor clients in the
//! sibling crates, so the whole flow can be exercised with in-memory
//! fakes.

pub mod adapters;
pub mod error;
pub mod orchestrator;
pub mod ports;
pub mod types;

pub use error::PipelineError;
pub use orchestrator::{PipelineSettings, VideoPipeline};
pub use ports::{ArtifactStore, AvatarRenderer, MediaTools, SocialChannels};
pub use types::{
    AutopilotReport, CreateOutcome, DeliveryMode, FormatResult, PipelineState, PlatformPost,
    VideoArtifact,
};
