//! Request handlers.
//!
//! Each submodule provides async handler functions for one endpoint
//! group. Handlers delegate to the shared [`VideoPipeline`] and map
//! errors via [`AppError`].
//!
//! [`VideoPipeline`]: promoloop_pipeline::VideoPipeline
//! [`AppError`]: crate::error::AppError

pub mod catalog;
pub mod health;
pub mod production;
pub mod videos;
