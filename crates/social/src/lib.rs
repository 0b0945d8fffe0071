//! Social publishing clients.
//!
//! Three outward-facing integrations, all deliberately thin:
//!
//! - [`youtube`] -- OAuth refresh-token grant plus resumable upload.
//! - [`twitter`] -- OAuth 1.0a request signing and short-text posting.
//! - [`notify`] -- best-effort status broadcasts to Telegram and Discord.

pub mod error;
pub mod notify;
pub mod twitter;
pub mod youtube;

pub use error::SocialError;
pub use notify::{Notifier, NotifierSettings};
pub use twitter::{TwitterClient, TwitterCredentials};
pub use youtube::{YouTubeClient, YouTubeCredentials};
