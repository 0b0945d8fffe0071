//! Fixed-interval completion wait with a hard deadline.
//!
//! Kept generic over the poll call so the timing contract is testable
//! under `tokio::time::pause` without a live vendor.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::api::HeyGenError;
use crate::types::{RenderState, RenderStatus};

/// Poll until the job completes, fails, or the deadline passes.
///
/// One status check per `interval`. Returns the result URL as soon as a
/// poll observes `Completed` with a non-empty URL. A `Failed` observation
/// short-circuits with [`HeyGenError::RenderFailed`]; crossing `max_wait`
/// raises [`HeyGenError::Timeout`]. A `Completed` status without a URL is
/// treated as not-yet-ready and polled again.
///
/// There is no cancellation hook besides the deadline. Callers that need
/// responsiveness run this out-of-band and report through a side channel.
pub async fn wait_for_completion<F, Fut>(
    interval: Duration,
    max_wait: Duration,
    mut poll: F,
) -> Result<String, HeyGenError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<RenderStatus, HeyGenError>>,
{
    let started = Instant::now();

    loop {
        if started.elapsed() >= max_wait {
            return Err(HeyGenError::Timeout {
                waited_secs: max_wait.as_secs(),
            });
        }

        let status = poll().await?;

        match status.state {
            RenderState::Completed => {
                if let Some(url) = status.video_url.filter(|u| !u.is_empty()) {
                    return Ok(url);
                }
            }
            RenderState::Failed => {
                return Err(HeyGenError::RenderFailed {
                    detail: status
                        .error
                        .unwrap_or_else(|| "Video generation failed".to_string()),
                });
            }
            RenderState::Pending | RenderState::Processing => {}
        }

        tokio::time::sleep(interval).await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
