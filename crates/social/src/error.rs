//! Error type shared by the social publishing clients.

/// Error type for social platform failures.
#[derive(Debug, thiserror::Error)]
pub enum SocialError {
    /// Required credentials are missing from the environment.
    #[error("{0} credentials not configured")]
    NotConfigured(&'static str),

    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The OAuth token refresh was rejected.
    #[error("token refresh failed: {0}")]
    Auth(String),

    /// The video upload was rejected or returned an unusable response.
    #[error("video upload failed: {0}")]
    Upload(String),

    /// The text post was rejected or returned an unusable response.
    #[error("post failed: {0}")]
    Post(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
