//! YouTube publishing client.
//!
//! Upload is the three-step dance the Data API requires: exchange the
//! long-lived refresh token for an access token, open a resumable upload
//! session, then PUT the video bytes to the session URL.

use bytes::Bytes;
use serde_json::{json, Value};

use crate::error::SocialError;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const UPLOAD_URL: &str = "https://www.googleapis.com/upload/youtube/v3/videos";

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// OAuth credentials for the YouTube Data API.
///
/// The refresh token comes from a one-time interactive consent flow and is
/// expected to be provisioned out of band.
#[derive(Debug, Clone)]
pub struct YouTubeCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for publishing finished videos to YouTube.
pub struct YouTubeClient {
    client: reqwest::Client,
    credentials: Option<YouTubeCredentials>,
}

impl YouTubeClient {
    pub fn new(credentials: Option<YouTubeCredentials>) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
        }
    }

    /// Create a client with a caller-supplied HTTP client.
    pub fn with_client(client: reqwest::Client, credentials: Option<YouTubeCredentials>) -> Self {
        Self { client, credentials }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// Upload a video and return its public watch URL.
    pub async fn upload(
        &self,
        video: Bytes,
        title: &str,
        description: &str,
    ) -> Result<String, SocialError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(SocialError::NotConfigured("YouTube"))?;

        tracing::info!(
            title,
            size_mb = format!("{:.2}", video.len() as f64 / 1_048_576.0),
            "Uploading video to YouTube"
        );

        let access_token = self.refresh_access_token(credentials).await?;
        let session_url = self
            .init_resumable_session(&access_token, title, description, video.len())
            .await?;
        let video_id = self.put_video(&session_url, video).await?;

        let url = watch_url(&video_id);
        tracing::info!(url = %url, "YouTube upload complete");
        Ok(url)
    }

    /// Exchange the refresh token for a short-lived access token.
    async fn refresh_access_token(
        &self,
        credentials: &YouTubeCredentials,
    ) -> Result<String, SocialError> {
        let response = self
            .client
            .post(TOKEN_URL)
            .form(&[
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
                ("refresh_token", credentials.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        let value: Value = response.json().await?;
        match value.get("access_token").and_then(Value::as_str) {
            Some(token) if !token.is_empty() => Ok(token.to_string()),
            _ => Err(SocialError::Auth(api_error_detail(&value))),
        }
    }

    /// Open a resumable upload session and return its session URL.
    async fn init_resumable_session(
        &self,
        access_token: &str,
        title: &str,
        description: &str,
        content_length: usize,
    ) -> Result<String, SocialError> {
        let response = self
            .client
            .post(UPLOAD_URL)
            .query(&[("uploadType", "resumable"), ("part", "snippet,status")])
            .bearer_auth(access_token)
            .header("X-Upload-Content-Type", "video/mp4")
            .header("X-Upload-Content-Length", content_length.to_string())
            .json(&upload_metadata(title, description))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SocialError::Upload(format!(
                "session init returned HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                SocialError::Upload("session init returned no upload URL".to_string())
            })
    }

    /// Send the video bytes to the session URL and return the video id.
    async fn put_video(&self, session_url: &str, video: Bytes) -> Result<String, SocialError> {
        let response = self
            .client
            .put(session_url)
            .header(reqwest::header::CONTENT_TYPE, "video/mp4")
            .body(video)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SocialError::Upload(format!(
                "upload returned HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        let value: Value = response.json().await?;
        match value.get("id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => Ok(id.to_string()),
            _ => Err(SocialError::Upload(api_error_detail(&value))),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Snippet/status metadata sent when opening the upload session.
fn upload_metadata(title: &str, description: &str) -> Value {
    json!({
        "snippet": {
            "title": title,
            "description": description,
            "categoryId": "22",
            "tags": ["themora", "qualitative research", "ai"],
        },
        "status": {
            "privacyStatus": "public",
            "selfDeclaredMadeForKids": false,
        },
    })
}

/// Public watch URL for an uploaded video.
fn watch_url(video_id: &str) -> String {
    format!("https://youtu.be/{video_id}")
}

/// Pull a human-readable detail out of a Google API error body.
///
/// The token endpoint reports `{"error", "error_description"}`, the upload
/// endpoint nests `{"error": {"message"}}`.
fn api_error_detail(value: &Value) -> String {
    if let Some(message) = value.pointer("/error/message").and_then(Value::as_str) {
        return message.to_string();
    }
    if let Some(description) = value.get("error_description").and_then(Value::as_str) {
        return description.to_string();
    }
    if let Some(error) = value.get("error").and_then(Value::as_str) {
        return error.to_string();
    }
    value.to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn credentials() -> YouTubeCredentials {
        YouTubeCredentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            refresh_token: "refresh".to_string(),
        }
    }

    // -- configuration ------------------------------------------------------

    #[test]
    fn configured_only_with_credentials() {
        assert!(!YouTubeClient::new(None).is_configured());
        assert!(YouTubeClient::new(Some(credentials())).is_configured());
    }

    #[tokio::test]
    async fn upload_without_credentials_fails_fast() {
        let client = YouTubeClient::new(None);
        let result = client.upload(Bytes::from_static(b"mp4"), "t", "d").await;
        assert_matches!(result, Err(SocialError::NotConfigured("YouTube")));
    }

    // -- metadata -----------------------------------------------------------

    #[test]
    fn metadata_declares_public_video() {
        let metadata = upload_metadata("Daily Promo", "Watch this");
        assert_eq!(metadata["snippet"]["title"], "Daily Promo");
        assert_eq!(metadata["snippet"]["description"], "Watch this");
        assert_eq!(metadata["snippet"]["categoryId"], "22");
        assert_eq!(metadata["status"]["privacyStatus"], "public");
        assert_eq!(metadata["status"]["selfDeclaredMadeForKids"], false);
    }

    #[test]
    fn watch_url_uses_short_form() {
        assert_eq!(watch_url("dQw4w9WgXcQ"), "https://youtu.be/dQw4w9WgXcQ");
    }

    // -- error extraction ---------------------------------------------------

    #[test]
    fn error_detail_prefers_nested_message() {
        let value = json!({"error": {"code": 403, "message": "quota exceeded"}});
        assert_eq!(api_error_detail(&value), "quota exceeded");
    }

    #[test]
    fn error_detail_reads_token_endpoint_shape() {
        let value = json!({"error": "invalid_grant", "error_description": "Token revoked"});
        assert_eq!(api_error_detail(&value), "Token revoked");

        let bare = json!({"error": "invalid_grant"});
        assert_eq!(api_error_detail(&bare), "invalid_grant");
    }

    #[test]
    fn error_detail_falls_back_to_raw_body() {
        let value = json!({"unexpected": true});
        assert_eq!(api_error_detail(&value), r#"{"unexpected":true}"#);
    }
}
