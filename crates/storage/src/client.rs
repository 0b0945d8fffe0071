//! REST client for the storage bucket and the artifact catalog table.

use bytes::Bytes;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;

use crate::types::ArtifactRecord;

/// Bucket prefix for daily artifacts.
const DAILY_PREFIX: &str = "daily";

/// Connection settings for [`StorageClient`].
#[derive(Debug, Clone)]
pub struct StorageSettings {
    /// Project base URL, e.g. `https://abc.supabase.co`.
    pub base_url: String,
    /// Service-role key, sent as both `apikey` and bearer token.
    pub service_key: String,
    pub bucket: String,
    pub table: String,
}

impl StorageSettings {
    pub fn new(base_url: String, service_key: String) -> Self {
        Self {
            base_url,
            service_key,
            bucket: "videos".to_string(),
            table: "cloud_videos".to_string(),
        }
    }
}

/// Errors from the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The storage backend returned a non-2xx status code.
    #[error("Storage API error ({status}): {body}")]
    Api { status: u16, body: String },
}

#[derive(Debug, Deserialize)]
struct FilenameRow {
    filename: String,
}

/// HTTP client for the storage vendor.
///
/// Holds the promote lock: all latest-slot rewrites in this process
/// serialize through one client instance. Deployments running multiple
/// replicas still race at the vendor and would need a server-side
/// transaction instead.
pub struct StorageClient {
    client: reqwest::Client,
    settings: StorageSettings,
    promote_lock: Mutex<()>,
}

impl StorageClient {
    pub fn new(settings: StorageSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
            promote_lock: Mutex::new(()),
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across vendor clients).
    pub fn with_client(client: reqwest::Client, settings: StorageSettings) -> Self {
        Self {
            client,
            settings,
            promote_lock: Mutex::new(()),
        }
    }

    // -- objects -----------------------------------------------------------

    /// Upload a video object and return its public URL.
    ///
    /// Objects land under the `daily/` prefix unless the filename already
    /// carries a path. Existing objects with the same name are replaced.
    pub async fn upload(&self, bytes: Bytes, filename: &str) -> Result<String, StorageError> {
        let path = object_path(filename);
        let size_mb = bytes.len() as f64 / 1024.0 / 1024.0;
        tracing::info!(path = %path, size_mb = format!("{size_mb:.2}"), "Uploading video object");

        let response = self
            .client
            .post(format!(
                "{}/storage/v1/object/{}/{}",
                self.settings.base_url, self.settings.bucket, path
            ))
            .bearer_auth(&self.settings.service_key)
            .header("x-upsert", "true")
            .header(reqwest::header::CONTENT_TYPE, "video/mp4")
            .body(bytes)
            .send()
            .await?;

        Self::check_status(response).await?;

        let url = self.public_url(filename);
        tracing::info!(url = %url, "Upload complete");
        Ok(url)
    }

    /// Public download URL for an object (no request involved).
    pub fn public_url(&self, filename: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.settings.base_url,
            self.settings.bucket,
            object_path(filename)
        )
    }

    /// Fetch a published object's bytes from its public URL.
    pub async fn download(&self, url: &str) -> Result<Bytes, StorageError> {
        let response = self.client.get(url).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.bytes().await?)
    }

    /// Delete one object from the bucket.
    pub async fn remove_object(&self, filename: &str) -> Result<(), StorageError> {
        let path = object_path(filename);
        let response = self
            .client
            .delete(format!(
                "{}/storage/v1/object/{}/{}",
                self.settings.base_url, self.settings.bucket, path
            ))
            .bearer_auth(&self.settings.service_key)
            .send()
            .await?;

        Self::check_status(response).await
    }

    // -- catalog rows ------------------------------------------------------

    /// Replace the latest-slot artifact with a newly published one.
    ///
    /// Sequence: list currently-flagged rows, delete each one's stored
    /// object, delete the rows, insert the new row flagged latest. The
    /// whole sequence holds the promote lock so concurrent publishes in
    /// this process cannot interleave their delete/insert steps. The
    /// vendor offers no transaction here: a crash mid-sequence leaves
    /// zero latest rows until the next publish heals the slot.
    pub async fn promote_to_latest(&self, filename: &str, url: &str) -> Result<(), StorageError> {
        let _guard = self.promote_lock.lock().await;

        let superseded = self.rows_flagged_latest().await?;
        for row in &superseded {
            tracing::info!(filename = %row.filename, "Removing superseded artifact");
            self.remove_object(&row.filename).await?;
        }
        if !superseded.is_empty() {
            self.delete_rows_flagged_latest().await?;
        }

        let response = self
            .client
            .post(format!(
                "{}/rest/v1/{}",
                self.settings.base_url, self.settings.table
            ))
            .bearer_auth(&self.settings.service_key)
            .header("apikey", &self.settings.service_key)
            .header("Prefer", "return=minimal")
            .json(&json!({
                "filename": filename,
                "url": url,
                "is_latest": true,
                "created_at": Utc::now().to_rfc3339(),
            }))
            .send()
            .await?;

        Self::check_status(response).await?;
        tracing::info!(filename = %filename, "Promoted to latest slot");
        Ok(())
    }

    /// The most recently published artifacts, newest first.
    pub async fn list_recent(&self, limit: u32) -> Result<Vec<ArtifactRecord>, StorageError> {
        let response = self
            .client
            .get(format!(
                "{}/rest/v1/{}",
                self.settings.base_url, self.settings.table
            ))
            .bearer_auth(&self.settings.service_key)
            .header("apikey", &self.settings.service_key)
            .query(&[
                ("select", "*"),
                ("order", "created_at.desc"),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn rows_flagged_latest(&self) -> Result<Vec<FilenameRow>, StorageError> {
        let response = self
            .client
            .get(format!(
                "{}/rest/v1/{}",
                self.settings.base_url, self.settings.table
            ))
            .bearer_auth(&self.settings.service_key)
            .header("apikey", &self.settings.service_key)
            .query(&[("select", "filename"), ("is_latest", "eq.true")])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn delete_rows_flagged_latest(&self) -> Result<(), StorageError> {
        let response = self
            .client
            .delete(format!(
                "{}/rest/v1/{}",
                self.settings.base_url, self.settings.table
            ))
            .bearer_auth(&self.settings.service_key)
            .header("apikey", &self.settings.service_key)
            .query(&[("is_latest", "eq.true")])
            .send()
            .await?;

        Self::check_status(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`StorageError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StorageError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StorageError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StorageError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), StorageError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// Bucket path for a filename: bare names go under the daily prefix,
/// names that already carry a path are used as-is.
fn object_path(filename: &str) -> String {
    if filename.contains('/') {
        filename.to_string()
    } else {
        format!("{DAILY_PREFIX}/{filename}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
