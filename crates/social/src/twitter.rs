//! Twitter posting client.
//!
//! The v2 tweet endpoint still authenticates with OAuth 1.0a user context:
//! every request carries an `Authorization: OAuth ...` header whose
//! signature is an HMAC-SHA1 over the percent-encoded, sorted request
//! parameters. JSON request bodies are not part of the OAuth 1.0a
//! parameter set, so for tweet creation only the `oauth_*` parameters are
//! signed.

use base64::Engine;
use hmac::Mac;
use rand::Rng;
use serde_json::{json, Value};
use sha1::Sha1;

use crate::error::SocialError;

type HmacSha1 = hmac::Hmac<Sha1>;

const TWEETS_URL: &str = "https://api.twitter.com/2/tweets";

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// OAuth 1.0a user-context credentials.
#[derive(Debug, Clone)]
pub struct TwitterCredentials {
    /// Consumer (application) key.
    pub api_key: String,
    /// Consumer (application) secret.
    pub api_secret: String,
    pub access_token: String,
    pub access_secret: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for posting short promotional texts.
pub struct TwitterClient {
    client: reqwest::Client,
    credentials: Option<TwitterCredentials>,
}

impl TwitterClient {
    pub fn new(credentials: Option<TwitterCredentials>) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
        }
    }

    /// Create a client with a caller-supplied HTTP client.
    pub fn with_client(client: reqwest::Client, credentials: Option<TwitterCredentials>) -> Self {
        Self { client, credentials }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// Post a tweet and return its public URL.
    pub async fn post(&self, text: &str) -> Result<String, SocialError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(SocialError::NotConfigured("Twitter"))?;

        let timestamp = chrono::Utc::now().timestamp();
        let header = authorization_header(credentials, timestamp, &nonce());

        let response = self
            .client
            .post(TWEETS_URL)
            .header(reqwest::header::AUTHORIZATION, header)
            .json(&json!({ "text": text }))
            .send()
            .await?;

        let status = response.status();
        let value: Value = response.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            return Err(SocialError::Post(format!(
                "HTTP {}: {}",
                status.as_u16(),
                post_error_detail(&value)
            )));
        }

        match value.pointer("/data/id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => {
                let url = post_url(id);
                tracing::info!(url = %url, "Tweet posted");
                Ok(url)
            }
            _ => Err(SocialError::Post(post_error_detail(&value))),
        }
    }
}

// ---------------------------------------------------------------------------
// OAuth 1.0a signing
// ---------------------------------------------------------------------------

/// RFC 3986 percent-encoding: everything except unreserved characters.
fn percent_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Random 32-character alphanumeric request nonce.
fn nonce() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Build the signature base string from method, URL, and request parameters.
fn signature_base_string(method: &str, url: &str, params: &[(&str, &str)]) -> String {
    let mut pairs: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    pairs.sort();

    let param_string = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method,
        percent_encode(url),
        percent_encode(&param_string)
    )
}

/// HMAC-SHA1 signature over the base string, base64-encoded.
fn sign(base: &str, consumer_secret: &str, token_secret: &str) -> String {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(base.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}

/// Render the full `Authorization: OAuth ...` header value for a tweet post.
fn authorization_header(credentials: &TwitterCredentials, timestamp: i64, nonce: &str) -> String {
    let timestamp = timestamp.to_string();
    let oauth_params = [
        ("oauth_consumer_key", credentials.api_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", timestamp.as_str()),
        ("oauth_token", credentials.access_token.as_str()),
        ("oauth_version", "1.0"),
    ];

    let base = signature_base_string("POST", TWEETS_URL, &oauth_params);
    let signature = sign(&base, &credentials.api_secret, &credentials.access_secret);

    let mut rendered: Vec<(String, String)> = oauth_params
        .iter()
        .map(|(k, v)| (k.to_string(), percent_encode(v)))
        .collect();
    rendered.push(("oauth_signature".to_string(), percent_encode(&signature)));
    rendered.sort();

    let fields = rendered
        .iter()
        .map(|(k, v)| format!("{k}=\"{v}\""))
        .collect::<Vec<_>>()
        .join(", ");
    format!("OAuth {fields}")
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn post_url(tweet_id: &str) -> String {
    format!("https://twitter.com/i/web/status/{tweet_id}")
}

/// Pull a detail string out of a v2 API error body.
fn post_error_detail(value: &Value) -> String {
    if let Some(detail) = value.get("detail").and_then(Value::as_str) {
        return detail.to_string();
    }
    if let Some(title) = value.get("title").and_then(Value::as_str) {
        return title.to_string();
    }
    value.to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
