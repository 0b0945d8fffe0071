//! Best-effort status notifications.
//!
//! Autopilot reports its outcome to Telegram and Discord. Neither channel
//! is load-bearing: a failed delivery is logged at `warn` and swallowed so
//! a flaky webhook can never fail a pipeline that already produced video.

use std::time::Duration;

use serde_json::json;

use crate::error::SocialError;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Webhook targets; unset channels are skipped.
#[derive(Debug, Clone, Default)]
pub struct NotifierSettings {
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub discord_webhook_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Delivers status messages to the configured messaging channels.
pub struct Notifier {
    client: reqwest::Client,
    settings: NotifierSettings,
}

impl Notifier {
    pub fn new(settings: NotifierSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, settings }
    }

    /// Send `message` to every configured channel.
    ///
    /// Never fails: per-channel errors are logged and dropped.
    pub async fn broadcast(&self, message: &str) {
        if let Err(e) = self.send_telegram(message).await {
            tracing::warn!(error = %e, "Telegram notification failed");
        }
        if let Err(e) = self.send_discord(message).await {
            tracing::warn!(error = %e, "Discord notification failed");
        }
    }

    async fn send_telegram(&self, message: &str) -> Result<(), SocialError> {
        let (token, chat_id) = match (
            self.settings.telegram_bot_token.as_deref(),
            self.settings.telegram_chat_id.as_deref(),
        ) {
            (Some(token), Some(chat_id)) => (token, chat_id),
            _ => {
                tracing::debug!("Telegram not configured, skipping notification");
                return Ok(());
            }
        };

        let url = format!("https://api.telegram.org/bot{token}/sendMessage");
        let response = self
            .client
            .post(&url)
            .json(&json!({ "chat_id": chat_id, "text": message }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SocialError::Post(format!(
                "Telegram returned HTTP {}",
                response.status().as_u16()
            )));
        }
        Ok(())
    }

    async fn send_discord(&self, message: &str) -> Result<(), SocialError> {
        let url = match self.settings.discord_webhook_url.as_deref() {
            Some(url) => url,
            None => {
                tracing::debug!("Discord not configured, skipping notification");
                return Ok(());
            }
        };

        let response = self
            .client
            .post(url)
            .json(&json!({ "content": message }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SocialError::Post(format!(
                "Discord returned HTTP {}",
                response.status().as_u16()
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
