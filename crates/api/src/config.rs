use std::path::PathBuf;

use promoloop_social::{NotifierSettings, TwitterCredentials, YouTubeCredentials};

/// Server configuration loaded from environment variables.
///
/// The storage credentials are the only required settings; every vendor
/// integration degrades to a not-configured skip when its variables are
/// absent.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `900`; synchronous render
    /// waits are long, the render poll deadline is the real bound).
    pub request_timeout_secs: u64,
    /// Accepted bearer tokens, parsed from comma-separated `API_TOKENS`.
    /// Any listed value authorizes a request, so old tokens keep working
    /// during a rotation. Empty means no caller is authorized.
    pub api_tokens: Vec<String>,

    /// Render vendor key. Absent means submissions fail as not configured.
    pub heygen_api_key: Option<String>,
    /// Storage project base URL.
    pub supabase_url: String,
    /// Storage service-role key.
    pub supabase_service_key: String,

    /// Interpreter for the recorder script (default: `node`).
    pub recorder_binary: PathBuf,
    /// Recorder script path. Absent disables live demo recording.
    pub recorder_script: Option<PathBuf>,

    /// Scratch space for per-run temp files.
    pub work_dir: PathBuf,
    /// Directory holding pre-recorded demo clips.
    pub assets_dir: PathBuf,
    /// Watermark text for composited videos.
    pub brand_label: String,

    pub youtube: Option<YouTubeCredentials>,
    pub twitter: Option<TwitterCredentials>,
    pub notifier: NotifierSettings,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `900`                      |
    /// | `API_TOKENS`             | (empty)                    |
    /// | `HEYGEN_API_KEY`         | (unset)                    |
    /// | `SUPABASE_URL`           | required                   |
    /// | `SUPABASE_SERVICE_KEY`   | required                   |
    /// | `RECORDER_BINARY`        | `node`                     |
    /// | `RECORDER_SCRIPT`        | (unset)                    |
    /// | `WORK_DIR`               | `$TMPDIR/promoloop`        |
    /// | `ASSETS_DIR`             | `assets`                   |
    /// | `BRAND_LABEL`            | `themora.io`               |
    ///
    /// YouTube needs `YOUTUBE_CLIENT_ID` + `YOUTUBE_CLIENT_SECRET` +
    /// `YOUTUBE_REFRESH_TOKEN`; Twitter needs `TWITTER_API_KEY` +
    /// `TWITTER_API_SECRET` + `TWITTER_ACCESS_TOKEN` +
    /// `TWITTER_ACCESS_SECRET`. A partially-set group counts as unset.
    /// Notifications read `TELEGRAM_BOT_TOKEN`, `TELEGRAM_CHAT_ID`, and
    /// `DISCORD_WEBHOOK_URL` independently.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "900".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let api_tokens: Vec<String> = std::env::var("API_TOKENS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let supabase_url = std::env::var("SUPABASE_URL").expect("SUPABASE_URL must be set");
        let supabase_service_key =
            std::env::var("SUPABASE_SERVICE_KEY").expect("SUPABASE_SERVICE_KEY must be set");

        let recorder_binary =
            PathBuf::from(std::env::var("RECORDER_BINARY").unwrap_or_else(|_| "node".into()));
        let recorder_script = env_opt("RECORDER_SCRIPT").map(PathBuf::from);

        let work_dir = env_opt("WORK_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("promoloop"));
        let assets_dir = PathBuf::from(env_opt("ASSETS_DIR").unwrap_or_else(|| "assets".into()));
        let brand_label = env_opt("BRAND_LABEL").unwrap_or_else(|| "themora.io".into());

        let youtube = load_youtube_credentials();
        let twitter = load_twitter_credentials();
        let notifier = NotifierSettings {
            telegram_bot_token: env_opt("TELEGRAM_BOT_TOKEN"),
            telegram_chat_id: env_opt("TELEGRAM_CHAT_ID"),
            discord_webhook_url: env_opt("DISCORD_WEBHOOK_URL"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            api_tokens,
            heygen_api_key: env_opt("HEYGEN_API_KEY"),
            supabase_url,
            supabase_service_key,
            recorder_binary,
            recorder_script,
            work_dir,
            assets_dir,
            brand_label,
            youtube,
            twitter,
            notifier,
        }
    }
}

/// Read an env var, treating unset and empty identically.
fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn load_youtube_credentials() -> Option<YouTubeCredentials> {
    match (
        env_opt("YOUTUBE_CLIENT_ID"),
        env_opt("YOUTUBE_CLIENT_SECRET"),
        env_opt("YOUTUBE_REFRESH_TOKEN"),
    ) {
        (Some(client_id), Some(client_secret), Some(refresh_token)) => Some(YouTubeCredentials {
            client_id,
            client_secret,
            refresh_token,
        }),
        (None, None, None) => None,
        _ => {
            tracing::warn!("Partial YouTube credentials; treating as unconfigured");
            None
        }
    }
}

fn load_twitter_credentials() -> Option<TwitterCredentials> {
    match (
        env_opt("TWITTER_API_KEY"),
        env_opt("TWITTER_API_SECRET"),
        env_opt("TWITTER_ACCESS_TOKEN"),
        env_opt("TWITTER_ACCESS_SECRET"),
    ) {
        (Some(api_key), Some(api_secret), Some(access_token), Some(access_secret)) => {
            Some(TwitterCredentials {
                api_key,
                api_secret,
                access_token,
                access_secret,
            })
        }
        (None, None, None, None) => None,
        _ => {
            tracing::warn!("Partial Twitter credentials; treating as unconfigured");
            None
        }
    }
}
