use std::sync::Arc;

use tokio_util::task::TaskTracker;

use promoloop_heygen::{HeyGenClient, HeyGenSettings};
use promoloop_media::{BackgroundRecorder, PlaywrightRecorder, RecorderSettings, SystemFfmpeg};
use promoloop_pipeline::adapters::{FfmpegMediaTools, HeyGenRenderer, SocialSuite, SupabaseStore};
use promoloop_pipeline::{PipelineSettings, VideoPipeline};
use promoloop_social::{Notifier, TwitterClient, YouTubeClient};
use promoloop_storage::{StorageClient, StorageSettings};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable; inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// The video pipeline, shared across requests.
    pub pipeline: Arc<VideoPipeline>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Detached autopilot jobs, drained on shutdown.
    pub jobs: TaskTracker,
}

/// Wire the production pipeline from configuration.
///
/// Every vendor client is constructed here; absent credentials produce
/// clients that report themselves unconfigured rather than startup
/// failures.
pub fn build_pipeline(config: &ServerConfig) -> VideoPipeline {
    let renderer = HeyGenClient::new(HeyGenSettings {
        api_key: config.heygen_api_key.clone(),
        ..HeyGenSettings::default()
    });

    let store = StorageClient::new(StorageSettings::new(
        config.supabase_url.clone(),
        config.supabase_service_key.clone(),
    ));

    let media = FfmpegMediaTools::new(Arc::new(SystemFfmpeg));

    let recorder: Option<Arc<dyn BackgroundRecorder>> = match &config.recorder_script {
        Some(script) => Some(Arc::new(PlaywrightRecorder::new(RecorderSettings::new(
            config.recorder_binary.clone(),
            script.clone(),
        )))),
        None => {
            tracing::info!("No recorder script configured; live demo recording disabled");
            None
        }
    };

    let social = SocialSuite::new(
        YouTubeClient::new(config.youtube.clone()),
        TwitterClient::new(config.twitter.clone()),
        Notifier::new(config.notifier.clone()),
    );

    let settings = PipelineSettings {
        work_dir: config.work_dir.clone(),
        assets_dir: config.assets_dir.clone(),
        brand_label: config.brand_label.clone(),
    };

    VideoPipeline::new(
        Arc::new(HeyGenRenderer::new(renderer)),
        Arc::new(SupabaseStore::new(store)),
        Arc::new(media),
        recorder,
        Arc::new(social),
        settings,
    )
}
