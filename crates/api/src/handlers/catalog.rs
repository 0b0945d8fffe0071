//! Read-only catalog endpoints: today's rotation pick and the output
//! format table.

use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Serialize;

use promoloop_core::catalog::Language;
use promoloop_core::demo::DemoSource;
use promoloop_core::formats::{OutputFormat, FORMATS};
use promoloop_core::rotation;

/// Today's deterministic content selection.
#[derive(Serialize)]
pub struct TodayResponse {
    pub date: NaiveDate,
    pub script: ScriptInfo,
    pub demo: DemoInfo,
}

#[derive(Serialize)]
pub struct ScriptInfo {
    pub key: &'static str,
    pub title: &'static str,
    pub language: Language,
}

#[derive(Serialize)]
pub struct DemoInfo {
    pub key: &'static str,
    pub title: &'static str,
    /// `live` for browser-recorded demos, `recorded` for shipped clips.
    pub source: &'static str,
}

/// GET /today -- today's script/demo selection.
pub async fn today() -> Json<TodayResponse> {
    let selection = rotation::select_for(Utc::now().date_naive());

    Json(TodayResponse {
        date: selection.date,
        script: ScriptInfo {
            key: selection.script.key,
            title: selection.script.title,
            language: selection.script.language,
        },
        demo: DemoInfo {
            key: selection.demo.key,
            title: selection.demo.title,
            source: match selection.demo.source {
                DemoSource::Live { .. } => "live",
                DemoSource::Recorded { .. } => "recorded",
            },
        },
    })
}

/// GET /formats -- the static catalog of output dimensions.
pub async fn formats() -> Json<&'static [OutputFormat]> {
    Json(FORMATS)
}
