//! Catalog row shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One published video in the artifact catalog table.
///
/// At most one row carries `is_latest = true` for the daily slot; the
/// promote sequence deletes superseded rows before inserting the new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub filename: String,
    pub url: String,
    pub is_latest: bool,
    pub created_at: DateTime<Utc>,
}
