//! Render lifecycle states and vendor payload normalization.

use serde::Serialize;
use std::fmt;

/// The four-state render job lifecycle. `Completed` and `Failed` are
/// terminal; everything the vendor reports that we do not recognize is
/// treated as still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderState {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl RenderState {
    /// Map a vendor-reported status string onto the lifecycle.
    ///
    /// A missing or unrecognized status defaults to `Pending`: the wait
    /// loop keeps polling and the deadline catches jobs that never settle.
    pub fn from_vendor(status: Option<&str>) -> RenderState {
        match status {
            Some("completed") => RenderState::Completed,
            Some("failed") => RenderState::Failed,
            Some("processing") => RenderState::Processing,
            _ => RenderState::Pending,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RenderState::Completed | RenderState::Failed)
    }
}

impl fmt::Display for RenderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RenderState::Pending => "pending",
            RenderState::Processing => "processing",
            RenderState::Completed => "completed",
            RenderState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// One observation of a render job, as returned by a status poll.
#[derive(Debug, Clone, Serialize)]
pub struct RenderStatus {
    pub state: RenderState,
    /// Download URL for the finished clip. Only meaningful once the state
    /// is `Completed`; the vendor has been seen reporting `Completed` with
    /// the URL still missing for a poll or two.
    pub video_url: Option<String>,
    pub error: Option<String>,
}

/// Flatten a vendor error payload to a message string.
///
/// The vendor is inconsistent here: errors arrive as plain strings, as
/// objects with a `message` field, or not at all. Callers always get a
/// non-empty string to log or surface.
pub fn coerce_error_message(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
        Some(serde_json::Value::Object(map)) => match map.get("message") {
            Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
            _ => serde_json::Value::Object(map.clone()).to_string(),
        },
        Some(serde_json::Value::Null) | None => "HeyGen error".to_string(),
        Some(other) => other.to_string(),
    }
}

/// Like [`coerce_error_message`], but preserves absence: a missing or
/// null payload stays `None` instead of becoming the fallback message.
pub fn optional_error_message(value: Option<&serde_json::Value>) -> Option<String> {
    match value {
        Some(serde_json::Value::Null) | None => None,
        some => Some(coerce_error_message(some)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- RenderState mapping -----------------------------------------------

    #[test]
    fn known_statuses_map_directly() {
        assert_eq!(
            RenderState::from_vendor(Some("completed")),
            RenderState::Completed
        );
        assert_eq!(RenderState::from_vendor(Some("failed")), RenderState::Failed);
        assert_eq!(
            RenderState::from_vendor(Some("processing")),
            RenderState::Processing
        );
    }

    #[test]
    fn missing_status_defaults_to_pending() {
        assert_eq!(RenderState::from_vendor(None), RenderState::Pending);
    }

    #[test]
    fn unrecognized_status_defaults_to_pending() {
        assert_eq!(
            RenderState::from_vendor(Some("waiting")),
            RenderState::Pending
        );
        assert_eq!(
            RenderState::from_vendor(Some("queued_for_gpu")),
            RenderState::Pending
        );
    }

    #[test]
    fn only_completed_and_failed_are_terminal() {
        assert!(RenderState::Completed.is_terminal());
        assert!(RenderState::Failed.is_terminal());
        assert!(!RenderState::Pending.is_terminal());
        assert!(!RenderState::Processing.is_terminal());
    }

    // -- Error coercion ----------------------------------------------------

    #[test]
    fn string_error_passes_through() {
        let value = json!("quota exceeded");
        assert_eq!(coerce_error_message(Some(&value)), "quota exceeded");
    }

    #[test]
    fn object_error_prefers_message_field() {
        let value = json!({"code": 40012, "message": "avatar not found"});
        assert_eq!(coerce_error_message(Some(&value)), "avatar not found");
    }

    #[test]
    fn object_without_message_serializes_whole_payload() {
        let value = json!({"code": 40012});
        assert_eq!(coerce_error_message(Some(&value)), r#"{"code":40012}"#);
    }

    #[test]
    fn absent_error_gets_fallback_message() {
        assert_eq!(coerce_error_message(None), "HeyGen error");
        assert_eq!(coerce_error_message(Some(&json!(null))), "HeyGen error");
    }

    #[test]
    fn optional_form_preserves_absence() {
        assert_eq!(optional_error_message(None), None);
        assert_eq!(optional_error_message(Some(&json!(null))), None);
        assert_eq!(
            optional_error_message(Some(&json!("boom"))),
            Some("boom".to_string())
        );
    }
}
