//! Artifact filename convention.
//!
//! Published videos carry the topic, format, and submission time in the
//! filename so the storage bucket stays browsable without the catalog.

use chrono::{DateTime, Utc};

use crate::formats::FormatKey;

/// Build the storage filename for a published video.
///
/// Convention: `promo-{topic}-{format}-{timestamp}.mp4`
///
/// The timestamp is the UTC ISO-8601 instant with `:` and `.` replaced by
/// `-`, keeping the name safe for object keys and URLs.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use promoloop_core::formats::FormatKey;
/// use promoloop_core::naming::artifact_filename;
///
/// let at = Utc.with_ymd_and_hms(2026, 8, 22, 10, 30, 0).unwrap();
/// assert_eq!(
///     artifact_filename("founding", FormatKey::Landscape, at),
///     "promo-founding-landscape-2026-08-22T10-30-00-000Z.mp4"
/// );
/// ```
pub fn artifact_filename(topic: &str, format: FormatKey, at: DateTime<Utc>) -> String {
    let timestamp = at
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
        .replace([':', '.'], "-");
    format!("promo-{topic}-{}-{timestamp}.mp4", format.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn filename_contains_topic_and_format() {
        let at = Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap();
        assert_eq!(
            artifact_filename("students", FormatKey::Portrait, at),
            "promo-students-portrait-2026-01-05T08-00-00-000Z.mp4"
        );
    }

    #[test]
    fn timestamp_has_no_colons_or_dots() {
        let at = Utc
            .with_ymd_and_hms(2026, 8, 22, 23, 59, 59)
            .unwrap()
            .with_nanosecond(123_000_000)
            .unwrap();
        let name = artifact_filename("academic", FormatKey::Square, at);
        assert!(!name[..name.len() - 4].contains(':'));
        assert!(!name[..name.len() - 4].contains('.'));
        assert!(name.ends_with(".mp4"));
    }

    #[test]
    fn different_formats_produce_different_names() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        assert_ne!(
            artifact_filename("founding", FormatKey::Landscape, at),
            artifact_filename("founding", FormatKey::Square, at)
        );
    }
}
