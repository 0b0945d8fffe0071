//! Output format geometry for the multi-format fan-out.
//!
//! Landscape is the canonical daily format; portrait and square exist for
//! the short-form platforms. Each format carries the viewport used for the
//! background recording, the avatar placement for vendor-side compositing,
//! and the picture-in-picture divisor for local compositing.

use serde::Serialize;
use std::fmt;

/// The three supported output aspect ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKey {
    Landscape,
    Portrait,
    Square,
}

impl FormatKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatKey::Landscape => "landscape",
            FormatKey::Portrait => "portrait",
            FormatKey::Square => "square",
        }
    }

    /// Parse a request-supplied format name.
    pub fn parse(s: &str) -> Option<FormatKey> {
        match s {
            "landscape" => Some(FormatKey::Landscape),
            "portrait" => Some(FormatKey::Portrait),
            "square" => Some(FormatKey::Square),
            _ => None,
        }
    }
}

impl fmt::Display for FormatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full geometry for one output format.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OutputFormat {
    pub key: FormatKey,
    /// Render dimension and background-recording viewport width.
    pub width: u32,
    /// Render dimension and background-recording viewport height.
    pub height: u32,
    /// Vendor aspect-ratio string, passed verbatim in render submissions.
    pub aspect_ratio: &'static str,
    /// Vendor-side character scale for this geometry.
    pub avatar_scale: f64,
    /// Vendor-side character offset (fractions of the frame, x right, y down).
    pub avatar_offset_x: f64,
    pub avatar_offset_y: f64,
    /// Local compositing: foreground is scaled to `width / pip_divisor`.
    #[serde(skip)]
    pub pip_divisor: u32,
}

/// All formats, in fan-out order. Landscape first: it is the canonical
/// format and the only one promoted to the daily latest slot in fan-out
/// runs.
pub const FORMATS: &[OutputFormat] = &[
    OutputFormat {
        key: FormatKey::Landscape,
        width: 1920,
        height: 1080,
        aspect_ratio: "16:9",
        avatar_scale: 1.5,
        avatar_offset_x: 0.0,
        avatar_offset_y: 0.0,
        pip_divisor: 3,
    },
    OutputFormat {
        key: FormatKey::Portrait,
        width: 1080,
        height: 1920,
        aspect_ratio: "9:16",
        avatar_scale: 1.0,
        avatar_offset_x: 0.0,
        avatar_offset_y: 0.2,
        pip_divisor: 2,
    },
    OutputFormat {
        key: FormatKey::Square,
        width: 1080,
        height: 1080,
        aspect_ratio: "1:1",
        avatar_scale: 1.2,
        avatar_offset_x: 0.0,
        avatar_offset_y: 0.1,
        pip_divisor: 2,
    },
];

/// Look up the geometry for a format key.
pub fn format_for(key: FormatKey) -> &'static OutputFormat {
    // FORMATS covers every FormatKey variant.
    FORMATS
        .iter()
        .find(|f| f.key == key)
        .unwrap_or(&FORMATS[0])
}

/// The format used when a request does not specify one.
pub fn default_format() -> &'static OutputFormat {
    &FORMATS[0]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_is_full_hd() {
        let f = format_for(FormatKey::Landscape);
        assert_eq!((f.width, f.height), (1920, 1080));
        assert_eq!(f.aspect_ratio, "16:9");
    }

    #[test]
    fn portrait_swaps_dimensions() {
        let f = format_for(FormatKey::Portrait);
        assert_eq!((f.width, f.height), (1080, 1920));
        assert_eq!(f.aspect_ratio, "9:16");
    }

    #[test]
    fn square_is_square() {
        let f = format_for(FormatKey::Square);
        assert_eq!(f.width, f.height);
        assert_eq!(f.aspect_ratio, "1:1");
    }

    #[test]
    fn parse_accepts_all_known_keys() {
        for format in FORMATS {
            assert_eq!(FormatKey::parse(format.key.as_str()), Some(format.key));
        }
    }

    #[test]
    fn parse_rejects_unknown_key() {
        assert_eq!(FormatKey::parse("cinemascope"), None);
        assert_eq!(FormatKey::parse("LANDSCAPE"), None);
    }

    #[test]
    fn default_format_is_landscape() {
        assert_eq!(default_format().key, FormatKey::Landscape);
    }

    #[test]
    fn pip_divisor_is_positive() {
        for format in FORMATS {
            assert!(format.pip_divisor >= 2);
        }
    }
}
