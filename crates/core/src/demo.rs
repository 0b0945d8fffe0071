//! Website demo definitions for background screen recordings.
//!
//! A [`DemoType`] describes what the screen recorder should capture behind
//! the presenter: either a live browser session driven by a scripted list
//! of [`BrowserAction`]s, or a pre-recorded clip shipped with the deploy.
//! The action vocabulary matches what the recorder CLI accepts on stdin.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Browser actions
// ---------------------------------------------------------------------------

/// One scripted browser step, executed in order by the recorder.
///
/// `wait_ms` is the settle time after the action completes, so scrolls and
/// hovers read naturally on camera.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum BrowserAction {
    Goto {
        url: &'static str,
        wait_ms: u64,
    },
    Scroll {
        y: u32,
        wait_ms: u64,
    },
    Click {
        selector: &'static str,
        wait_ms: u64,
    },
    Hover {
        selector: &'static str,
        wait_ms: u64,
    },
    Type {
        selector: &'static str,
        text: &'static str,
        wait_ms: u64,
    },
}

// ---------------------------------------------------------------------------
// Demo catalog
// ---------------------------------------------------------------------------

/// Where the background footage for a demo comes from.
#[derive(Debug, Clone, Copy)]
pub enum DemoSource {
    /// Drive a live browser session through the given steps.
    Live { steps: &'static [BrowserAction] },
    /// Use a pre-recorded clip from the configured asset directory.
    Recorded { asset: &'static str },
}

/// A website demo the pipeline can put behind the presenter.
#[derive(Debug, Clone, Copy)]
pub struct DemoType {
    /// Stable key, addressable via request fields and the daily rotation.
    pub key: &'static str,
    /// Short human label for API responses.
    pub title: &'static str,
    pub source: DemoSource,
}

const SITE: &str = "https://themora.io";

const DASHBOARD_STEPS: &[BrowserAction] = &[
    BrowserAction::Goto {
        url: SITE,
        wait_ms: 3000,
    },
    BrowserAction::Scroll { y: 300, wait_ms: 1500 },
    BrowserAction::Scroll { y: 600, wait_ms: 1500 },
    BrowserAction::Scroll { y: 0, wait_ms: 1000 },
];

const FEATURES_STEPS: &[BrowserAction] = &[
    BrowserAction::Goto {
        url: "https://themora.io/#features",
        wait_ms: 2000,
    },
    BrowserAction::Scroll { y: 400, wait_ms: 2000 },
    BrowserAction::Scroll { y: 800, wait_ms: 2000 },
];

const PRICING_STEPS: &[BrowserAction] = &[
    BrowserAction::Goto {
        url: "https://themora.io/pricing",
        wait_ms: 2000,
    },
    BrowserAction::Scroll { y: 300, wait_ms: 2000 },
    BrowserAction::Scroll { y: 600, wait_ms: 1500 },
];

const TOUR_STEPS: &[BrowserAction] = &[
    BrowserAction::Goto {
        url: SITE,
        wait_ms: 2000,
    },
    BrowserAction::Hover {
        selector: "nav a",
        wait_ms: 500,
    },
    BrowserAction::Scroll { y: 500, wait_ms: 2000 },
    BrowserAction::Scroll {
        y: 1000,
        wait_ms: 2000,
    },
    BrowserAction::Scroll { y: 0, wait_ms: 1000 },
];

/// The demo rotation catalog. Order matters: day-of-year modulo length
/// indexes into this slice.
pub const DEMOS: &[DemoType] = &[
    DemoType {
        key: "dashboard",
        title: "Landing page tour",
        source: DemoSource::Live {
            steps: DASHBOARD_STEPS,
        },
    },
    DemoType {
        key: "features",
        title: "Feature walkthrough",
        source: DemoSource::Live {
            steps: FEATURES_STEPS,
        },
    },
    DemoType {
        key: "pricing",
        title: "Pricing page",
        source: DemoSource::Live {
            steps: PRICING_STEPS,
        },
    },
    DemoType {
        key: "tour",
        title: "Full site tour",
        source: DemoSource::Live { steps: TOUR_STEPS },
    },
    DemoType {
        key: "app-demo",
        title: "Product walkthrough (recorded)",
        source: DemoSource::Recorded {
            asset: "app-demo.webm",
        },
    },
];

/// Look up a demo by its catalog key.
pub fn demo_by_key(key: &str) -> Option<&'static DemoType> {
    DEMOS.iter().find(|d| d.key == key)
}

/// The demo used when a requested key is unknown.
pub fn default_demo() -> &'static DemoType {
    &DEMOS[0]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
