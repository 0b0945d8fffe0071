//! Deterministic daily selection over the content catalogs.
//!
//! The same calendar date always yields the same script and demo pick,
//! with no persisted state: the scheduler is day-of-year arithmetic over
//! the catalog length. Avatar and backdrop-color picks are deliberately
//! *not* part of this module; those stay random per render (see
//! [`crate::catalog::random_avatar`]).

use chrono::{Datelike, NaiveDate};

use crate::catalog::{self, ScriptEntry};
use crate::demo::{self, DemoType};

/// Zero-based day-of-year for `date`: days elapsed since January 1st.
///
/// January 1st maps to 0, December 31st to 364 (365 in leap years).
pub fn daily_index(date: NaiveDate) -> usize {
    date.ordinal0() as usize
}

/// Pick today's entry from a catalog by day-of-year modulo length.
///
/// Pure and deterministic: identical date and catalog always produce the
/// identical pick, across calls and process restarts.
///
/// # Panics
///
/// Panics if `catalog` is empty. The static catalogs are non-empty by
/// construction.
pub fn pick_daily<T>(catalog: &[T], date: NaiveDate) -> &T {
    &catalog[daily_index(date) % catalog.len()]
}

/// Resolve the script for a request.
///
/// An explicitly supplied `topic` that matches a catalog key bypasses the
/// rotation; the entry's own language tag travels with it. An unknown key
/// falls back to the daily pick rather than failing, so a stale caller
/// still produces a video.
pub fn resolve_script(topic: Option<&str>, date: NaiveDate) -> &'static ScriptEntry {
    topic
        .and_then(catalog::script_by_key)
        .unwrap_or_else(|| pick_daily(catalog::SCRIPTS, date))
}

/// Resolve the demo for a request, with the same explicit-key bypass and
/// unknown-key fallback as [`resolve_script`].
pub fn resolve_demo(key: Option<&str>, date: NaiveDate) -> &'static DemoType {
    key.and_then(demo::demo_by_key)
        .unwrap_or_else(|| pick_daily(demo::DEMOS, date))
}

/// Today's deterministic content selection.
#[derive(Debug, Clone, Copy)]
pub struct DailySelection {
    pub date: NaiveDate,
    pub script: &'static ScriptEntry,
    pub demo: &'static DemoType,
}

/// Compute the full selection for a date.
pub fn select_for(date: NaiveDate) -> DailySelection {
    DailySelection {
        date,
        script: resolve_script(None, date),
        demo: resolve_demo(None, date),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
