//! Display-ready views of optimizer results.
//!
//! These are the shapes handed to presentation layers (terminal, JSON, WASM):
//! every instant is expressed in the display zone, and each window carries an
//! explicit optimal flag so renderers never recompute it.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

use crate::optimizer::{OptimizationResult, Window, WindowResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowRow {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub events: Vec<DateTime<Tz>>,
    pub optimal: bool,
}

/// One duration, every window (or only those that matched something).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleReport {
    pub group_id: String,
    pub duration_days: u32,
    pub optimal_count: usize,
    pub windows: Vec<WindowRow>,
}

impl SingleReport {
    /// With `include_empty == false`, windows that matched no event are
    /// left out, as the detail table only lists candidate trips.
    pub fn new(
        group_id: &str,
        result: &OptimizationResult<'_>,
        tz: Tz,
        include_empty: bool,
    ) -> Self {
        let windows = result
            .windows
            .iter()
            .filter(|w| include_empty || w.count() > 0)
            .map(|w| row(result, w, tz))
            .collect();

        Self {
            group_id: group_id.to_string(),
            duration_days: result.duration_days,
            optimal_count: result.optimal_count,
            windows,
        }
    }
}

/// One line of the sweep summary: the optimum for a duration and every
/// window achieving it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRow {
    pub duration_days: u32,
    pub optimal_count: usize,
    pub optimal_windows: Vec<Window>,
}

pub fn sweep_report(results: &[OptimizationResult<'_>]) -> Vec<SweepRow> {
    results
        .iter()
        .map(|r| SweepRow {
            duration_days: r.duration_days,
            optimal_count: r.optimal_count,
            optimal_windows: r.optimal_windows().map(|w| w.window).collect(),
        })
        .collect()
}

fn row(result: &OptimizationResult<'_>, w: &WindowResult<'_>, tz: Tz) -> WindowRow {
    WindowRow {
        start: w.window.start.with_timezone(&tz),
        end: w.window.end.with_timezone(&tz),
        events: w
            .matched_events
            .iter()
            .map(|e| e.start.with_timezone(&tz))
            .collect(),
        optimal: result.is_optimal(w),
    }
}
