//! Sliding-window search for the vacation placement that captures the most
//! events.
//!
//! Windows start at every local midnight from `earliest` while the start is
//! before `latest`, and each spans `duration_days` calendar days in the
//! display zone. Calendar-day arithmetic (not 24h multiples) keeps window
//! boundaries on midnight across DST transitions.
//!
//! Membership is half-open: an event at exactly `window.start` counts, one at
//! exactly `window.end` does not.
//!
//! Both window starts and window ends are non-decreasing, and the events are
//! sorted, so a two-pointer sweep yields each window's matches as a
//! contiguous slice in O(days + events).

use std::num::NonZeroU32;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::dst::{local_midnight, local_midnight_after};
use crate::event::{is_sorted, Event};

/// Half-open interval `[start, end)` in the display zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl Window {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// One candidate vacation and the events it would capture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowResult<'a> {
    pub window: Window,
    /// Events of the queried group inside the window, ascending.
    pub matched_events: &'a [Event],
}

impl WindowResult<'_> {
    pub fn count(&self) -> usize {
        self.matched_events.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult<'a> {
    pub duration_days: u32,
    /// Highest match count over all windows; 0 when there are no windows.
    pub optimal_count: usize,
    /// Every scanned window in start order, including those with no matches.
    pub windows: Vec<WindowResult<'a>>,
}

impl<'a> OptimizationResult<'a> {
    pub fn is_optimal(&self, window: &WindowResult<'_>) -> bool {
        window.count() == self.optimal_count
    }

    /// Windows tied at `optimal_count`, in start order. Ties are not broken.
    pub fn optimal_windows(&self) -> impl Iterator<Item = &WindowResult<'a>> {
        self.windows.iter().filter(move |w| self.is_optimal(w))
    }

    /// Windows that captured at least one event.
    pub fn non_empty_windows(&self) -> impl Iterator<Item = &WindowResult<'a>> {
        self.windows.iter().filter(|w| w.count() > 0)
    }
}

/// Scan every day-aligned window of `duration_days` between `earliest` and
/// `latest`.
///
/// `events` must be ascending by start (see [`crate::event::sort_events`]).
/// The first window starts at the local midnight of `earliest`'s date, so a
/// non-midnight `earliest` is truncated. An empty `events` slice yields
/// all-empty windows and `optimal_count == 0`; no windows are produced when
/// that first midnight is not before `latest`.
pub fn optimize<'a>(
    events: &'a [Event],
    duration_days: NonZeroU32,
    earliest: DateTime<Tz>,
    latest: DateTime<Tz>,
) -> OptimizationResult<'a> {
    debug_assert!(is_sorted(events), "optimize requires events sorted by start");

    let duration = u64::from(duration_days.get());
    let mut windows = Vec::new();
    let mut optimal_count = 0;

    // events[lo..hi] is the current window's match set.
    let mut lo = 0;
    let mut hi = 0;

    // Window ends past chrono's range are clamped to its last midnight, so
    // an oversized duration still captures everything after its start.
    let horizon = local_midnight(&earliest.timezone(), NaiveDate::MAX);

    for offset in 0u64.. {
        // Each bound is the local midnight of a date counted from the origin,
        // so neither a DST shift nor a skipped midnight carries over.
        let Some(start) = local_midnight_after(&earliest, offset) else {
            break;
        };
        if start >= latest {
            break;
        }
        let Some(end) = local_midnight_after(&earliest, offset + duration).or(horizon) else {
            break;
        };

        while lo < events.len() && events[lo].start < start {
            lo += 1;
        }
        hi = hi.max(lo);
        while hi < events.len() && events[hi].start < end {
            hi += 1;
        }

        let matched_events = &events[lo..hi];
        optimal_count = optimal_count.max(matched_events.len());
        windows.push(WindowResult {
            window: Window { start, end },
            matched_events,
        });
    }

    tracing::trace!(
        duration_days = duration_days.get(),
        windows = windows.len(),
        optimal_count,
        "optimized"
    );

    OptimizationResult {
        duration_days: duration_days.get(),
        optimal_count,
        windows,
    }
}
