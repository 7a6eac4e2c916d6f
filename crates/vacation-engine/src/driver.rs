//! Runs the optimizer for one user-chosen duration or a fixed sweep of
//! durations.

use std::num::NonZeroU32;
use std::ops::RangeInclusive;

use crate::error::{PlannerError, Result};
use crate::event::Event;
use crate::index::DatasetSpan;
use crate::optimizer::{optimize, OptimizationResult};

/// Durations covered by a sweep, in calendar days.
pub const SWEEP_DURATIONS: RangeInclusive<u32> = 2..=15;

/// What the user asked for. A requested duration of `0` selects the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationRequest {
    Sweep,
    Single(NonZeroU32),
}

impl DurationRequest {
    /// Read a duration as typed by the user.
    ///
    /// # Errors
    /// Returns `PlannerError::Validation` for anything but a non-negative
    /// integer.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let days: i64 = raw
            .parse()
            .map_err(|_| PlannerError::Validation(format!("{:?} is not a whole number of days", raw)))?;
        if days == 0 {
            return Ok(DurationRequest::Sweep);
        }
        validate_duration(days).map(DurationRequest::Single)
    }
}

/// Check that a duration is a positive number of days that fits the optimizer.
///
/// # Errors
/// Returns `PlannerError::Validation` for zero, negative, or oversized values.
pub fn validate_duration(days: i64) -> Result<NonZeroU32> {
    if days <= 0 {
        return Err(PlannerError::Validation(format!(
            "duration must be at least 1 day, got {}",
            days
        )));
    }
    u32::try_from(days)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or_else(|| PlannerError::Validation(format!("duration of {} days is too large", days)))
}

/// Optimize a single user-supplied duration over `events`.
///
/// With no span (nothing loaded at all) the result has no windows.
///
/// # Errors
/// Returns `PlannerError::Validation` if `duration_days` is not positive.
pub fn run_single<'a>(
    events: &'a [Event],
    duration_days: i64,
    span: Option<&DatasetSpan>,
) -> Result<OptimizationResult<'a>> {
    let duration = validate_duration(duration_days)?;
    Ok(run(events, duration, span))
}

/// Optimize every duration in [`SWEEP_DURATIONS`], ascending.
///
/// Tied optimal windows of each result are available through
/// [`OptimizationResult::optimal_windows`].
pub fn run_sweep<'a>(events: &'a [Event], span: Option<&DatasetSpan>) -> Vec<OptimizationResult<'a>> {
    SWEEP_DURATIONS
        .filter_map(NonZeroU32::new)
        .map(|duration| run(events, duration, span))
        .collect()
}

fn run<'a>(
    events: &'a [Event],
    duration: NonZeroU32,
    span: Option<&DatasetSpan>,
) -> OptimizationResult<'a> {
    match span {
        Some(span) => optimize(events, duration, span.earliest, span.latest),
        None => OptimizationResult {
            duration_days: duration.get(),
            optimal_count: 0,
            windows: Vec::new(),
        },
    }
}
