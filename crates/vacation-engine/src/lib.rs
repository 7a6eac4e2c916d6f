//! # vacation-engine
//!
//! Finds the vacation dates that overlap the most "exciting" calendar events,
//! such as the home games of a destination's team.
//!
//! Calendar feeds are parsed into events tagged with a group id, indexed by
//! group, and scanned with a day-aligned sliding window for one duration or a
//! sweep of durations. Day boundaries follow a fixed display time zone via
//! `chrono-tz`, so windows stay on local midnight across DST transitions.
//!
//! ## Modules
//!
//! - [`ical`] — iCalendar text → events
//! - [`index`] — events grouped by group id, plus the dataset span
//! - [`optimizer`] — sliding-window search for one duration
//! - [`driver`] — single-duration and sweep runs, duration validation
//! - [`report`] — display-ready rows with optimal flags
//! - [`destinations`] — the static destination list
//! - [`session`] — a loaded dataset as one immutable context
//! - [`dst`] — local-time resolution across DST transitions
//! - [`config`] — display zone and group delimiter
//! - [`error`] — Error types

pub mod config;
pub mod destinations;
pub mod driver;
pub mod dst;
pub mod error;
pub mod event;
pub mod ical;
pub mod index;
pub mod optimizer;
pub mod report;
pub mod session;

pub use config::PlannerConfig;
pub use destinations::{Classification, Destination, DestinationCatalog};
pub use driver::{run_single, run_sweep, DurationRequest, SWEEP_DURATIONS};
pub use error::PlannerError;
pub use event::{sort_events, Event};
pub use ical::{parse_calendar, parse_feeds};
pub use index::{DatasetSpan, EventIndex};
pub use optimizer::{optimize, OptimizationResult, Window, WindowResult};
pub use report::{sweep_report, SingleReport, SweepRow, WindowRow};
pub use session::PlannerSession;
