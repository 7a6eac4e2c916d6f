//! Group-keyed lookup of events.
//!
//! Built once per loaded dataset and read-only afterward. Each group's events
//! are ascending by start time, ties kept in parse order.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::config::PlannerConfig;
use crate::dst::local_midnight;
use crate::event::{sort_events, Event};

/// The scan range shared by every group of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DatasetSpan {
    /// Earliest event start, truncated to local midnight in the display zone.
    pub earliest: DateTime<Tz>,
    /// Latest event start.
    pub latest: DateTime<Tz>,
}

impl DatasetSpan {
    /// Span over `events` in `config.timezone`, or `None` if there are none.
    pub fn of(events: &[Event], config: &PlannerConfig) -> Option<Self> {
        let first = events.iter().map(|e| e.start).min()?;
        let last = events.iter().map(|e| e.start).max()?;
        Some(Self::from_bounds(first, last, config))
    }

    /// Span from the first and last event starts.
    pub fn from_bounds(first: DateTime<Utc>, last: DateTime<Utc>, config: &PlannerConfig) -> Self {
        let tz = config.timezone;
        let first_local = first.with_timezone(&tz);
        let earliest = local_midnight(&tz, first_local.date_naive()).unwrap_or(first_local);

        Self {
            earliest,
            latest: last.with_timezone(&tz),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventIndex {
    groups: BTreeMap<String, Vec<Event>>,
    total: usize,
}

impl EventIndex {
    /// Group `events` by `group_id`. Events are stable-sorted first, so each
    /// group comes out ascending regardless of input order.
    pub fn build(mut events: Vec<Event>) -> Self {
        sort_events(&mut events);
        let total = events.len();

        let mut groups: BTreeMap<String, Vec<Event>> = BTreeMap::new();
        for event in events {
            groups.entry(event.group_id.clone()).or_default().push(event);
        }

        tracing::debug!(groups = groups.len(), events = total, "built event index");
        Self { groups, total }
    }

    /// Events of `group_id`, ascending. Unknown groups yield an empty slice.
    pub fn lookup(&self, group_id: &str) -> &[Event] {
        self.groups.get(group_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Group ids in lexical order.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Number of events per group, in lexical group order.
    pub fn group_sizes(&self) -> impl Iterator<Item = (&str, usize)> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.len()))
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Span over every indexed event, independent of group.
    pub fn span(&self, config: &PlannerConfig) -> Option<DatasetSpan> {
        let first = self.groups.values().filter_map(|g| g.first()).map(|e| e.start).min()?;
        let last = self.groups.values().filter_map(|g| g.last()).map(|e| e.start).max()?;
        Some(DatasetSpan::from_bounds(first, last, config))
    }
}
