//! The normalized event type shared by every stage of the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single fixture: when it starts and which group it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub start: DateTime<Utc>,
    pub group_id: String,
    /// Raw summary text, kept for display.
    pub summary: String,
}

/// Sort events ascending by start time.
///
/// The sort is stable, so events sharing a start keep their parse order.
pub fn sort_events(events: &mut [Event]) {
    events.sort_by_key(|e| e.start);
}

/// Whether `events` is ascending by start time.
pub fn is_sorted(events: &[Event]) -> bool {
    events.windows(2).all(|w| w[0].start <= w[1].start)
}
