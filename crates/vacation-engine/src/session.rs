//! A loaded dataset and everything derived from it once.
//!
//! The session owns the event index, the dataset span and the destination
//! catalog. It is immutable after construction, so every query is an
//! independent, deterministic computation over shared read-only data.

use crate::config::PlannerConfig;
use crate::destinations::DestinationCatalog;
use crate::driver;
use crate::error::Result;
use crate::event::Event;
use crate::index::{DatasetSpan, EventIndex};
use crate::optimizer::OptimizationResult;

#[derive(Debug, Clone)]
pub struct PlannerSession {
    config: PlannerConfig,
    catalog: DestinationCatalog,
    index: EventIndex,
    span: Option<DatasetSpan>,
}

impl PlannerSession {
    /// Index `events` and compute the scan span over all of them.
    pub fn new(config: PlannerConfig, catalog: DestinationCatalog, events: Vec<Event>) -> Self {
        let index = EventIndex::build(events);
        let span = index.span(&config);
        if let Some(span) = &span {
            tracing::debug!(
                earliest = %span.earliest,
                latest = %span.latest,
                "dataset span"
            );
        }
        Self {
            config,
            catalog,
            index,
            span,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &DestinationCatalog {
        &self.catalog
    }

    pub fn index(&self) -> &EventIndex {
        &self.index
    }

    /// `None` when no events were loaded.
    pub fn span(&self) -> Option<&DatasetSpan> {
        self.span.as_ref()
    }

    pub fn events_for(&self, group_id: &str) -> &[Event] {
        self.index.lookup(group_id)
    }

    /// Resolve user input (team id or location name) to a group id.
    ///
    /// Falls back to the input itself so groups missing from the destination
    /// list can still be queried.
    pub fn resolve_group<'s>(&'s self, query: &'s str) -> &'s str {
        match self.catalog.find(query) {
            Some(destination) => destination.team.as_str(),
            None => {
                if !self.catalog.is_empty() {
                    tracing::warn!(query, "destination not in catalog, using it as a group id");
                }
                query.trim()
            }
        }
    }

    /// # Errors
    /// Returns `PlannerError::Validation` if `duration_days` is not positive.
    pub fn run_single(&self, group_id: &str, duration_days: i64) -> Result<OptimizationResult<'_>> {
        driver::run_single(self.events_for(group_id), duration_days, self.span())
    }

    pub fn run_sweep(&self, group_id: &str) -> Vec<OptimizationResult<'_>> {
        driver::run_sweep(self.events_for(group_id), self.span())
    }
}
