//! The static destination list.
//!
//! Each destination names the group (team) whose events make it exciting.
//! The planner itself only needs the `team` field; the rest drives display.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Listing tier of a destination. The UI shows each tier as its own list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Classification {
    A,
    B,
}

impl Classification {
    pub const ALL: [Classification; 2] = [Classification::A, Classification::B];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub location: String,
    pub country: String,
    /// Group id matched against event summaries.
    pub team: String,
    pub classification: Classification,
}

impl Destination {
    pub fn flag(&self) -> &'static str {
        if self.country == "Canada" {
            "🇨🇦"
        } else {
            "🇺🇸"
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationCatalog {
    destinations: Vec<Destination>,
}

impl DestinationCatalog {
    pub fn new(destinations: Vec<Destination>) -> Self {
        Self { destinations }
    }

    /// Parse a JSON array of destination records.
    ///
    /// # Errors
    /// Returns `PlannerError::Destinations` on malformed JSON or records.
    pub fn from_json(json: &str) -> Result<Self> {
        let destinations: Vec<Destination> = serde_json::from_str(json)?;
        tracing::debug!(destinations = destinations.len(), "loaded destination list");
        Ok(Self::new(destinations))
    }

    pub fn all(&self) -> &[Destination] {
        &self.destinations
    }

    /// Destinations of one tier, ordered by country then location.
    pub fn by_classification(&self, classification: Classification) -> Vec<&Destination> {
        let mut listed: Vec<&Destination> = self
            .destinations
            .iter()
            .filter(|d| d.classification == classification)
            .collect();
        listed.sort_by(|a, b| {
            a.country
                .cmp(&b.country)
                .then_with(|| a.location.cmp(&b.location))
        });
        listed
    }

    /// Find a destination by team id or location name, ignoring case.
    pub fn find(&self, query: &str) -> Option<&Destination> {
        let query = query.trim();
        self.destinations
            .iter()
            .find(|d| d.team.eq_ignore_ascii_case(query))
            .or_else(|| {
                self.destinations
                    .iter()
                    .find(|d| d.location.eq_ignore_ascii_case(query))
            })
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}
