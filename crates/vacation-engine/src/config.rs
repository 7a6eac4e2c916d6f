//! Planner configuration: display time zone and group delimiter.

use chrono_tz::Tz;

use crate::error::{PlannerError, Result};

/// Zone used when none is configured. Fixture times are published in it.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Toronto;

/// Marker separating the two group names in an event summary ("Away @ Home").
pub const DEFAULT_DELIMITER: char = '@';

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    /// Zone in which days are counted, floating times are read, and results
    /// are displayed.
    pub timezone: Tz,
    /// Summaries without this marker are not considered events of any group.
    pub delimiter: char,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl PlannerConfig {
    /// Default configuration with the display zone set from an IANA name.
    ///
    /// # Errors
    /// Returns `PlannerError::InvalidTimezone` if `name` is not a known zone.
    pub fn with_timezone(name: &str) -> Result<Self> {
        Ok(Self {
            timezone: parse_timezone(name)?,
            ..Self::default()
        })
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse()
        .map_err(|_| PlannerError::InvalidTimezone(name.to_string()))
}
