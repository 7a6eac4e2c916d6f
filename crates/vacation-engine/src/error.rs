//! Error types for vacation-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    /// The input was not valid iCalendar data.
    /// Includes the 1-based (unfolded) line number where the error was detected.
    #[error("Calendar parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid duration: {0}")]
    Validation(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid destination list: {0}")]
    Destinations(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
