//! Error types for the solcal engine.

use thiserror::Error;

/// Errors that can occur in solcal calendar operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolcalError {
    /// A Gregorian input is not a real calendar date, or date arithmetic
    /// left the representable range.
    #[error("invalid Gregorian date: {0}")]
    InvalidDate(String),

    /// An anchor preset is unusable (missing or invalid start date).
    #[error("invalid anchor '{name}': {reason}")]
    InvalidAnchor { name: String, reason: String },

    /// A date identifier does not match the expected shape or ranges.
    #[error("malformed identifier '{identifier}': {reason}")]
    MalformedIdentifier { identifier: String, reason: String },

    /// Returned when a solar year is outside the representable window.
    #[error("invalid year: {year} (must be -500000..=499999)")]
    InvalidYear { year: i32 },

    /// Returned when a month number is outside 1..=13.
    #[error("invalid month: {month} (must be 1..=13)")]
    InvalidMonth { month: u8 },

    /// Returned when a day number is outside 1..=28.
    #[error("invalid day: {day} (must be 1..=28)")]
    InvalidDay { day: u8 },

    /// Returned when a day-of-year is outside 1..=364.
    #[error("invalid day of year: {doy} (must be 1..=364)")]
    InvalidDayOfYear { doy: u16 },

    /// Preset CRUD input rejected (empty name, duplicate name, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown preset id or name.
    #[error("preset not found: {0}")]
    NotFound(String),

    /// Preset storage failure reported by the persistence collaborator.
    #[error("preset store error: {0}")]
    Store(String),
}

/// Result type alias for solcal operations.
pub type SolcalResult<T> = Result<T, SolcalError>;
