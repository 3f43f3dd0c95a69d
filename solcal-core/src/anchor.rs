//! Anchor presets: named Gregorian dates that define day 1 of the calendar.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{SolcalError, SolcalResult};

/// A named anchor: the Gregorian date on which solar year 0, month 1,
/// day 1 falls.
///
/// The start date is an exact calendar day with no time component;
/// `NaiveDate` guarantees it is a real, unambiguous date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorPreset {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
}

impl AnchorPreset {
    /// Creates a preset with a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns [`SolcalError::Validation`] if the name is empty or
    /// whitespace-only.
    pub fn new(name: &str, start_date: NaiveDate) -> SolcalResult<Self> {
        let name = validate_name(name)?;
        Ok(AnchorPreset {
            id: Uuid::new_v4().to_string(),
            name,
            start_date,
        })
    }
}

/// Trim and check a preset name. Uniqueness is the manager's concern.
pub(crate) fn validate_name(name: &str) -> SolcalResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SolcalError::Validation("preset name must not be empty".into()));
    }
    Ok(trimmed.to_string())
}
