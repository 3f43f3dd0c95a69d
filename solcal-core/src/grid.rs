//! Grid building: renderable month and year views of the solar calendar.
//!
//! Pure projection over the conversion functions. Nothing here is
//! persisted; grids are recomputed whenever the active anchor changes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::anchor::AnchorPreset;
use crate::convert::from_solar;
use crate::error::SolcalResult;
use crate::identifier::DateIdentifier;
use crate::position::{SolarPosition, DAYS_PER_MONTH, MONTHS_PER_YEAR};

/// Day classification flags, computed from [`FlagRules`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayFlags {
    pub sabbath: bool,
    pub feast: bool,
    pub new_moon: bool,
}

/// The rule table the grid builder consults when flagging days.
///
/// Rules are data, not code: a community that keeps a different feast
/// table or sabbath cadence supplies its own rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagRules {
    /// Every `sabbath_interval`-th day of a month is a sabbath
    /// (7 marks days 7, 14, 21, 28). Zero disables sabbath flagging.
    pub sabbath_interval: u8,
    /// Day of the month flagged as new moon. Zero disables the flag.
    pub new_moon_day: u8,
    /// `(month, day)` pairs flagged as feast days.
    pub feast_days: Vec<(u8, u8)>,
}

impl Default for FlagRules {
    fn default() -> Self {
        FlagRules {
            sabbath_interval: 7,
            new_moon_day: 1,
            feast_days: Vec::new(),
        }
    }
}

impl FlagRules {
    /// Computes the flags for one calendar day.
    pub fn flags_for(&self, position: &SolarPosition) -> DayFlags {
        DayFlags {
            sabbath: self.sabbath_interval != 0 && position.day() % self.sabbath_interval == 0,
            feast: self
                .feast_days
                .iter()
                .any(|&(m, d)| m == position.month() && d == position.day()),
            new_moon: self.new_moon_day != 0 && position.day() == self.new_moon_day,
        }
    }
}

/// One renderable day: position, Gregorian equivalent, canonical key,
/// and flags. Ephemeral; recomputed per build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayDescriptor {
    pub position: SolarPosition,
    pub gregorian: NaiveDate,
    pub identifier: DateIdentifier,
    pub flags: DayFlags,
}

/// The 28 descriptors of one month, with the month number they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub month: u8,
    pub days: Vec<DayDescriptor>,
}

/// Builds the 28 ordered descriptors for one month under the given anchor.
///
/// # Errors
///
/// Returns [`crate::SolcalError::InvalidMonth`] for a month outside 1..=13,
/// or [`crate::SolcalError::InvalidDate`] if the month lies outside the
/// representable Gregorian range.
pub fn build_month(
    year: i32,
    month: u8,
    anchor: &AnchorPreset,
    rules: &FlagRules,
) -> SolcalResult<Vec<DayDescriptor>> {
    let mut days = Vec::with_capacity(DAYS_PER_MONTH as usize);
    for day in 1..=DAYS_PER_MONTH {
        let position = SolarPosition::new(year, month, day)?;
        let gregorian = from_solar(&position, anchor)?;
        days.push(DayDescriptor {
            position,
            gregorian,
            identifier: DateIdentifier::encode(&position),
            flags: rules.flags_for(&position),
        });
    }
    Ok(days)
}

/// Builds all 13 months of a year (364 descriptors in total).
pub fn build_year(
    year: i32,
    anchor: &AnchorPreset,
    rules: &FlagRules,
) -> SolcalResult<Vec<MonthGrid>> {
    let mut months = Vec::with_capacity(MONTHS_PER_YEAR as usize);
    for month in 1..=MONTHS_PER_YEAR {
        months.push(MonthGrid {
            month,
            days: build_month(year, month, anchor, rules)?,
        });
    }
    Ok(months)
}
