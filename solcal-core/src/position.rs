//! Position types for the 364-day solar calendar.
//!
//! The calendar has 13 months of exactly 28 days each, so a year is always
//! 364 days. Year 0 begins on the active anchor's Gregorian start date;
//! years before the anchor are negative.

use serde::{Deserialize, Serialize};

use crate::error::{SolcalError, SolcalResult};

/// Number of months in a solar year.
pub const MONTHS_PER_YEAR: u8 = 13;

/// Number of days in every month.
pub const DAYS_PER_MONTH: u8 = 28;

/// Number of days in a solar year (13 × 28).
pub const DAYS_PER_YEAR: u16 = 364;

/// Smallest representable solar year.
pub const MIN_YEAR: i32 = -500_000;

/// Largest representable solar year.
///
/// The ±500000 window matches the fixed-width year field of the date
/// identifier format and is a superset of every solar year a
/// representable Gregorian date can map to under any anchor.
pub const MAX_YEAR: i32 = 499_999;

/// A date in the 364-day solar calendar, relative to some anchor.
///
/// Ordering is chronological: by year, then day-of-year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SolarPositionRepr")]
pub struct SolarPosition {
    year: i32,
    month: u8,
    day: u8,
    doy: u16,
}

/// Wire shape of [`SolarPosition`]. Conversion re-runs the constructor
/// checks, so deserialization cannot produce a position that violates the
/// month/day/doy invariants.
#[derive(Deserialize)]
struct SolarPositionRepr {
    year: i32,
    month: u8,
    day: u8,
    doy: u16,
}

impl TryFrom<SolarPositionRepr> for SolarPosition {
    type Error = SolcalError;

    fn try_from(repr: SolarPositionRepr) -> Result<Self, Self::Error> {
        let position = SolarPosition::new(repr.year, repr.month, repr.day)?;
        if position.doy != repr.doy {
            return Err(SolcalError::InvalidDayOfYear { doy: repr.doy });
        }
        Ok(position)
    }
}

impl PartialOrd for SolarPosition {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SolarPosition {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.year, self.doy).cmp(&(other.year, other.doy))
    }
}

impl SolarPosition {
    /// Creates a position from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns [`SolcalError::InvalidYear`] if `year` is outside
    /// [`MIN_YEAR`]..=[`MAX_YEAR`], [`SolcalError::InvalidMonth`] if
    /// `month` is not in 1..=13, or [`SolcalError::InvalidDay`] if `day`
    /// is not in 1..=28.
    pub fn new(year: i32, month: u8, day: u8) -> SolcalResult<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(SolcalError::InvalidYear { year });
        }
        if !(1..=MONTHS_PER_YEAR).contains(&month) {
            return Err(SolcalError::InvalidMonth { month });
        }
        if !(1..=DAYS_PER_MONTH).contains(&day) {
            return Err(SolcalError::InvalidDay { day });
        }
        let doy = (month as u16 - 1) * DAYS_PER_MONTH as u16 + day as u16;
        Ok(Self { year, month, day, doy })
    }

    /// Creates a position from a year and day-of-year.
    ///
    /// # Errors
    ///
    /// Returns [`SolcalError::InvalidYear`] if `year` is outside
    /// [`MIN_YEAR`]..=[`MAX_YEAR`], or [`SolcalError::InvalidDayOfYear`]
    /// if `doy` is not in 1..=364.
    pub fn from_year_doy(year: i32, doy: u16) -> SolcalResult<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(SolcalError::InvalidYear { year });
        }
        if !(1..=DAYS_PER_YEAR).contains(&doy) {
            return Err(SolcalError::InvalidDayOfYear { doy });
        }
        let month = ((doy - 1) / DAYS_PER_MONTH as u16) as u8 + 1;
        let day = ((doy - 1) % DAYS_PER_MONTH as u16) as u8 + 1;
        Ok(Self { year, month, day, doy })
    }

    /// Returns the solar year (0-based at the anchor, negative before it).
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month (1..=13).
    pub fn month(self) -> u8 {
        self.month
    }

    /// Returns the day within the month (1..=28).
    pub fn day(self) -> u8 {
        self.day
    }

    /// Returns the day-of-year (1..=364).
    pub fn doy(self) -> u16 {
        self.doy
    }
}
