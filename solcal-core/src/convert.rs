//! Conversion between Gregorian dates and solar calendar positions.
//!
//! All arithmetic is integer day counts over chrono's proleptic Gregorian
//! calendar, treated as timezone-naive whole days. No time-of-day, no DST.

use chrono::{Days, NaiveDate};

use crate::anchor::AnchorPreset;
use crate::error::{SolcalError, SolcalResult};
use crate::position::{SolarPosition, DAYS_PER_YEAR};

/// Exact signed day count from `a` to `b` (positive when `b` is later).
///
/// Correct across Gregorian month, year, and leap-year boundaries for any
/// representable date, past or future.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    b.signed_duration_since(a).num_days()
}

/// Converts a Gregorian date to its solar position under the given anchor.
///
/// The anchor's start date maps to `{year 0, month 1, day 1, doy 1}`.
/// Dates before the anchor produce negative years: the day before the
/// anchor is `{year -1, month 13, day 28, doy 364}`.
pub fn to_solar(date: NaiveDate, anchor: &AnchorPreset) -> SolcalResult<SolarPosition> {
    let delta = days_between(anchor.start_date, date);
    let year_len = DAYS_PER_YEAR as i64;
    let year = delta.div_euclid(year_len);
    let doy = delta.rem_euclid(year_len) as u16 + 1;

    let year = i32::try_from(year).map_err(|_| {
        SolcalError::InvalidDate(format!("date {date} is out of solar year range"))
    })?;

    SolarPosition::from_year_doy(year, doy)
}

/// Converts a solar position back to the Gregorian date it came from.
///
/// Exact inverse of [`to_solar`] under the same anchor.
///
/// # Errors
///
/// Returns [`SolcalError::InvalidDate`] if the resulting Gregorian date
/// falls outside chrono's representable range.
pub fn from_solar(position: &SolarPosition, anchor: &AnchorPreset) -> SolcalResult<NaiveDate> {
    let delta = position.year() as i64 * DAYS_PER_YEAR as i64 + position.doy() as i64 - 1;

    let shifted = if delta >= 0 {
        anchor.start_date.checked_add_days(Days::new(delta as u64))
    } else {
        anchor.start_date.checked_sub_days(Days::new(delta.unsigned_abs()))
    };

    shifted.ok_or_else(|| {
        SolcalError::InvalidDate(format!(
            "solar year {} overflows the Gregorian date range",
            position.year()
        ))
    })
}

/// Strict `YYYY-MM-DD` parse of a Gregorian date.
///
/// # Errors
///
/// Returns [`SolcalError::InvalidDate`] if the input is malformed or not a
/// real calendar date (e.g. `2021-02-29`).
pub fn parse_gregorian(s: &str) -> SolcalResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| SolcalError::InvalidDate(format!("'{s}' (expected YYYY-MM-DD)")))
}
