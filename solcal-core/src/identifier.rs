//! Canonical string identifiers for solar calendar days.
//!
//! Every per-day collaborative record (chat threads, bookmarks, scripture
//! submissions) is keyed by one of these identifiers, so the format must be
//! deterministic and must sort lexicographically in chronological order.
//!
//! The format is `"AAAAAA-MM-DD"` where `AAAAAA` is the solar year plus a
//! fixed bias of 500000. The bias keeps the year field fixed-width and
//! non-negative, so plain string ordering matches chronological ordering
//! even for years before the anchor (a raw `-0001` would sort after
//! `0000`). [`SolarPosition`] bounds its year to the matching ±500000
//! window, which is wider than the range of solar years any representable
//! Gregorian date can map to, so every constructible position encodes to
//! exactly twelve bytes.
//!
//! Identifiers are anchor-relative: switching the active anchor changes
//! the identifier assigned to the same Gregorian day, and identifiers
//! minted under the old anchor simply go stale. That is intended behavior;
//! the engine never rewrites previously persisted keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SolcalError, SolcalResult};
use crate::position::{SolarPosition, DAYS_PER_MONTH, MONTHS_PER_YEAR};

/// Offset added to the solar year in the encoded form.
const YEAR_BIAS: i64 = 500_000;

/// A canonical, sortable key for one solar calendar day.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateIdentifier(String);

impl DateIdentifier {
    /// Encodes a position as its canonical identifier.
    ///
    /// Identical positions always produce identical identifiers, and
    /// chronologically later positions produce lexicographically greater
    /// identifiers.
    pub fn encode(position: &SolarPosition) -> DateIdentifier {
        let biased = position.year() as i64 + YEAR_BIAS;
        debug_assert!((0..1_000_000).contains(&biased));
        DateIdentifier(format!(
            "{:06}-{:02}-{:02}",
            biased,
            position.month(),
            position.day()
        ))
    }

    /// Decodes an identifier back into the position it encodes.
    ///
    /// # Errors
    ///
    /// Returns [`SolcalError::MalformedIdentifier`] if the input does not
    /// match the `AAAAAA-MM-DD` shape or carries an out-of-range month or
    /// day.
    pub fn decode(identifier: &str) -> SolcalResult<SolarPosition> {
        let malformed = |reason: &str| SolcalError::MalformedIdentifier {
            identifier: identifier.to_string(),
            reason: reason.to_string(),
        };

        let bytes = identifier.as_bytes();
        if bytes.len() != 12 || bytes[6] != b'-' || bytes[9] != b'-' {
            return Err(malformed("expected AAAAAA-MM-DD"));
        }

        let year_part = &identifier[0..6];
        let month_part = &identifier[7..9];
        let day_part = &identifier[10..12];

        for part in [year_part, month_part, day_part] {
            if !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed("expected AAAAAA-MM-DD"));
            }
        }

        let biased: i64 = year_part.parse().map_err(|_| malformed("bad year field"))?;
        let year = i32::try_from(biased - YEAR_BIAS).map_err(|_| malformed("year out of range"))?;

        let month: u8 = month_part.parse().map_err(|_| malformed("bad month field"))?;
        if !(1..=MONTHS_PER_YEAR).contains(&month) {
            return Err(malformed("month out of range (1..=13)"));
        }

        let day: u8 = day_part.parse().map_err(|_| malformed("bad day field"))?;
        if !(1..=DAYS_PER_MONTH).contains(&day) {
            return Err(malformed("day out of range (1..=28)"));
        }

        SolarPosition::new(year, month, day)
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DateIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(year: i32, month: u8, day: u8) -> SolarPosition {
        SolarPosition::new(year, month, day).unwrap()
    }

    #[test]
    fn encode_anchor_day() {
        let id = DateIdentifier::encode(&pos(0, 1, 1));
        assert_eq!(id.as_str(), "500000-01-01");
    }

    #[test]
    fn encode_negative_year() {
        let id = DateIdentifier::encode(&pos(-1, 13, 28));
        assert_eq!(id.as_str(), "499999-13-28");
    }

    #[test]
    fn encode_at_year_window_edges() {
        use crate::position::{MAX_YEAR, MIN_YEAR};

        let bottom = pos(MIN_YEAR, 1, 1);
        let top = pos(MAX_YEAR, 13, 28);

        let bottom_id = DateIdentifier::encode(&bottom);
        let top_id = DateIdentifier::encode(&top);
        assert_eq!(bottom_id.as_str(), "000000-01-01");
        assert_eq!(top_id.as_str(), "999999-13-28");
        assert!(bottom_id < top_id);

        assert_eq!(DateIdentifier::decode(bottom_id.as_str()).unwrap(), bottom);
        assert_eq!(DateIdentifier::decode(top_id.as_str()).unwrap(), top);
    }

    #[test]
    fn years_outside_window_are_unconstructible() {
        // The codec's fixed-width year field is safe because the position
        // type rejects years it could not represent.
        assert!(matches!(
            SolarPosition::new(500_000, 1, 1).unwrap_err(),
            SolcalError::InvalidYear { year: 500_000 }
        ));
        assert!(matches!(
            SolarPosition::from_year_doy(-500_001, 1).unwrap_err(),
            SolcalError::InvalidYear { year: -500_001 }
        ));
    }

    #[test]
    fn encode_is_deterministic() {
        let a = DateIdentifier::encode(&pos(12, 5, 7));
        let b = DateIdentifier::encode(&pos(12, 5, 7));
        assert_eq!(a, b);
    }

    #[test]
    fn decode_inverts_encode() {
        for p in [pos(0, 1, 1), pos(-1, 13, 28), pos(42, 7, 14), pos(-300, 2, 28)] {
            let id = DateIdentifier::encode(&p);
            assert_eq!(DateIdentifier::decode(id.as_str()).unwrap(), p);
        }
    }

    #[test]
    fn ordering_matches_chronology() {
        let earlier = pos(-1, 13, 28);
        let later = pos(0, 1, 1);
        assert!(earlier < later);
        assert!(DateIdentifier::encode(&earlier) < DateIdentifier::encode(&later));
    }

    #[test]
    fn decode_rejects_bad_shape() {
        for s in [
            "",
            "500000-01",
            "500000-01-01-01",
            "50000A-01-01",
            "500000_01_01",
            "500000-1-1",
            "0500000-01-01",
        ] {
            assert!(
                matches!(
                    DateIdentifier::decode(s),
                    Err(SolcalError::MalformedIdentifier { .. })
                ),
                "expected MalformedIdentifier for '{s}'"
            );
        }
    }

    #[test]
    fn decode_rejects_out_of_range_fields() {
        for s in ["500000-14-01", "500000-00-01", "500000-01-29", "500000-01-00"] {
            assert!(
                matches!(
                    DateIdentifier::decode(s),
                    Err(SolcalError::MalformedIdentifier { .. })
                ),
                "expected MalformedIdentifier for '{s}'"
            );
        }
    }

    #[test]
    fn serde_is_transparent() {
        let id = DateIdentifier::encode(&pos(3, 9, 21));
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_str()));
    }
}
