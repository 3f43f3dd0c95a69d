use chrono::NaiveDate;
use solcal_core::{to_solar, AnchorPreset, DateIdentifier, SolarPosition, SolcalError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn roundtrip_every_day_of_year() {
    for year in [-2, -1, 0, 1, 100] {
        for doy in 1..=364_u16 {
            let pos = SolarPosition::from_year_doy(year, doy).unwrap();
            let id = DateIdentifier::encode(&pos);
            let back = DateIdentifier::decode(id.as_str()).unwrap();
            assert_eq!(back, pos, "roundtrip failed for year {year} doy {doy}");
        }
    }
}

#[test]
fn lexicographic_order_is_chronological() {
    // Consecutive days across month and year boundaries, including the
    // negative-to-zero year transition.
    let mut ids = Vec::new();
    for year in [-1, 0, 1] {
        for doy in 1..=364_u16 {
            let pos = SolarPosition::from_year_doy(year, doy).unwrap();
            ids.push(DateIdentifier::encode(&pos));
        }
    }
    for pair in ids.windows(2) {
        assert!(
            pair[0] < pair[1],
            "identifier order broken: {} >= {}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn anchor_switch_changes_identifier_for_same_date() {
    let a1 = AnchorPreset::new("first", date(2020, 1, 1)).unwrap();
    let a2 = AnchorPreset::new("second", date(2021, 6, 15)).unwrap();
    let d = date(2024, 2, 29);

    let id1 = DateIdentifier::encode(&to_solar(d, &a1).unwrap());
    let id2 = DateIdentifier::encode(&to_solar(d, &a2).unwrap());
    assert_ne!(id1, id2);
}

#[test]
fn identifier_is_stable_for_same_anchor() {
    let anchor = AnchorPreset::new("stable", date(2020, 1, 1)).unwrap();
    let d = date(2023, 7, 4);
    let id1 = DateIdentifier::encode(&to_solar(d, &anchor).unwrap());
    let id2 = DateIdentifier::encode(&to_solar(d, &anchor).unwrap());
    assert_eq!(id1, id2);
}

#[test]
fn corrupt_identifiers_rejected() {
    for s in [
        "",
        "499999",
        "499999-13",
        "499999-13-28-01",
        "49999x-01-01",
        "500000-14-01",
        "500000-01-29",
        "500000-00-10",
        "500000-10-00",
        "500000/01/01",
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
