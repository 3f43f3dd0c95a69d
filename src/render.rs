//! Plain-text rendering of month and year grids.

use solcal_core::{DayDescriptor, MonthGrid};

/// Markers appended to a day number in the grid.
/// `*` sabbath, `+` feast, `o` new moon.
fn markers(day: &DayDescriptor) -> String {
    let mut s = String::new();
    if day.flags.sabbath {
        s.push('*');
    }
    if day.flags.feast {
        s.push('+');
    }
    if day.flags.new_moon {
        s.push('o');
    }
    s
}

/// Renders one 28-day month as four rows of seven.
pub fn render_month(year: i32, month: u8, days: &[DayDescriptor]) -> String {
    let mut out = String::new();

    match (days.first(), days.last()) {
        (Some(first), Some(last)) => out.push_str(&format!(
            "Month {month}, year {year}  ({} to {})\n",
            first.gregorian, last.gregorian
        )),
        _ => out.push_str(&format!("Month {month}, year {year}\n")),
    }

    for week in days.chunks(7) {
        for day in week {
            out.push_str(&format!("{:>4}{:<2}", day.position.day(), markers(day)));
        }
        out.push('\n');
    }
    out
}

/// Renders all 13 months of a year.
pub fn render_year(year: i32, months: &[MonthGrid]) -> String {
    let mut out = String::new();
    for (i, grid) in months.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&render_month(year, grid.month, &grid.days));
    }
    out.push_str("\n* sabbath  + feast  o new moon\n");
    out
}
