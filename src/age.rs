//! age.rs
//!
//! Human-readable "uptime" since a birthday, in the format:
//!     "X years, Y months, Z days"
//!
//! Chrono does not provide a built-in year/month/day diff, so it is built
//! from whole calendar months first, then the remaining days:
//!   • adding months clamps to the end of shorter months (Jan 31 + 1 month
//!     is Feb 28/29), so day underflow never goes negative
//!   • leap years and varying month lengths come from chrono itself
//!
//! Zero components are left out; an all-zero difference reads "0 days".

use chrono::{Datelike, Months, NaiveDate};

/// Returns the uptime since `birthdate` as seen on `today`.
pub fn uptime_string(birthdate: NaiveDate, today: NaiveDate) -> String {
    if today <= birthdate {
        return "0 days".to_string();
    }

    let (total_months, anchor) = whole_months_between(birthdate, today);
    let days = (today - anchor).num_days();

    let parts: Vec<String> = [
        (i64::from(total_months / 12), "year"),
        (i64::from(total_months % 12), "month"),
        (days, "day"),
    ]
    .into_iter()
    .filter(|(n, _)| *n > 0)
    .map(|(n, unit)| format!("{n} {unit}{}", plural(n)))
    .collect();

    if parts.is_empty() {
        "0 days".to_string()
    } else {
        parts.join(", ")
    }
}

/// Largest month count `m` with `from + m months <= to`, plus that date.
fn whole_months_between(from: NaiveDate, to: NaiveDate) -> (u32, NaiveDate) {
    let span = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    let mut months = span.max(0) as u32;

    loop {
        match from.checked_add_months(Months::new(months)) {
            Some(anchor) if anchor <= to => return (months, anchor),
            _ if months == 0 => return (0, from),
            _ => months -= 1,
        }
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}
