//! Date helper functions

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DAY_MONTH_YEAR_RE: Regex = Regex::new(r"(\d+)\s+(\w+)\s+(\d+)").unwrap();
    static ref ISO_DATE_RE: Regex = Regex::new(r"(\d{4})-(\d{2})-(\d{2})").unwrap();
}

/// Parse a post date from either the front-matter display form
/// (`"29 Jan 2023"`) or a `YYYY-MM-DD` embedded in the value (typically
/// the filename, e.g. `journals/2023-01-29.md`).
pub fn parse_post_date(s: &str) -> Option<NaiveDate> {
    if let Some(caps) = DAY_MONTH_YEAR_RE.captures(s) {
        let day: u32 = caps[1].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        if let Some(month) = month_number(&caps[2]) {
            return NaiveDate::from_ymd_opt(year, month, day);
        }
    }

    if let Some(caps) = ISO_DATE_RE.captures(s) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

fn month_number(name: &str) -> Option<u32> {
    let n = match name {
        "Jan" => 1,
        "Feb" => 2,
        "Mar" => 3,
        "Apr" => 4,
        "May" => 5,
        "Jun" => 6,
        "Jul" => 7,
        "Aug" => 8,
        "Sep" => 9,
        "Oct" => 10,
        "Nov" => 11,
        "Dec" => 12,
        _ => return None,
    };
    Some(n)
}
