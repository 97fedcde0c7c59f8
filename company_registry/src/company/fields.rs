//! Helpers for raw business registry fields.

use chrono::{Datelike, NaiveDate};

/// Trim a string field, mapping blank values to `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse a registry date (`DD.MM.YYYY`) and return its year.
///
/// Returns `None` for anything that is not a real calendar date or does
/// not spell the year with four digits.
pub fn year_from_date(date: &str) -> Option<i32> {
    let date = date.trim();
    let (_, year_part) = date.rsplit_once('.')?;
    if year_part.len() != 4 {
        return None;
    }
    NaiveDate::parse_from_str(date, "%d.%m.%Y")
        .ok()
        .map(|d| d.year())
}

/// Extract the county from a registry location string.
///
/// The county is the last comma-separated part, e.g.
/// `"Narva mnt 5, Tallinn, Harju maakond"` gives `"harju"`.
pub fn extract_county_name(location: &str) -> Option<String> {
    let last = location.rsplit(',').next()?.trim();
    let county = last.replace(" maakond", "").trim().to_lowercase();
    if county.is_empty() {
        None
    } else {
        Some(county)
    }
}
