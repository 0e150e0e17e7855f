//! Utility functions shared by the normalizer and the loader

use crate::error::{RatingError, Result};
use chrono::NaiveDateTime;

/// Format of the `Match: Match date` column in export reports
pub const MATCH_DATE_FORMAT: &str = "%m/%d/%Y - %H:%M";

/// Parse an export report match timestamp such as `09/15/2016 - 19:00`
pub fn parse_match_datetime(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), MATCH_DATE_FORMAT).map_err(|_| {
        RatingError::InvalidMatchDate {
            value: value.to_string(),
            expected: "MM/DD/YYYY - HH:MM".to_string(),
        }
        .into()
    })
}

/// Turn a detail report date (`M/D/YY`) into an export report timestamp.
///
/// Month and day are zero-padded, the two digit year gets a `20` prefix and
/// the supplied time of day is appended, since detail reports carry no time.
pub fn detail_date_to_match_date(value: &str, time_of_day: &str) -> Result<String> {
    let invalid = || RatingError::InvalidMatchDate {
        value: value.to_string(),
        expected: "M/D/YY".to_string(),
    };

    let parts: Vec<&str> = value.trim().split('/').collect();
    if parts.len() != 3 {
        return Err(invalid().into());
    }

    let month: u32 = parts[0].trim().parse().map_err(|_| invalid())?;
    let day: u32 = parts[1].trim().parse().map_err(|_| invalid())?;
    let year = parts[2].trim();

    Ok(format!("{:02}/{:02}/20{} - {}", month, day, year, time_of_day))
}

/// Check whether any field of a row contains the given sentinel text
pub fn row_contains<'a, I>(fields: I, sentinel: &str) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    fields.into_iter().any(|field| field.contains(sentinel))
}
