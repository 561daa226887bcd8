//! Publish-timestamp parsing and calendar month handling.
//!
//! Timestamps arrive as strings in whatever shape the upstream crawler stored
//! them. They are reduced to a timezone-naive calendar date: an RFC 3339 value
//! keeps the date exactly as written, without shifting it to UTC.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::algorithms::AggregationError;

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a publish timestamp into a naive calendar date.
///
/// Accepted forms, tried in order: RFC 3339, naive date-time (with `T` or a
/// space, optional fractional seconds) and plain `YYYY-MM-DD`.
pub fn parse_publish_date(raw: &str) -> Result<NaiveDate, AggregationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AggregationError::parse(raw, "empty timestamp"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local().date());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt.date());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| AggregationError::parse(raw, e.to_string()))
}

/// Calendar month, ordered January to December.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All months in canonical order.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Month from its 1-based number.
    pub fn from_number(number: u32) -> Option<Self> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// Month of a calendar date.
    pub fn of(date: &NaiveDate) -> Self {
        // chrono guarantees month() in 1..=12
        Self::ALL[date.month0() as usize]
    }

    /// 1-based month number.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// English month name.
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_publish_date("2023-01-15").unwrap(), ymd(2023, 1, 15));
    }

    #[test]
    fn test_parse_rfc3339_keeps_written_date() {
        assert_eq!(
            parse_publish_date("2021-06-30T23:30:00Z").unwrap(),
            ymd(2021, 6, 30)
        );
        // Offset is not normalised to UTC
        assert_eq!(
            parse_publish_date("2021-07-01T01:00:00+07:00").unwrap(),
            ymd(2021, 7, 1)
        );
    }

    #[test]
    fn test_parse_naive_datetime_variants() {
        assert_eq!(
            parse_publish_date("2022-03-04T05:06:07").unwrap(),
            ymd(2022, 3, 4)
        );
        assert_eq!(
            parse_publish_date("2022-03-04 05:06:07.250").unwrap(),
            ymd(2022, 3, 4)
        );
        assert_eq!(
            parse_publish_date("  2022-03-04 05:06 ").unwrap(),
            ymd(2022, 3, 4)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_publish_date("not a date"),
            Err(AggregationError::Parse { .. })
        ));
        assert!(parse_publish_date("").is_err());
        assert!(parse_publish_date("2023-13-01").is_err());
    }

    #[test]
    fn test_month_roundtrip_numbers() {
        for (i, month) in Month::ALL.iter().enumerate() {
            assert_eq!(month.number() as usize, i + 1);
            assert_eq!(Month::from_number(month.number()), Some(*month));
        }
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
    }

    #[test]
    fn test_month_of_date_and_display() {
        let month = Month::of(&ymd(2020, 9, 1));
        assert_eq!(month, Month::September);
        assert_eq!(month.to_string(), "September");
        assert!(Month::January < Month::December);
    }
}
