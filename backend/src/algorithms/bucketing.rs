//! Calendar bucketing of publish timestamps.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::time::{parse_publish_date, Month};

/// Record count for one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Record count for one calendar month, all years combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
    pub month: Month,
    pub count: usize,
}

/// Year and month groupings of one batch of timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarBuckets {
    /// Ascending by year.
    pub by_year: Vec<YearCount>,
    /// January to December, months without records omitted.
    pub by_month: Vec<MonthCount>,
    /// Timestamps that could not be parsed.
    pub skipped: usize,
}

impl CalendarBuckets {
    /// Parse and bucket raw timestamps, skipping the malformed ones.
    pub fn from_timestamps<I, S>(timestamps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dates = Vec::new();
        let mut skipped = 0;

        for raw in timestamps {
            match parse_publish_date(raw.as_ref()) {
                Ok(date) => dates.push(date),
                Err(e) => {
                    log::warn!("Skipping timestamp: {}", e);
                    skipped += 1;
                }
            }
        }

        Self {
            by_year: bucket_by_year(&dates),
            by_month: bucket_by_month(&dates),
            skipped,
        }
    }

    /// Number of timestamps that made it into the buckets.
    pub fn bucketed(&self) -> usize {
        self.by_year.iter().map(|y| y.count).sum()
    }
}

/// Count dates per calendar year, ascending.
pub fn bucket_by_year(dates: &[NaiveDate]) -> Vec<YearCount> {
    let mut years: BTreeMap<i32, usize> = BTreeMap::new();
    for date in dates {
        *years.entry(date.year()).or_default() += 1;
    }
    years
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

/// Count dates per calendar month in January-to-December order.
pub fn bucket_by_month(dates: &[NaiveDate]) -> Vec<MonthCount> {
    let mut months = [0usize; 12];
    for date in dates {
        months[date.month0() as usize] += 1;
    }
    Month::ALL
        .iter()
        .zip(months)
        .filter(|(_, count)| *count > 0)
        .map(|(&month, count)| MonthCount { month, count })
        .collect()
}
