//! Aggregation core: frequency tallies, calendar bucketing and word counts.
//!
//! Everything here is a pure function of its input. The service layer feeds
//! these with records from one collection snapshot and shapes the results
//! into chart payloads.

pub mod bucketing;
pub mod frequency;
pub mod words;

pub use bucketing::{bucket_by_month, bucket_by_year, CalendarBuckets, MonthCount, YearCount};
pub use frequency::{FrequencyTable, Ranking, RankedEntry};
pub use words::{word_frequencies, WordWeight, MAX_CLOUD_WORDS};

/// Errors raised by the aggregation core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregationError {
    /// A caller-supplied argument is outside its valid range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A single input value could not be parsed.
    #[error("Parse error for '{input}': {reason}")]
    Parse { input: String, reason: String },
}

impl AggregationError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

pub type AggregationResult<T> = Result<T, AggregationError>;
