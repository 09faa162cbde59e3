use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InsightsError {
    #[error("time span of {requested} days exceeds the maximum of {max}")]
    TimeSpanTooLong { requested: u32, max: u32 },

    /// The requested range would start before the earliest representable date.
    #[error("{days} days ending on {end} starts before the earliest supported date")]
    DateOutOfRange { days: u32, end: NaiveDate },
}
