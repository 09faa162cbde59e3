//! Dashboard insights for flowdeck.
//!
//! Nothing here measures real executions. The summary is a fixed table and
//! every count series is produced by a [`SyntheticDataGenerator`], so the
//! output is only fit for rendering charts.

pub mod error;
pub mod provider;
pub mod synthetic;
pub mod types;

pub use error::InsightsError;
pub use provider::{CountsQuery, InsightsProvider};
pub use synthetic::{dates_ending_on, RandomGenerator, SyntheticDataGenerator, MAX_TIME_SPAN};
pub use types::{Count, CountResponse, Evaluation, Summary, SummaryId, TimeSavedCounts, TotalCounts};
