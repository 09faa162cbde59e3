//! Synthetic data generation for dashboard charts.
//!
//! These helpers produce plausible-looking numbers for the UI. They are not
//! metrics and nothing they return is stored.

use chrono::{Days, NaiveDate};
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::error::InsightsError;
use crate::types::Count;

/// Longest range, in days, a caller may ask for.
pub const MAX_TIME_SPAN: u32 = 366;

/// Source of fake chart values.
pub trait SyntheticDataGenerator {
    /// A whole number in `[0, upper)`. Returns `0.0` when `upper` is zero.
    fn data_point(&mut self, upper: u32) -> f64;

    /// `floor(x)` for a uniform `x` in `[min, max)`.
    fn int_between(&mut self, min: f64, max: f64) -> f64;

    /// A random walk over `dates`: each step moves the running total by at
    /// most `max_step` in either direction, never below zero.
    fn cumulative(&mut self, dates: &[NaiveDate], max_step: u32) -> Vec<Count>;
}

/// [`SyntheticDataGenerator`] driven by any `rand` RNG.
#[derive(Debug, Clone)]
pub struct RandomGenerator<R> {
    rng: R,
}

impl RandomGenerator<ThreadRng> {
    /// Generator backed by the thread-local RNG.
    #[must_use]
    pub fn thread() -> Self {
        Self { rng: rand::rng() }
    }
}

impl<R: Rng> RandomGenerator<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SyntheticDataGenerator for RandomGenerator<R> {
    fn data_point(&mut self, upper: u32) -> f64 {
        if upper == 0 {
            return 0.0;
        }
        f64::from(self.rng.random_range(0..upper))
    }

    fn int_between(&mut self, min: f64, max: f64) -> f64 {
        (self.rng.random::<f64>() * (max - min) + min).floor()
    }

    fn cumulative(&mut self, dates: &[NaiveDate], max_step: u32) -> Vec<Count> {
        let bound = i64::from(max_step);
        let mut total: i64 = 0;
        dates
            .iter()
            .map(|&date| {
                total = (total + self.rng.random_range(-bound..=bound)).max(0);
                #[allow(clippy::cast_precision_loss)]
                let count = total as f64;
                Count { date, count }
            })
            .collect()
    }
}

/// Exactly `days` consecutive dates, oldest first, with `end` as the last entry.
///
/// # Errors
///
/// - [`InsightsError::TimeSpanTooLong`] if `days` exceeds [`MAX_TIME_SPAN`].
/// - [`InsightsError::DateOutOfRange`] if the first date would precede
///   `NaiveDate::MIN`.
pub fn dates_ending_on(days: u32, end: NaiveDate) -> Result<Vec<NaiveDate>, InsightsError> {
    if days > MAX_TIME_SPAN {
        return Err(InsightsError::TimeSpanTooLong {
            requested: days,
            max: MAX_TIME_SPAN,
        });
    }
    if days == 0 {
        return Ok(Vec::new());
    }
    let start = end
        .checked_sub_days(Days::new(u64::from(days - 1)))
        .ok_or(InsightsError::DateOutOfRange { days, end })?;
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}
