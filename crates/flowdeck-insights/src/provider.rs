use chrono::{NaiveDate, Utc};
use rand::rngs::ThreadRng;

use crate::error::InsightsError;
use crate::synthetic::{dates_ending_on, RandomGenerator, SyntheticDataGenerator};
use crate::types::{
    Count, CountResponse, Evaluation, Summary, SummaryId, TimeSavedCounts, TotalCounts,
};

/// Upper bound (exclusive) for the execution-count series.
const COUNT_UPPER_BOUND: u32 = 400;
const TIME_SAVED_AVERAGE_STEP: u32 = 3;
const TIME_SAVED_MEDIAN_STEP: u32 = 4;
const RUN_TIME_MIN: f64 = 0.5;
const RUN_TIME_MAX: f64 = 4.0;

/// Parameters for [`InsightsProvider::fetch_counts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountsQuery {
    /// Number of days to cover, ending today.
    pub time_span: u32,
}

/// Serves the insights dashboard with fixed summaries and synthetic series.
#[derive(Debug)]
pub struct InsightsProvider<G = RandomGenerator<ThreadRng>> {
    generator: G,
}

impl InsightsProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::with_generator(RandomGenerator::thread())
    }
}

impl Default for InsightsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: SyntheticDataGenerator> InsightsProvider<G> {
    #[must_use]
    pub fn with_generator(generator: G) -> Self {
        Self { generator }
    }

    /// The five summary tiles, in display order.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn fetch_summary(&self) -> Vec<Summary> {
        vec![
            Summary {
                id: SummaryId::Total,
                title: "Total",
                count: 525.0,
                sign: None,
                deviation: 85.0,
                evaluation: Some(Evaluation::Positive),
            },
            Summary {
                id: SummaryId::Failed,
                title: "Failed",
                count: 14.0,
                sign: None,
                deviation: 3.0,
                evaluation: Some(Evaluation::Negative),
            },
            Summary {
                id: SummaryId::FailureRate,
                title: "Failure rate",
                count: 1.9,
                sign: Some("%"),
                deviation: -5.0,
                evaluation: Some(Evaluation::Negative),
            },
            Summary {
                id: SummaryId::TimeSaved,
                title: "Time saved",
                count: 54.0,
                sign: Some("h"),
                deviation: -5.0,
                evaluation: Some(Evaluation::Negative),
            },
            Summary {
                id: SummaryId::RunTime,
                title: "Avg. run time",
                count: 2.5,
                sign: Some("s"),
                deviation: -5.0,
                evaluation: Some(Evaluation::Positive),
            },
        ]
    }

    /// Synthetic count series covering `query.time_span` days up to today (UTC).
    ///
    /// # Errors
    ///
    /// Returns [`InsightsError`] if the span cannot be turned into dates.
    pub fn fetch_counts(&mut self, query: CountsQuery) -> Result<CountResponse, InsightsError> {
        self.fetch_counts_on(query.time_span, Utc::now().date_naive())
    }

    /// Like [`fetch_counts`](Self::fetch_counts) with an explicit last day.
    ///
    /// # Errors
    ///
    /// Returns [`InsightsError`] if the span cannot be turned into dates.
    pub fn fetch_counts_on(
        &mut self,
        time_span: u32,
        today: NaiveDate,
    ) -> Result<CountResponse, InsightsError> {
        tracing::debug!(time_span, %today, "generating synthetic insight counts");
        let dates = dates_ending_on(time_span, today)?;

        Ok(CountResponse {
            total: TotalCounts {
                failure: self.random_series(&dates),
                success: self.random_series(&dates),
            },
            failed: self.random_series(&dates),
            failure_rate: self.random_series(&dates),
            time_saved: TimeSavedCounts {
                average: self.generator.cumulative(&dates, TIME_SAVED_AVERAGE_STEP),
                median: self.generator.cumulative(&dates, TIME_SAVED_MEDIAN_STEP),
            },
            run_time: dates
                .iter()
                .map(|&date| Count {
                    date,
                    count: self.generator.int_between(RUN_TIME_MIN, RUN_TIME_MAX),
                })
                .collect(),
        })
    }

    fn random_series(&mut self, dates: &[NaiveDate]) -> Vec<Count> {
        dates
            .iter()
            .map(|&date| Count {
                date,
                count: self.generator.data_point(COUNT_UPPER_BOUND),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::synthetic::MAX_TIME_SPAN;

    fn seeded_provider() -> InsightsProvider<RandomGenerator<StdRng>> {
        InsightsProvider::with_generator(RandomGenerator::new(StdRng::seed_from_u64(42)))
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn summary_has_five_entries_in_display_order() {
        let ids: Vec<&str> = InsightsProvider::new()
            .fetch_summary()
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec!["total", "failed", "failureRate", "timeSaved", "runTime"]
        );
    }

    #[test]
    fn summary_values_are_fixed() {
        let summary = seeded_provider().fetch_summary();
        assert!((summary[0].count - 525.0).abs() < f64::EPSILON);
        assert!((summary[2].count - 1.9).abs() < f64::EPSILON);
        assert_eq!(summary[2].sign, Some("%"));
        assert_eq!(summary[4].title, "Avg. run time");
        assert_eq!(summary[4].evaluation, Some(Evaluation::Positive));
        assert_eq!(summary[1].sign, None);
    }

    #[test]
    fn seven_day_counts_cover_the_week_ending_today() {
        let today = day(2025, 1, 3);
        let response = seeded_provider().fetch_counts_on(7, today).expect("counts");

        for (name, series) in response.series() {
            assert_eq!(series.len(), 7, "{name} should have 7 points");
            assert_eq!(series[0].date, day(2024, 12, 28), "{name} start");
            assert_eq!(series[6].date, today, "{name} end");
        }
    }

    #[test]
    fn count_series_respect_their_bounds() {
        let response = seeded_provider().fetch_counts_on(30, day(2025, 5, 1)).expect("counts");

        for series in [
            &response.total.failure,
            &response.total.success,
            &response.failed,
            &response.failure_rate,
        ] {
            assert!(series.iter().all(|c| (0.0..400.0).contains(&c.count)));
        }
        assert!(response
            .run_time
            .iter()
            .all(|c| (0.0..4.0).contains(&c.count)));
        assert!(response
            .time_saved
            .average
            .iter()
            .chain(&response.time_saved.median)
            .all(|c| c.count >= 0.0));
    }

    #[test]
    fn fetch_counts_ends_on_current_utc_date() {
        let before = Utc::now().date_naive();
        let response = InsightsProvider::new()
            .fetch_counts(CountsQuery { time_span: 7 })
            .expect("counts");
        let after = Utc::now().date_naive();

        let last = response.failed.last().expect("non-empty series").date;
        assert!(last == before || last == after);
        assert_eq!(response.failed.len(), 7);
    }

    #[test]
    fn zero_time_span_yields_empty_series() {
        let response = seeded_provider().fetch_counts_on(0, day(2025, 1, 1)).expect("counts");
        assert!(response.series().iter().all(|(_, s)| s.is_empty()));
    }

    #[test]
    fn provider_is_debug_formattable() {
        let rendered = format!("{:?}", seeded_provider());
        assert!(rendered.starts_with("InsightsProvider"));
    }

    #[test]
    fn oversized_time_span_is_rejected() {
        let err = seeded_provider()
            .fetch_counts_on(MAX_TIME_SPAN + 1, day(2025, 1, 1))
            .unwrap_err();
        assert!(matches!(err, InsightsError::TimeSpanTooLong { .. }));
    }

    #[test]
    fn counts_serialize_with_dashboard_keys() {
        let response = seeded_provider().fetch_counts_on(1, day(2025, 2, 14)).expect("counts");
        let json = serde_json::to_value(&response).expect("serialize counts");
        assert!(json["failureRate"].is_array());
        assert!(json["timeSaved"]["median"].is_array());
        assert!(json["runTime"].is_array());
        assert_eq!(json["total"]["success"][0]["date"], "2025-02-14");
    }
}
