use chrono::NaiveDate;
use serde::Serialize;

/// Identifies a summary tile on the insights dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SummaryId {
    Total,
    Failed,
    FailureRate,
    TimeSaved,
    RunTime,
}

impl SummaryId {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SummaryId::Total => "total",
            SummaryId::Failed => "failed",
            SummaryId::FailureRate => "failureRate",
            SummaryId::TimeSaved => "timeSaved",
            SummaryId::RunTime => "runTime",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Evaluation {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub id: SummaryId,
    pub title: &'static str,
    pub count: f64,
    /// Unit suffix shown after `count`, e.g. `%` or `h`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign: Option<&'static str>,
    pub deviation: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Evaluation>,
}

/// One point of a count series. `date` serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Count {
    pub date: NaiveDate,
    pub count: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalCounts {
    pub failure: Vec<Count>,
    pub success: Vec<Count>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSavedCounts {
    pub average: Vec<Count>,
    pub median: Vec<Count>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountResponse {
    pub total: TotalCounts,
    pub failed: Vec<Count>,
    pub failure_rate: Vec<Count>,
    pub time_saved: TimeSavedCounts,
    pub run_time: Vec<Count>,
}

impl CountResponse {
    /// All seven series with their dotted names, in response order.
    #[must_use]
    pub fn series(&self) -> [(&'static str, &[Count]); 7] {
        [
            ("total.failure", self.total.failure.as_slice()),
            ("total.success", self.total.success.as_slice()),
            ("failed", self.failed.as_slice()),
            ("failureRate", self.failure_rate.as_slice()),
            ("timeSaved.average", self.time_saved.average.as_slice()),
            ("timeSaved.median", self.time_saved.median.as_slice()),
            ("runTime", self.run_time.as_slice()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_id_serializes_like_as_str() {
        for id in [
            SummaryId::Total,
            SummaryId::Failed,
            SummaryId::FailureRate,
            SummaryId::TimeSaved,
            SummaryId::RunTime,
        ] {
            let json = serde_json::to_value(id).expect("serialize id");
            assert_eq!(json, serde_json::json!(id.as_str()));
        }
    }

    #[test]
    fn summary_omits_missing_sign() {
        let summary = Summary {
            id: SummaryId::Total,
            title: "Total",
            count: 525.0,
            sign: None,
            deviation: 85.0,
            evaluation: Some(Evaluation::Positive),
        };
        let json = serde_json::to_value(&summary).expect("serialize summary");
        assert!(json.get("sign").is_none());
        assert_eq!(json["evaluation"], "positive");
    }

    #[test]
    fn count_date_serializes_as_iso_day() {
        let count = Count {
            date: NaiveDate::from_ymd_opt(2025, 3, 9).expect("valid date"),
            count: 12.0,
        };
        let json = serde_json::to_string(&count).expect("serialize count");
        assert_eq!(json, r#"{"date":"2025-03-09","count":12.0}"#);
    }
}
