use chrono::NaiveDate;
use serde::Serialize;

/// One matched (forecast, market) observation. Immutable once created;
/// owned by the run's log for the lifetime of the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationRecord {
    pub date: NaiveDate,
    pub city: String,
    pub threshold_celsius: f64,
    pub forecast_probability: f64,
    pub market_probability: f64,
    pub edge: f64,
    pub question: String,
}

/// Final go/no-go judgment over a finalized run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerdictReport {
    pub average_edge: f64,
    pub win_rate: f64,
    pub opportunities_per_day: f64,
    pub total_opportunities: usize,
    pub edge_passed: bool,
    pub win_rate_passed: bool,
    pub frequency_passed: bool,
    pub overall_passed: bool,
}
