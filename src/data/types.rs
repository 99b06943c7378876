use serde::{Deserialize, Serialize};

/// Probabilistic exceedance forecast for one (city, threshold) pair.
#[derive(Debug, Clone)]
pub struct ForecastEstimate {
    pub probability: f64,
    pub confidence: f64,
    pub mean_temp: f64,
    pub std_dev: f64,
    pub model: String,
}

/// One candidate market listing: the question text and the market-implied
/// probability of the YES outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketQuote {
    pub id: String,
    pub question: String,
    pub implied_probability: f64,
}
