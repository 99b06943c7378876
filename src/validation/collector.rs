use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::config::ValidationConfig;
use crate::data::{ForecastProvider, MarketProvider};
use crate::monitoring::logger::CsvLogger;
use crate::validation::run::ValidationRun;

/// Drives one observation day at a time: lists candidate markets, associates
/// each with a target city, obtains forecasts, and appends matched
/// observations to the run's log and its CSV mirror.
pub struct ObservationCollector {
    config: ValidationConfig,
    forecasts: Arc<dyn ForecastProvider>,
    markets: Arc<dyn MarketProvider>,
}

impl ObservationCollector {
    pub fn new(
        config: ValidationConfig,
        forecasts: Arc<dyn ForecastProvider>,
        markets: Arc<dyn MarketProvider>,
    ) -> Self {
        Self {
            config,
            forecasts,
            markets,
        }
    }

    /// Collect one observation day. Returns the day's opportunity count.
    pub async fn collect_day(&self, run: &mut ValidationRun, sink: &CsvLogger) -> Result<usize> {
        let day = run.start_day()?;
        info!("--- Day {}/{} ---", day, run.window_days());

        // 1. Fetch candidate weather markets
        let candidates = self.markets.list_markets().await;
        info!("Found {} candidate weather markets", candidates.len());

        let mut day_opportunities = 0;

        for quote in &candidates {
            // 2. Associate with a target city (first match wins; a market
            //    with no target city is out-of-universe, not an error)
            let Some(city) = match_target_city(&quote.question, run.target_cities()) else {
                continue;
            };
            let city = city.to_string();

            // 3. Threshold comes from configuration; question parsing is an
            //    upstream concern this validator does not take on
            let threshold = self.config.default_threshold_celsius;

            // 4. Fetch forecast; absence skips this market for the day
            let Some(forecast) = self.forecasts.get_forecast(&city, threshold).await else {
                continue;
            };

            // 5. Record the observation and mirror it to the CSV sink
            let record = run.record_observation(&city, threshold, &forecast, quote)?;
            sink.log_observation(record)?;

            info!(
                "  {}: forecast={:.1}%, market={:.1}%, edge={:.1}%",
                city,
                record.forecast_probability * 100.0,
                record.market_probability * 100.0,
                record.edge * 100.0
            );

            day_opportunities += 1;
        }

        info!("Opportunities found today: {}", day_opportunities);
        Ok(day_opportunities)
    }
}

/// First target city whose name appears, case-insensitively, in the question.
pub fn match_target_city<'a>(question: &str, target_cities: &'a [String]) -> Option<&'a str> {
    let question_lower = question.to_lowercase();

    target_cities
        .iter()
        .find(|city| question_lower.contains(&city.to_lowercase()))
        .map(|city| city.as_str())
}
