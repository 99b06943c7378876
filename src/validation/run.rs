use chrono::Utc;
use crate::data::types::{ForecastEstimate, MarketQuote};
use crate::validation::edge::edge;
use crate::validation::error::ValidationError;
use crate::validation::types::ObservationRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Collecting,
    Finalized,
}

/// Owned state of one validation run: the day counter and the append-only
/// observation log. Exactly one writer for the lifetime of the run.
#[derive(Debug)]
pub struct ValidationRun {
    target_cities: Vec<String>,
    window_days: u32,
    current_day: u32,
    records: Vec<ObservationRecord>,
    state: RunState,
}

impl ValidationRun {
    pub fn new(target_cities: Vec<String>, window_days: u32) -> Result<Self, ValidationError> {
        if window_days == 0 {
            return Err(ValidationError::InvalidParameter(
                "window_days must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            target_cities,
            window_days,
            current_day: 0,
            records: Vec::new(),
            state: RunState::Collecting,
        })
    }

    /// Begin the next observation day. Returns the 1-based day just started.
    pub fn start_day(&mut self) -> Result<u32, ValidationError> {
        if self.state == RunState::Finalized || self.current_day == self.window_days {
            return Err(ValidationError::WindowExhausted(self.window_days));
        }

        self.current_day += 1;
        Ok(self.current_day)
    }

    /// Append one observation for the current day, computing its edge.
    ///
    /// No duplicate suppression: identical (city, threshold) pairs may
    /// legitimately recur if the caller supplies them twice - upstream
    /// collaborators own de-duplication.
    pub fn record_observation(
        &mut self,
        city: &str,
        threshold_celsius: f64,
        forecast: &ForecastEstimate,
        quote: &MarketQuote,
    ) -> Result<&ObservationRecord, ValidationError> {
        if self.state == RunState::Finalized {
            return Err(ValidationError::WindowExhausted(self.window_days));
        }

        let edge = edge(forecast.probability, quote.implied_probability)?;

        self.records.push(ObservationRecord {
            date: Utc::now().date_naive(),
            city: city.to_string(),
            threshold_celsius,
            forecast_probability: forecast.probability,
            market_probability: quote.implied_probability,
            edge,
            question: quote.question.clone(),
        });

        Ok(self.records.last().expect("record just appended"))
    }

    /// Transition Collecting -> Finalized. Only valid once the full window
    /// has been collected; idempotent afterwards.
    pub fn finalize(&mut self) -> Result<(), ValidationError> {
        if self.state == RunState::Finalized {
            return Ok(());
        }

        if self.current_day != self.window_days {
            return Err(ValidationError::RunIncomplete {
                completed: self.current_day,
                window: self.window_days,
            });
        }

        self.state = RunState::Finalized;
        Ok(())
    }

    pub fn is_finalized(&self) -> bool {
        self.state == RunState::Finalized
    }

    pub fn records(&self) -> &[ObservationRecord] {
        &self.records
    }

    pub fn target_cities(&self) -> &[String] {
        &self.target_cities
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    pub fn current_day(&self) -> u32 {
        self.current_day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with_window(days: u32) -> ValidationRun {
        ValidationRun::new(vec!["London".to_string(), "Chicago".to_string()], days).unwrap()
    }

    fn forecast_with_probability(probability: f64) -> ForecastEstimate {
        ForecastEstimate {
            probability,
            confidence: 0.95,
            mean_temp: 16.0,
            std_dev: 2.5,
            model: "NOAA-NBM".to_string(),
        }
    }

    fn quote_with_price(implied_probability: f64) -> MarketQuote {
        MarketQuote {
            id: "cond-1".to_string(),
            question: "Will London temperature exceed 15°C today?".to_string(),
            implied_probability,
        }
    }

    #[test]
    fn test_zero_day_window_rejected() {
        assert!(ValidationRun::new(vec!["London".to_string()], 0).is_err());
    }

    #[test]
    fn test_start_day_counts_up_to_window() {
        let mut run = run_with_window(3);
        assert_eq!(run.start_day().unwrap(), 1);
        assert_eq!(run.start_day().unwrap(), 2);
        assert_eq!(run.start_day().unwrap(), 3);

        match run.start_day() {
            Err(ValidationError::WindowExhausted(3)) => {}
            other => panic!("expected WindowExhausted, got {:?}", other),
        }
    }

    #[test]
    fn test_record_appends_exactly_one() {
        let mut run = run_with_window(2);
        run.start_day().unwrap();

        let forecast = forecast_with_probability(0.60);
        let quote = quote_with_price(0.50);

        run.record_observation("London", 15.0, &forecast, &quote).unwrap();
        assert_eq!(run.records().len(), 1);

        let first = run.records()[0].clone();
        run.record_observation("Chicago", 15.0, &forecast, &quote).unwrap();
        assert_eq!(run.records().len(), 2);

        // Prior entries are never mutated
        assert_eq!(run.records()[0], first);
    }

    #[test]
    fn test_record_computes_edge_invariant() {
        let mut run = run_with_window(1);
        run.start_day().unwrap();

        let record = run
            .record_observation(
                "London",
                15.0,
                &forecast_with_probability(0.9772),
                &quote_with_price(0.50),
            )
            .unwrap();

        assert!((record.edge - 0.4772).abs() < 1e-9);
        assert_eq!(
            record.edge,
            (record.forecast_probability - record.market_probability).abs()
        );
    }

    #[test]
    fn test_duplicates_are_not_suppressed() {
        let mut run = run_with_window(1);
        run.start_day().unwrap();

        let forecast = forecast_with_probability(0.60);
        let quote = quote_with_price(0.50);
        run.record_observation("London", 15.0, &forecast, &quote).unwrap();
        run.record_observation("London", 15.0, &forecast, &quote).unwrap();

        assert_eq!(run.records().len(), 2);
    }

    #[test]
    fn test_finalize_requires_full_window() {
        let mut run = run_with_window(2);
        run.start_day().unwrap();

        match run.finalize() {
            Err(ValidationError::RunIncomplete { completed: 1, window: 2 }) => {}
            other => panic!("expected RunIncomplete, got {:?}", other),
        }

        run.start_day().unwrap();
        run.finalize().unwrap();
        assert!(run.is_finalized());

        // Idempotent once finalized
        run.finalize().unwrap();
        assert!(run.is_finalized());
    }

    #[test]
    fn test_no_appends_after_finalize() {
        let mut run = run_with_window(1);
        run.start_day().unwrap();
        run.finalize().unwrap();

        let result = run.record_observation(
            "London",
            15.0,
            &forecast_with_probability(0.60),
            &quote_with_price(0.50),
        );
        assert!(matches!(result, Err(ValidationError::WindowExhausted(1))));
    }
}
