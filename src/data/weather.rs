use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;

use crate::data::cache::ForecastCache;
use crate::data::types::ForecastEstimate;
use crate::data::ForecastProvider;
use crate::validation::model::{estimate_exceedance, DEFAULT_SIGMA_CELSIUS};

pub struct NoaaClient {
    client: Client,
    cache: ForecastCache,
}

#[derive(Debug, Deserialize)]
struct NoaaResponse {
    properties: NoaaProperties,
}

#[derive(Debug, Deserialize)]
struct NoaaProperties {
    periods: Vec<NoaaPeriod>,
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct NoaaPeriod {
    temperature: f64,
    temperatureUnit: String,
}

impl NoaaClient {
    pub fn new(request_timeout: Duration, cache_ttl: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .context("Failed to build NOAA HTTP client")?;

        Ok(Self {
            client,
            cache: ForecastCache::new(cache_ttl),
        })
    }

    /// Fetch a probabilistic exceedance forecast from NOAA for one city.
    ///
    /// NOAA gives a point forecast; the exceedance probability comes from the
    /// fixed-sigma normal model over that point.
    async fn fetch_probabilistic_forecast(
        &self,
        city: &str,
        threshold_celsius: f64,
    ) -> Result<ForecastEstimate> {
        let coords = self.city_to_coords(city)?;

        // Get NOAA grid point
        let grid_url = format!(
            "https://api.weather.gov/points/{},{}",
            coords.lat, coords.lon
        );

        let grid_response: serde_json::Value = self.client
            .get(&grid_url)
            .header("User-Agent", "ThesisValidator/1.0")
            .send()
            .await?
            .json()
            .await?;

        let forecast_hourly_url = grid_response["properties"]["forecastHourly"]
            .as_str()
            .context("Missing forecast URL")?;

        // Fetch hourly forecast
        let forecast_response: NoaaResponse = self.client
            .get(forecast_hourly_url)
            .header("User-Agent", "ThesisValidator/1.0")
            .send()
            .await?
            .json()
            .await?;

        // Get first period (next few hours)
        let period = forecast_response
            .properties
            .periods
            .first()
            .context("No forecast periods")?;

        // Convert Fahrenheit to Celsius if needed
        let mean_temp = if period.temperatureUnit == "F" {
            fahrenheit_to_celsius(period.temperature)
        } else {
            period.temperature
        };

        let probability =
            estimate_exceedance(mean_temp, threshold_celsius, DEFAULT_SIGMA_CELSIUS)?;

        Ok(ForecastEstimate {
            probability,
            confidence: 0.95, // NOAA 95%+ accuracy 1-2 days out
            mean_temp,
            std_dev: DEFAULT_SIGMA_CELSIUS,
            model: "NOAA-NBM".to_string(),
        })
    }

    /// Map city names to coordinates
    fn city_to_coords(&self, city: &str) -> Result<Coordinates> {
        let coords_map: HashMap<&str, Coordinates> = [
            ("London", Coordinates { lat: 51.5074, lon: -0.1278 }),
            ("New York", Coordinates { lat: 40.7128, lon: -74.0060 }),
            ("NYC", Coordinates { lat: 40.7128, lon: -74.0060 }),
            ("Chicago", Coordinates { lat: 41.8781, lon: -87.6298 }),
            ("Seoul", Coordinates { lat: 37.5665, lon: 126.9780 }),
        ].into_iter().collect();

        coords_map
            .get(city)
            .copied()
            .context(format!("Unknown city: {}", city))
    }
}

#[async_trait]
impl ForecastProvider for NoaaClient {
    /// Absence, not error: any transport or parse fault collapses to `None`
    /// so the validation core never sees it.
    async fn get_forecast(&self, city: &str, threshold_celsius: f64) -> Option<ForecastEstimate> {
        if let Some(cached) = self.cache.get(city, threshold_celsius) {
            return Some(cached);
        }

        match self.fetch_probabilistic_forecast(city, threshold_celsius).await {
            Ok(forecast) => {
                self.cache.insert(city, threshold_celsius, forecast.clone());
                Some(forecast)
            }
            Err(e) => {
                warn!("No forecast for {}: {}", city, e);
                None
            }
        }
    }
}

fn fahrenheit_to_celsius(temp_f: f64) -> f64 {
    (temp_f - 32.0) * 5.0 / 9.0
}

#[derive(Debug, Clone, Copy)]
struct Coordinates {
    lat: f64,
    lon: f64,
}
