use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

use crate::data::types::MarketQuote;
use crate::data::MarketProvider;

pub struct GammaApiClient {
    client: Client,
    base_url: String,
    target_cities: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GammaMarket {
    condition_id: String,
    question: String,
    #[serde(default)]
    closed: bool,
    #[serde(default)]
    last_trade_price: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GammaMarketsResponse {
    #[serde(default)]
    data: Vec<GammaMarket>,
}

impl GammaApiClient {
    pub fn new(
        base_url: String,
        target_cities: Vec<String>,
        request_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .context("Failed to build Gamma HTTP client")?;

        Ok(Self {
            client,
            base_url,
            target_cities,
        })
    }

    /// Fetch open weather markets mentioning a target city.
    async fn fetch_weather_markets(&self) -> Result<Vec<MarketQuote>> {
        let url = format!("{}/markets", self.base_url);

        let response: GammaMarketsResponse = self.client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch markets")?
            .json()
            .await
            .context("Failed to parse markets response")?;

        Ok(response.data
            .into_iter()
            .filter(|gm| !gm.closed)
            .filter(|gm| is_weather_market(&gm.question, &self.target_cities))
            .map(|gm| self.convert_gamma_market(gm))
            .collect())
    }

    /// Convert Gamma API market format to our internal quote type.
    fn convert_gamma_market(&self, gm: GammaMarket) -> MarketQuote {
        // The listing endpoint carries no firm book price; CLOB order-book
        // integration is out of scope for validation, so an unusable price
        // falls back to the 50-cent midpoint.
        let implied_probability = gm.last_trade_price
            .and_then(|p| p.parse::<f64>().ok())
            .filter(|p| p.is_finite() && (0.0..=1.0).contains(p))
            .unwrap_or(0.5);

        MarketQuote {
            id: gm.condition_id,
            question: gm.question,
            implied_probability,
        }
    }
}

/// Check if a question is a temperature market mentioning a target city.
fn is_weather_market(question: &str, target_cities: &[String]) -> bool {
    let question_lower = question.to_lowercase();

    let has_weather_keyword = question_lower.contains("temperature")
        || question_lower.contains("temp")
        || question_lower.contains("°f")
        || question_lower.contains("°c");

    let has_target_city = target_cities.iter()
        .any(|city| question_lower.contains(&city.to_lowercase()));

    has_weather_keyword && has_target_city
}

#[async_trait]
impl MarketProvider for GammaApiClient {
    /// A failed fetch yields an empty listing, never an error.
    async fn list_markets(&self) -> Vec<MarketQuote> {
        match self.fetch_weather_markets().await {
            Ok(markets) => markets,
            Err(e) => {
                warn!("No market listings available: {}", e);
                Vec::new()
            }
        }
    }
}
