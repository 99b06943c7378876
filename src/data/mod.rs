pub mod cache;
pub mod gamma_api;
pub mod types;
pub mod weather;

use async_trait::async_trait;
use crate::data::types::{ForecastEstimate, MarketQuote};

/// Forecast collaborator contract. `None` means "no forecast available for
/// this city right now" - transport faults are swallowed at the boundary and
/// never reach the validation core.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    async fn get_forecast(&self, city: &str, threshold_celsius: f64) -> Option<ForecastEstimate>;
}

/// Market collaborator contract. A failed fetch yields an empty listing,
/// never an error.
#[async_trait]
pub trait MarketProvider: Send + Sync {
    async fn list_markets(&self) -> Vec<MarketQuote>;
}
