use dashmap::DashMap;
use std::time::{Duration, Instant};
use crate::data::types::ForecastEstimate;

/// TTL cache for forecasts so that several markets on the same
/// (city, threshold) within a polling pass reuse one upstream fetch.
pub struct ForecastCache {
    cache: DashMap<String, CachedForecast>,
    ttl: Duration,
}

struct CachedForecast {
    forecast: ForecastEstimate,
    fetched_at: Instant,
}

impl ForecastCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: DashMap::new(),
            ttl,
        }
    }

    fn key(city: &str, threshold_celsius: f64) -> String {
        format!("{}:{:.1}", city, threshold_celsius)
    }

    pub fn insert(&self, city: &str, threshold_celsius: f64, forecast: ForecastEstimate) {
        self.cache.insert(
            Self::key(city, threshold_celsius),
            CachedForecast {
                forecast,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Get forecast if not expired (evict on read).
    pub fn get(&self, city: &str, threshold_celsius: f64) -> Option<ForecastEstimate> {
        let key = Self::key(city, threshold_celsius);

        self.cache.get(&key).and_then(|entry| {
            if entry.fetched_at.elapsed() > self.ttl {
                drop(entry); // Drop the read lock
                self.cache.remove(&key); // Evict stale entry
                None
            } else {
                Some(entry.forecast.clone())
            }
        })
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn forecast() -> ForecastEstimate {
        ForecastEstimate {
            probability: 0.66,
            confidence: 0.95,
            mean_temp: 16.0,
            std_dev: 2.5,
            model: "NOAA-NBM".to_string(),
        }
    }

    #[test]
    fn test_cache_insert_and_get() {
        let cache = ForecastCache::new(Duration::from_secs(60));
        cache.insert("London", 15.0, forecast());

        let hit = cache.get("London", 15.0).unwrap();
        assert_eq!(hit.probability, 0.66);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_keyed_by_threshold() {
        let cache = ForecastCache::new(Duration::from_secs(60));
        cache.insert("London", 15.0, forecast());

        assert!(cache.get("London", 20.0).is_none());
    }

    #[test]
    fn test_cache_ttl_expiration() {
        let cache = ForecastCache::new(Duration::from_millis(50));
        cache.insert("Chicago", 15.0, forecast());

        assert!(cache.get("Chicago", 15.0).is_some());

        thread::sleep(Duration::from_millis(80));

        assert!(cache.get("Chicago", 15.0).is_none());
        assert!(cache.is_empty());
    }
}
