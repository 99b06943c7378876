use statrs::distribution::{ContinuousCDF, Normal};
use crate::validation::error::ValidationError;

/// NOAA doesn't publish point-forecast uncertainty; 24h forecast error is
/// ~2.5°C historically, so that is the fixed model sigma.
pub const DEFAULT_SIGMA_CELSIUS: f64 = 2.5;

/// Probability that the realized temperature exceeds `threshold_celsius`,
/// modeling the outcome as N(point_forecast, sigma²).
///
/// This is THE CORE ALGORITHM - it converts a point forecast into a tradable
/// probability: z = (threshold - forecast) / sigma, P(temp > threshold) = 1 - Φ(z).
pub fn estimate_exceedance(
    point_forecast_celsius: f64,
    threshold_celsius: f64,
    sigma: f64,
) -> Result<f64, ValidationError> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ValidationError::InvalidParameter(format!(
            "sigma must be a positive finite number, got {}",
            sigma
        )));
    }

    let z = (threshold_celsius - point_forecast_celsius) / sigma;

    let normal = Normal::new(0.0, 1.0).expect("unit normal is well-formed");
    let probability = 1.0 - normal.cdf(z);

    // The CDF saturates to exactly 0/1 for |z| beyond ~8; keep the result
    // strictly inside the open interval.
    Ok(probability.clamp(1e-12, 1.0 - 1e-12))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exceedance_known_value() {
        // mean = 20°C, threshold = 15°C, sigma = 2.5°C
        // z = (15 - 20) / 2.5 = -2.0
        // P(temp > 15) = 1 - Φ(-2.0) = Φ(2.0) ≈ 0.9772
        let prob = estimate_exceedance(20.0, 15.0, DEFAULT_SIGMA_CELSIUS).unwrap();
        assert!((prob - 0.9772).abs() < 1e-4);
    }

    #[test]
    fn test_exceedance_at_mean() {
        // Threshold at the forecast mean -> coin flip
        let prob = estimate_exceedance(15.0, 15.0, DEFAULT_SIGMA_CELSIUS).unwrap();
        assert!((prob - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_exceedance_extremes_stay_open() {
        // Far above threshold: near-certain but never exactly 1
        let prob = estimate_exceedance(50.0, 15.0, DEFAULT_SIGMA_CELSIUS).unwrap();
        assert!(prob > 0.999999 && prob < 1.0);

        // Far below threshold: near-impossible but never exactly 0
        let prob = estimate_exceedance(-50.0, 15.0, DEFAULT_SIGMA_CELSIUS).unwrap();
        assert!(prob < 0.000001 && prob > 0.0);
    }

    #[test]
    fn test_exceedance_monotone_in_threshold() {
        let mut last = f64::MAX;
        for threshold in [-10.0, 0.0, 10.0, 14.0, 16.0, 20.0, 30.0] {
            let prob = estimate_exceedance(15.0, threshold, DEFAULT_SIGMA_CELSIUS).unwrap();
            assert!(prob < last, "exceedance must decrease as threshold rises");
            last = prob;
        }
    }

    #[test]
    fn test_invalid_sigma_rejected() {
        assert!(estimate_exceedance(20.0, 15.0, 0.0).is_err());
        assert!(estimate_exceedance(20.0, 15.0, -1.0).is_err());
        assert!(estimate_exceedance(20.0, 15.0, f64::NAN).is_err());
    }
}
