use crate::validation::error::ValidationError;

/// Absolute divergence between a forecast-derived probability and the
/// market-implied probability for the same event.
pub fn edge(p_forecast: f64, p_market: f64) -> Result<f64, ValidationError> {
    check_probability("p_forecast", p_forecast)?;
    check_probability("p_market", p_market)?;

    Ok((p_forecast - p_market).abs())
}

fn check_probability(name: &str, p: f64) -> Result<(), ValidationError> {
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        return Err(ValidationError::InvalidParameter(format!(
            "{} must lie in [0, 1], got {}",
            name, p
        )));
    }
    Ok(())
}
