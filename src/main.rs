mod config;
mod data;
mod monitoring;
mod validation;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use config::{Config, EnvConfig};
use data::gamma_api::GammaApiClient;
use data::weather::NoaaClient;
use monitoring::logger::CsvLogger;
use monitoring::report;
use validation::collector::ObservationCollector;
use validation::error::ValidationError;
use validation::run::ValidationRun;
use validation::verdict;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Exit contract: verdict passed -> 0; failed verdict, empty window,
    // operator interrupt, or any fault -> 1
    let exit_code = match run().await {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            tracing::error!("Error during validation: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<bool> {
    tracing::info!("🚀 Thesis validator starting...");

    // Load configuration
    let config = Config::load("config.toml")?;
    let env_config = EnvConfig::load()?;

    let request_timeout = Duration::from_secs(config.infrastructure.request_timeout_secs);

    let forecasts = Arc::new(NoaaClient::new(
        request_timeout,
        Duration::from_secs(config.infrastructure.forecast_cache_ttl_secs),
    )?);
    let markets = Arc::new(GammaApiClient::new(
        env_config.polymarket_gamma_url,
        config.validation.target_cities.clone(),
        request_timeout,
    )?);

    let sink = CsvLogger::new(config.system.results_csv_path.clone())?;
    let collector = ObservationCollector::new(
        config.validation.clone(),
        forecasts,
        markets,
    );

    report::log_run_banner(
        config.validation.window_days,
        &config.validation.target_cities,
    );

    tokio::select! {
        result = validate(&config, &collector, &sink) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Validation interrupted by user");
            Ok(false)
        }
    }
}

/// Collect the full observation window, then gate it.
async fn validate(
    config: &Config,
    collector: &ObservationCollector,
    sink: &CsvLogger,
) -> Result<bool> {
    let window_days = config.validation.window_days;
    let mut run = ValidationRun::new(config.validation.target_cities.clone(), window_days)?;

    for day in 0..window_days {
        collector.collect_day(&mut run, sink).await?;

        if day + 1 < window_days {
            let delay = config.validation.inter_day_delay_secs;
            tracing::info!("Waiting {}s until the next observation day...", delay);
            tokio::time::sleep(Duration::from_secs(delay)).await;
        }
    }

    run.finalize()?;

    let win_rate = config.validation.assumed_win_rate;
    tracing::warn!(
        "Win rate {:.0}% is an assumed input, not a realized-outcome measurement; \
         a pass with this value is not a production go decision",
        win_rate * 100.0
    );

    match verdict::evaluate(&run, win_rate) {
        Ok(verdict_report) => {
            report::log_verdict(&verdict_report);
            Ok(verdict_report.overall_passed)
        }
        Err(ValidationError::EmptyRun) => {
            tracing::error!("❌ VALIDATION FAILED: no opportunities found over the window");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}
