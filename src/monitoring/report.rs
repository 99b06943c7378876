use tracing::info;
use crate::validation::types::VerdictReport;
use crate::validation::verdict::{MIN_AVERAGE_EDGE, MIN_OPPORTUNITIES_PER_DAY, MIN_WIN_RATE};

pub fn log_run_banner(window_days: u32, target_cities: &[String]) {
    info!("============================================================");
    info!("WEATHER TRADING THESIS VALIDATION");
    info!("============================================================");
    info!("Validation period: {} days", window_days);
    info!("Target cities: {}", target_cities.join(", "));
}

/// Final criteria table with per-criterion marks.
pub fn log_verdict(report: &VerdictReport) {
    info!("============================================================");
    info!("VALIDATION RESULTS");
    info!("============================================================");
    info!("Average edge: {:.1}%", report.average_edge * 100.0);
    info!("Win rate: {:.1}%", report.win_rate * 100.0);
    info!("Opportunities per day: {:.1}", report.opportunities_per_day);
    info!("Total opportunities: {}", report.total_opportunities);

    info!("--- Success Criteria ---");
    info!(
        "Average edge ≥{:.0}%: {:.1}% {}",
        MIN_AVERAGE_EDGE * 100.0,
        report.average_edge * 100.0,
        mark(report.edge_passed)
    );
    info!(
        "Win rate ≥{:.0}%: {:.1}% {}",
        MIN_WIN_RATE * 100.0,
        report.win_rate * 100.0,
        mark(report.win_rate_passed)
    );
    info!(
        "Opportunities ≥{:.0}/day: {:.1} {}",
        MIN_OPPORTUNITIES_PER_DAY,
        report.opportunities_per_day,
        mark(report.frequency_passed)
    );

    if report.overall_passed {
        info!("✅ VALIDATION PASSED - proceed with the trading system");
    } else {
        info!("❌ VALIDATION FAILED - no exploitable edge, stop here");
    }
}

fn mark(passed: bool) -> &'static str {
    if passed { "✅" } else { "❌" }
}
