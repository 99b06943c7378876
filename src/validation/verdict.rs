use crate::validation::error::ValidationError;
use crate::validation::run::ValidationRun;
use crate::validation::types::VerdictReport;

// Frozen go/no-go criteria of the validation protocol. If any fails, the
// strategy has no exploitable edge and the project stops here.
pub const MIN_AVERAGE_EDGE: f64 = 0.05;
pub const MIN_WIN_RATE: f64 = 0.65;
pub const MIN_OPPORTUNITIES_PER_DAY: f64 = 3.0;

/// Evaluate a finalized run against the frozen criteria.
///
/// `win_rate` is a realized-outcome metric the gate cannot derive from
/// divergence alone - it must be supplied by the caller. An assumed value is
/// acceptable for a dry run but never for a production go decision.
pub fn evaluate(run: &ValidationRun, win_rate: f64) -> Result<VerdictReport, ValidationError> {
    if !run.is_finalized() {
        return Err(ValidationError::RunIncomplete {
            completed: run.current_day(),
            window: run.window_days(),
        });
    }

    if !win_rate.is_finite() || !(0.0..=1.0).contains(&win_rate) {
        return Err(ValidationError::InvalidParameter(format!(
            "win_rate must lie in [0, 1], got {}",
            win_rate
        )));
    }

    let records = run.records();
    if records.is_empty() {
        return Err(ValidationError::EmptyRun);
    }

    let average_edge = records.iter().map(|r| r.edge).sum::<f64>() / records.len() as f64;

    // Divide by the configured window, not the days that produced data:
    // days with zero opportunities must depress the average.
    let opportunities_per_day = records.len() as f64 / run.window_days() as f64;

    let edge_passed = average_edge >= MIN_AVERAGE_EDGE;
    let win_rate_passed = win_rate >= MIN_WIN_RATE;
    let frequency_passed = opportunities_per_day >= MIN_OPPORTUNITIES_PER_DAY;

    Ok(VerdictReport {
        average_edge,
        win_rate,
        opportunities_per_day,
        total_opportunities: records.len(),
        edge_passed,
        win_rate_passed,
        frequency_passed,
        overall_passed: edge_passed && win_rate_passed && frequency_passed,
    })
}
