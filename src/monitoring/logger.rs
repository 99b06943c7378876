use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use crate::validation::types::ObservationRecord;

/// Append-only CSV mirror of the observation log. After every append the
/// file is a prefix-consistent copy of the in-memory records.
pub struct CsvLogger {
    log_path: String,
}

impl CsvLogger {
    pub fn new(log_path: String) -> Result<Self> {
        // Create CSV file with headers if it doesn't exist
        if !std::path::Path::new(&log_path).exists() {
            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .open(&log_path)?;

            writeln!(
                file,
                "date,city,threshold,forecast_prob,market_price,edge,question"
            )?;
        }

        Ok(Self { log_path })
    }

    /// Append one observation to the CSV mirror.
    pub fn log_observation(&self, record: &ObservationRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.log_path)?;

        writeln!(
            file,
            "{},{},{:.1},{:.3},{:.3},{:.3},{}",
            record.date.format("%Y-%m-%d"),
            record.city,
            record.threshold_celsius,
            record.forecast_probability,
            record.market_probability,
            record.edge,
            quote_field(&record.question),
        )?;

        Ok(())
    }
}

/// Question text may contain commas; always quote it.
fn quote_field(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}
