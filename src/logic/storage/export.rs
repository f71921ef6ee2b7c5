//! Prediction Log Exporter
//!
//! Tabular export of the prediction log for spreadsheet analysis.

use std::io::Write;
use std::path::Path;

use super::metrics_log::read_records;
use crate::logic::metrics::{PredictionRecord, COLUMNS};

/// Export the JSONL log at `source` to CSV at `destination`
pub fn export_log_csv(source: &Path, destination: &Path) -> std::io::Result<usize> {
    let records = read_records(source)?;
    export_csv(&records, destination)?;
    Ok(records.len())
}

/// Write records as CSV with the log's column header
pub fn export_csv(records: &[PredictionRecord], destination: &Path) -> std::io::Result<()> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(destination)?);

    writeln!(file, "{}", COLUMNS.join(","))?;

    for record in records {
        let actual = record.actual_severity.map(|s| s.as_str()).unwrap_or("");
        // Escape CSV fields
        let threat = record.threat_type.as_str().replace('"', "\"\"");

        writeln!(
            file,
            "{},\"{}\",{},{},{},{},{},{},{}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            threat,
            record.temperature,
            record.precipitation,
            record.predicted_severity,
            actual,
            record.reward,
            record.is_correct,
            record.current_accuracy,
        )?;
    }

    file.flush()
}
