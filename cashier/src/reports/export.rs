//! CSV and JSON export of reports

use std::fs::File;
use std::io::Write;
use std::path::Path;

use thiserror::Error;

use super::Report;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to create export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write the report rows as CSV, header line first
pub fn write_csv<W: Write>(report: &Report, writer: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(writer);
    if report.rows.is_empty() {
        // serialize() only emits headers together with the first row
        writer.write_record([
            "ID", "Tanggal", "Pembeli", "Metode", "Tipe", "Status", "Total", "Produk",
        ])?;
    }
    for row in &report.rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the full report, rows and summary, as pretty JSON
pub fn write_json<W: Write>(report: &Report, mut writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    Ok(())
}

/// Export the report to a CSV file at `path`
pub fn export_csv(report: &Report, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_csv(report, file)?;
    tracing::info!(
        path = %path.display(),
        rows = report.rows.len(),
        "Report exported"
    );
    Ok(())
}
