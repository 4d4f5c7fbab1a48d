//! Report rendering to CSV or JSON
//!
//! Rows are any serializable struct; the CSV header is taken from the field
//! names of the first row. Output goes to a file (created or truncated) or to
//! standard output.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use crate::{Error, Result};

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Comma-separated values with a header row
    #[default]
    Csv,
    /// Pretty-printed JSON array
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Csv => write!(f, "csv"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            other => Err(Error::configuration(format!(
                "unknown report format '{}': expected csv or json",
                other
            ))),
        }
    }
}

/// Write `rows` to `output`, or to standard output when `None`
///
/// An empty CSV report writes nothing and creates no file; an empty JSON report
/// is `[]`. Returns the number of rows written.
pub fn write_report<T: Serialize>(
    rows: &[T],
    format: ReportFormat,
    output: Option<&Path>,
) -> Result<usize> {
    if rows.is_empty() && format == ReportFormat::Csv {
        info!("No rows selected, nothing to write");
        return Ok(0);
    }

    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                Error::io(format!("Failed to create report file {}", path.display()), e)
            })?;
            write_report_to(BufWriter::new(file), rows, format)?;
            info!("Wrote {} rows to {}", rows.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_report_to(stdout.lock(), rows, format)?;
            debug!("Wrote {} rows to standard output", rows.len());
        }
    }

    Ok(rows.len())
}

/// Write `rows` to any writer
pub fn write_report_to<W: Write, T: Serialize>(
    mut writer: W,
    rows: &[T],
    format: ReportFormat,
) -> Result<()> {
    match format {
        ReportFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for row in rows {
                csv_writer
                    .serialize(row)
                    .map_err(|e| Error::output("Failed to write CSV row", e))?;
            }
            csv_writer
                .flush()
                .map_err(|e| Error::io("Failed to flush CSV report", e))?;
        }
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, rows)
                .map_err(|e| Error::output("Failed to write JSON report", e))?;
            writeln!(writer).map_err(|e| Error::io("Failed to write JSON report", e))?;
            writer
                .flush()
                .map_err(|e| Error::io("Failed to flush JSON report", e))?;
        }
    }

    Ok(())
}
