//! Supported years listing
//!
//! Shows each supported year, the generation that reads it and whether its
//! four files are present under the data path. Year directories that no
//! generation supports are reported separately.

use crate::app::services::generations::registry;
use crate::cli::args::YearsArgs;
use crate::cli::commands::shared::{
    RunStats, discover_year_directories, load_configuration, setup_logging,
};
use crate::{Error, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::warn;

/// One line of the years listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearEntry {
    pub year: u16,
    pub generation: &'static str,
    /// Names of the expected files that are absent
    pub missing_files: Vec<String>,
}

impl YearEntry {
    pub fn is_complete(&self) -> bool {
        self.missing_files.is_empty()
    }
}

/// Run the years command
pub fn run_years(args: &YearsArgs) -> Result<RunStats> {
    setup_logging(&args.dataset)?;
    let start_time = Instant::now();

    let config = load_configuration(&args.dataset)?;
    let data_path = config.data.data_path.as_path();

    let entries = list_years(data_path)?;
    let unsupported = unsupported_directories(data_path);

    if args.json {
        let json = serde_json::json!({
            "data_path": data_path,
            "years": entries,
            "unsupported_directories": unsupported,
        });
        let text = serde_json::to_string_pretty(&json)
            .map_err(|e| Error::output("Failed to render years listing", e))?;
        println!("{}", text);
    } else {
        print_years(data_path, &entries, &unsupported);
    }

    Ok(RunStats {
        years_read: entries.iter().filter(|e| e.is_complete()).count(),
        processing_time: start_time.elapsed(),
        ..RunStats::default()
    })
}

/// Every supported year with its generation and missing files
pub fn list_years(data_path: &Path) -> Result<Vec<YearEntry>> {
    let registry = registry();

    registry
        .years()
        .map(|year| -> Result<YearEntry> {
            let reader = registry.reader_for(year)?;
            let files = reader.year_files(year, data_path);
            let missing_files = files
                .missing()
                .into_iter()
                .map(|path| {
                    path.file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string())
                })
                .collect();

            Ok(YearEntry {
                year,
                generation: reader.name(),
                missing_files,
            })
        })
        .collect()
}

/// Year directories found on disk that no generation reads
fn unsupported_directories(data_path: &Path) -> Vec<u16> {
    match discover_year_directories(data_path) {
        Ok(found) => found
            .into_iter()
            .map(|(year, _)| year)
            .filter(|year| !registry().supports(*year))
            .collect(),
        Err(e) => {
            warn!("{}", e);
            Vec::new()
        }
    }
}

fn print_years(data_path: &Path, entries: &[YearEntry], unsupported: &[u16]) {
    println!("{}", format!("Data path: {}", data_path.display()).bold());
    println!();

    for entry in entries {
        let status = if entry.is_complete() {
            "ok".green().to_string()
        } else {
            format!("missing {}", entry.missing_files.join(", "))
                .yellow()
                .to_string()
        };
        println!("  {}  {:<10} {}", entry.year, entry.generation, status);
    }

    if !unsupported.is_empty() {
        println!();
        let years: Vec<String> = unsupported.iter().map(u16::to_string).collect();
        println!(
            "{} {}",
            "Unsupported year directories:".red(),
            years.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_list_years_reports_missing_files() {
        let dir = TempDir::new().unwrap();
        let year_dir = dir.path().join("2019");
        fs::create_dir(&year_dir).unwrap();
        for name in ["lieux-2019.csv", "vehicules-2019.csv", "usagers-2019.csv"] {
            fs::write(year_dir.join(name), "").unwrap();
        }

        let entries = list_years(dir.path()).unwrap();
        assert_eq!(entries.len(), 17);
        assert_eq!(entries.first().map(|e| e.year), Some(2005));
        assert_eq!(entries.last().map(|e| e.year), Some(2021));

        let entry_2019 = entries.iter().find(|e| e.year == 2019).unwrap();
        assert_eq!(entry_2019.missing_files, vec!["caracteristiques-2019.csv"]);
        assert!(!entry_2019.is_complete());

        let entry_2010 = entries.iter().find(|e| e.year == 2010).unwrap();
        assert_eq!(entry_2010.missing_files.len(), 4);
    }

    #[test]
    fn test_unsupported_directories() {
        let dir = TempDir::new().unwrap();
        for name in ["2004", "2012", "2022"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }

        assert_eq!(unsupported_directories(dir.path()), vec![2004, 2022]);
    }
}
