//! Command-line argument definitions for the accident processor
//!
//! This module defines the complete CLI interface using the clap derive API.
//! Dataset flags are shared by every command; selection flags are shared by
//! the `commune` and `injured` reports.

use crate::app::services::report_writer::ReportFormat;
use crate::app::services::selection::SelectionCriteria;
use crate::config::Config;
use crate::constants::DEPARTMENT_PATTERN;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use regex::Regex;
use std::path::PathBuf;

/// CLI arguments for the road accident processor
///
/// Reads the yearly BAAC accident files published on data.gouv.fr, reconciles
/// their successive layouts and extracts per-commune casualty reports.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "accident_processor",
    version,
    about = "Reconcile French road accident (BAAC) data and extract per-commune reports",
    long_about = "Reads the yearly BAAC road accident files (characteristics, places, vehicles \
                  and users), reconciles the 2005 and 2019 file layouts into one linked model \
                  and lists the persons involved in accidents of a given commune."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// List the persons involved in accidents of one commune
    Commune(CommuneArgs),
    /// Same as `commune`, keeping only injured or killed persons
    Injured(InjuredArgs),
    /// List supported years and the files found for each
    Years(YearsArgs),
}

/// Where the data lives, which years to read and how loud to be
#[derive(Debug, Clone, Parser)]
pub struct DatasetArgs {
    /// Directory holding one sub-directory per year
    ///
    /// Overrides the configuration file and ACCIDENT_DATA_PATH.
    #[arg(
        short = 'd',
        long = "data-path",
        value_name = "PATH",
        help = "Directory holding one sub-directory per year"
    )]
    pub data_path: Option<PathBuf>,

    /// First year to read
    #[arg(short = 's', long = "start-year", value_name = "YEAR")]
    pub start_year: Option<u16>,

    /// Last year to read
    #[arg(short = 'e', long = "end-year", value_name = "YEAR")]
    pub end_year: Option<u16>,

    /// Path to configuration file
    ///
    /// Defaults to accident-processor/config.toml in the user's config directory
    /// when that file exists.
    #[arg(long = "config", value_name = "FILE", help = "Path to configuration file")]
    pub config_file: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and hides the progress bar.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress all output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Commune and person filters shared by the report commands
#[derive(Debug, Clone, Parser)]
pub struct SelectionArgs {
    /// Département code, e.g. 75, 971 or 2A
    #[arg(short = 'p', long = "department", value_name = "CODE")]
    pub department: String,

    /// Commune number within the département
    #[arg(short = 'c', long = "commune", value_name = "NUMBER")]
    pub commune: u32,

    /// Include pedestrians
    #[arg(short = 'r', long = "pedestrians")]
    pub pedestrians: bool,

    /// Include cyclists
    #[arg(short = 'y', long = "cyclists")]
    pub cyclists: bool,

    /// Include other road users
    #[arg(short = 't', long = "other")]
    pub other: bool,

    /// Only keep persons under 18 in the year of the accident
    #[arg(short = 'm', long = "minors")]
    pub minors: bool,

    /// Write the report to FILE instead of standard output
    #[arg(short = 'o', long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Report format; defaults to the configured format
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for the commune command
#[derive(Debug, Clone, Parser)]
pub struct CommuneArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Include unharmed persons and persons without a recorded severity
    #[arg(short = 'i', long = "unharmed")]
    pub unharmed: bool,
}

/// Arguments for the injured command
#[derive(Debug, Clone, Parser)]
pub struct InjuredArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Arguments for the years command
#[derive(Debug, Clone, Parser)]
pub struct YearsArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Print the listing as JSON
    #[arg(long = "json")]
    pub json: bool,
}

/// Report formats accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// CSV with French headings
    Csv,
    /// Pretty-printed JSON array
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => ReportFormat::Csv,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Option<&Commands> {
        self.command.as_ref()
    }
}

impl DatasetArgs {
    /// Validate the dataset arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start_year, self.end_year) {
            if start > end {
                return Err(Error::InvalidYearRange { start, end });
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.is_file() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Get the logging level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Apply the command-line layer on top of a loaded configuration
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(path) = &self.data_path {
            config = config.with_data_path(path.clone());
        }
        if let Some(year) = self.start_year {
            config = config.with_start_year(year);
        }
        if let Some(year) = self.end_year {
            config = config.with_end_year(year);
        }
        if self.quiet {
            config = config.with_progress(false);
        }
        config
    }
}

impl SelectionArgs {
    /// Validate the département code shape
    pub fn validate(&self) -> Result<()> {
        let pattern = Regex::new(DEPARTMENT_PATTERN)
            .map_err(|e| Error::configuration(format!("invalid department pattern: {}", e)))?;

        if !pattern.is_match(&self.department) {
            return Err(Error::configuration(format!(
                "invalid department code '{}': expected two or three digits, 2A or 2B",
                self.department
            )));
        }

        Ok(())
    }

    /// Build the selection criteria for these flags
    pub fn to_criteria(&self, include_unharmed: bool) -> SelectionCriteria {
        SelectionCriteria {
            include_pedestrians: self.pedestrians,
            include_cyclists: self.cyclists,
            include_others: self.other,
            include_unharmed,
            minors_only: self.minors,
            ..SelectionCriteria::new(self.department.clone(), self.commune)
        }
    }
}
