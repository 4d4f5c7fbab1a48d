//! Shared components for CLI commands
//!
//! This module contains the run statistics, logging setup, configuration
//! loading and year directory discovery used by every command.

use crate::cli::args::DatasetArgs;
use crate::config::Config;
use crate::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Statistics reported at the end of a command
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    /// Number of years read
    pub years_read: usize,
    /// Number of accidents assembled
    pub accidents_read: usize,
    /// Number of persons kept by the selection
    pub persons_selected: usize,
    /// Number of report rows written
    pub rows_written: usize,
    /// Total processing time
    pub processing_time: Duration,
}

/// Set up structured logging from the verbosity flags
///
/// `RUST_LOG` takes precedence over the flags.
pub fn setup_logging(args: &DatasetArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("accident_processor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (file -> env -> args)
pub fn load_configuration(args: &DatasetArgs) -> Result<Config> {
    args.validate()?;

    match &args.config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => debug!("No config file given, trying the default location"),
    }

    let config = Config::load(args.config_file.as_deref())?.apply_env_overrides()?;
    let config = args.apply_to(config);
    config.validate()?;

    debug!(
        "Data path {}, years {}-{}",
        config.data.data_path.display(),
        config.data.start_year,
        config.data.end_year
    );
    Ok(config)
}

/// Year directories directly under `data_path`, in ascending order
///
/// Entries whose name is not a year are ignored.
pub fn discover_year_directories(data_path: &Path) -> Result<Vec<(u16, PathBuf)>> {
    if !data_path.is_dir() {
        return Err(Error::configuration(format!(
            "Data path is not a directory: {}",
            data_path.display()
        )));
    }

    let mut years = Vec::new();
    for entry in WalkDir::new(data_path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_dir() {
            continue;
        }
        let year = entry
            .file_name()
            .to_str()
            .filter(|name| name.len() == 4)
            .and_then(|name| name.parse::<u16>().ok());
        if let Some(year) = year {
            years.push((year, entry.into_path()));
        }
    }

    years.sort();
    debug!(
        "Discovered {} year directories in {}",
        years.len(),
        data_path.display()
    );
    Ok(years)
}
