//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `ACCIDENT_*` environment variables, then command-line flags. The result is
//! validated once every layer has been applied.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app::services::assembler::YearRange;
use crate::app::services::report_writer::ReportFormat;
use crate::constants::{
    BAAC_2005_FIRST_YEAR, BAAC_2019_LAST_YEAR, CONFIG_DIR_NAME, CONFIG_FILE_NAME,
    DEFAULT_DATA_PATH, ENV_DATA_PATH, ENV_END_YEAR, ENV_START_YEAR,
};
use crate::{Error, Result};

/// Where the accident files live and which years to read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding one sub-directory per year
    pub data_path: PathBuf,

    /// First year to read
    pub start_year: u16,

    /// Last year to read
    pub end_year: u16,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            start_year: BAAC_2005_FIRST_YEAR,
            end_year: BAAC_2019_LAST_YEAR,
        }
    }
}

/// How reports are rendered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format when none is given on the command line
    pub format: ReportFormat,

    /// Show a progress bar while reading years
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Csv,
            show_progress: true,
        }
    }
}

/// Global configuration for accident processing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Default configuration file location, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse a configuration from TOML text; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|e| Error::configuration(format!("invalid configuration: {}", e)))
    }

    /// Read a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::file_not_found(path),
            _ => Error::io(format!("Failed to read {}", path.display()), e),
        })?;

        Self::from_toml_str(&text).map_err(|e| {
            Error::configuration(format!("{} in {}", e, path.display()))
        })
    }

    /// Load the file layer
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// when present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!("Loading configuration from {}", path.display());
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                debug!("Loading configuration from {}", path.display());
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Apply the `ACCIDENT_*` environment variables
    pub fn apply_env_overrides(self) -> Result<Self> {
        self.apply_env_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        if let Some(path) = lookup(ENV_DATA_PATH).filter(|v| !v.trim().is_empty()) {
            self.data.data_path = PathBuf::from(path);
        }
        if let Some(value) = lookup(ENV_START_YEAR) {
            self.data.start_year = parse_year(ENV_START_YEAR, &value)?;
        }
        if let Some(value) = lookup(ENV_END_YEAR) {
            self.data.end_year = parse_year(ENV_END_YEAR, &value)?;
        }
        Ok(self)
    }

    pub fn with_data_path(mut self, data_path: impl Into<PathBuf>) -> Self {
        self.data.data_path = data_path.into();
        self
    }

    pub fn with_start_year(mut self, year: u16) -> Self {
        self.data.start_year = year;
        self
    }

    pub fn with_end_year(mut self, year: u16) -> Self {
        self.data.end_year = year;
        self
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.output.format = format;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.output.show_progress = show_progress;
        self
    }

    /// Years to read, checked against the supported span
    pub fn year_range(&self) -> Result<YearRange> {
        YearRange::new(self.data.start_year, self.data.end_year)
    }

    /// Validate the merged configuration
    pub fn validate(&self) -> Result<()> {
        if self.data.data_path.as_os_str().is_empty() {
            return Err(Error::configuration("data path cannot be empty"));
        }
        self.year_range()?;
        Ok(())
    }
}

fn parse_year(name: &str, value: &str) -> Result<u16> {
    value.trim().parse::<u16>().map_err(|_| {
        Error::configuration(format!("{} must be a year, got '{}'", name, value))
    })
}
