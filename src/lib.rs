//! Accident Processor Library
//!
//! A Rust library for reconciling the French road accident open data (BAAC files
//! published on data.gouv.fr) across its successive dataset generations into one
//! referentially consistent in-memory model.
//!
//! This library provides tools for:
//! - Decoding the per-year delimited files with case-insensitive headers and
//!   per-generation delimiter/encoding quirks
//! - Parsing each dataset generation into typed accident, place, vehicle and
//!   road user records, applying the legacy value corrections
//! - Joining the four files of each year into linked accident aggregates with
//!   strict referential checks
//! - Selecting and flattening road users for per-commune casualty reports
//! - Writing reports as CSV or JSON

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod assembler;
        pub mod generations;
        pub mod report_writer;
        pub mod row_decoder;
        pub mod selection;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Accident, Place, User, Vehicle};
pub use config::Config;

use std::path::PathBuf;

/// Result type alias for the accident processor
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for accident dataset processing
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found
    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// CSV structure error (unbalanced quotes, wrong field count, ...)
    #[error("CSV parsing error in file '{}': {message}", .file.display())]
    CsvParsing {
        file: PathBuf,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// A required column is absent from a file header
    #[error("column '{column}' missing in {}", .file.display())]
    MissingColumn { column: String, file: PathBuf },

    /// A field could not be converted into its expected shape
    #[error(
        "can't parse column '{column}' with value '{value}'{} in {}",
        accident_suffix(.accident_id),
        .file.display()
    )]
    InvalidValue {
        column: String,
        value: String,
        accident_id: Option<String>,
        file: PathBuf,
    },

    /// Year outside the span covered by a registered dataset generation
    #[error("unsupported year {year}")]
    UnsupportedYear { year: u16 },

    /// Start year after end year
    #[error("start year {start} cannot be later than end year {end}")]
    InvalidYearRange { start: u16, end: u16 },

    /// Same accident key seen twice in one year
    #[error("in year {year}, accident {accident_id} encountered twice")]
    DuplicateAccident { year: u16, accident_id: String },

    /// Same (accident, vehicle) key seen twice in one year
    #[error("in year {year}, in accident {accident_id}, vehicle {vehicle_id} encountered twice")]
    DuplicateVehicle {
        year: u16,
        accident_id: String,
        vehicle_id: String,
    },

    /// Second place row for an accident
    #[error("in year {year}, accident {accident_id} has more than one place")]
    DuplicatePlace { year: u16, accident_id: String },

    /// A user's vehicle belongs to a different accident
    #[error(
        "in year {year}, a user in accident {user_accident_id} has vehicle {vehicle_id} from accident {vehicle_accident_id}"
    )]
    VehicleAccidentMismatch {
        year: u16,
        user_accident_id: String,
        vehicle_id: String,
        vehicle_accident_id: String,
    },

    /// A user references an accident that does not exist
    #[error("in year {year}, a user has nonexistent accident {accident_id}")]
    OrphanUser { year: u16, accident_id: String },

    /// A vehicle references an accident that does not exist
    #[error("in year {year}, vehicle {vehicle_id} has nonexistent accident {accident_id}")]
    OrphanVehicle {
        year: u16,
        accident_id: String,
        vehicle_id: String,
    },

    /// A place references an accident that does not exist
    #[error("in year {year}, a place has nonexistent accident {accident_id}")]
    OrphanPlace { year: u16, accident_id: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Invalid selection criteria
    #[error("{message}")]
    Selection { message: String },

    /// Report writing error
    #[error("Output error: {message}")]
    Output {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<PathBuf>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a missing column error
    pub fn missing_column(column: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self::MissingColumn {
            column: column.into(),
            file: file.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(
        column: impl Into<String>,
        value: impl Into<String>,
        accident_id: Option<&str>,
        file: impl Into<PathBuf>,
    ) -> Self {
        Self::InvalidValue {
            column: column.into(),
            value: value.into(),
            accident_id: accident_id.map(str::to_string),
            file: file.into(),
        }
    }

    /// Create an unsupported year error
    pub fn unsupported_year(year: u16) -> Self {
        Self::UnsupportedYear { year }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a selection error
    pub fn selection(message: impl Into<String>) -> Self {
        Self::Selection {
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Output {
            message: message.into(),
            source: source.into(),
        }
    }

    /// True for the referential failures raised by the join phase
    pub fn is_referential(&self) -> bool {
        matches!(
            self,
            Self::DuplicateAccident { .. }
                | Self::DuplicateVehicle { .. }
                | Self::DuplicatePlace { .. }
                | Self::VehicleAccidentMismatch { .. }
                | Self::OrphanUser { .. }
                | Self::OrphanVehicle { .. }
                | Self::OrphanPlace { .. }
        )
    }
}

fn accident_suffix(accident_id: &Option<String>) -> String {
    accident_id
        .as_ref()
        .map(|id| format!(" for accident {}", id))
        .unwrap_or_default()
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: PathBuf::from("unknown"),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}
