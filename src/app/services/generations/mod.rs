//! Dataset generations of the BAAC open data
//!
//! The accident files were published in two incompatible layouts. Each layout
//! is a [`GenerationReader`] owning its file naming, delimiters, encoding
//! fallback, code tables and legacy corrections:
//! - [`baac_2005`] - Files for 2005 to 2018
//! - [`baac_2019`] - Files for 2019 to 2021
//! - [`corrections`] - Pure value corrections used by the older layout
//! - [`registry`] - Static year to generation lookup

pub mod baac_2005;
pub mod baac_2019;
pub mod corrections;
pub mod registry;

#[cfg(test)]
pub mod tests;

use chrono::NaiveTime;
use encoding_rs::Encoding;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app::models::{Accident, AccidentTimestamp, Place, User, Vehicle};
use crate::app::services::row_decoder::field_parsers::invalid_value;
use crate::app::services::row_decoder::{Row, RowDecoder};
use crate::constants::columns;
use crate::Result;

// Re-export main types for easy access
pub use baac_2005::Baac2005;
pub use baac_2019::Baac2019;
pub use registry::{GenerationRegistry, registry};

/// Reader for the four files of one year in a given layout
///
/// Each operation reads one file completely and releases it before returning.
/// The first malformed field aborts the file.
pub trait GenerationReader: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Paths of the four files for `year` under `data_path`
    fn year_files(&self, year: u16, data_path: &Path) -> YearFiles;

    fn read_characteristics(&self, year: u16, data_path: &Path) -> Result<Vec<Accident>>;

    fn read_places(&self, year: u16, data_path: &Path) -> Result<Vec<Place>>;

    fn read_vehicles(&self, year: u16, data_path: &Path) -> Result<Vec<Vehicle>>;

    fn read_users(&self, year: u16, data_path: &Path) -> Result<Vec<User>>;
}

/// Locations of the four files published for one year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearFiles {
    pub characteristics: PathBuf,
    pub places: PathBuf,
    pub vehicles: PathBuf,
    pub users: PathBuf,
}

impl YearFiles {
    /// All four paths in reading order
    pub fn all(&self) -> [&Path; 4] {
        [
            self.characteristics.as_path(),
            self.places.as_path(),
            self.vehicles.as_path(),
            self.users.as_path(),
        ]
    }

    /// Paths that do not exist on disk
    pub fn missing(&self) -> Vec<&Path> {
        self.all().into_iter().filter(|p| !p.is_file()).collect()
    }
}

/// Directory holding the files of `year`
pub(crate) fn year_directory(year: u16, data_path: &Path) -> PathBuf {
    data_path.join(year.to_string())
}

/// Decode every row of `path` through `convert`
pub(crate) fn read_file<T>(
    path: &Path,
    delimiter: u8,
    encoding: &'static Encoding,
    mut convert: impl FnMut(&Row) -> Result<T>,
) -> Result<Vec<T>> {
    let mut items = Vec::new();

    for row in RowDecoder::open(path, delimiter, encoding)? {
        items.push(convert(&row?)?);
    }

    debug!("Read {} rows from {}", items.len(), path.display());
    Ok(items)
}

/// Validate date and time parts, blaming `hrmn`, `mois` or `jour` on failure
///
/// `jour` is blamed only once the month is known to be valid.
pub(crate) fn build_timestamp(
    row: &Row,
    accident_id: &str,
    (year, month, day): (i32, u32, u32),
    (hour, minute): (u32, u32),
) -> Result<AccidentTimestamp> {
    if NaiveTime::from_hms_opt(hour, minute, 0).is_none() {
        let raw = row.column(columns::TIME)?;
        return Err(invalid_value(row, columns::TIME, raw, Some(accident_id)));
    }

    if !(1..=12).contains(&month) {
        let raw = row.column(columns::MONTH)?;
        return Err(invalid_value(row, columns::MONTH, raw, Some(accident_id)));
    }

    AccidentTimestamp::new(year, month, day, hour, minute).ok_or_else(|| {
        let raw = row.get(columns::DAY).unwrap_or_default();
        invalid_value(row, columns::DAY, raw, Some(accident_id))
    })
}
