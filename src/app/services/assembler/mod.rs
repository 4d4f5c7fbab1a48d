//! Dataset assembler for multi-year accident data
//!
//! The assembler resolves every requested year against the generation
//! registry, then reads and joins the years one after another in ascending
//! order:
//! - [`join`] - Referential join of one year's four record kinds
//! - [`stats`] - Counts and timings per year
//!
//! Unsupported years are rejected before any file is opened, and the first
//! structural or referential error aborts the whole assembly.

pub mod join;
pub mod stats;

#[cfg(test)]
pub mod tests;

use indicatif::{ProgressBar, ProgressStyle};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

use crate::app::models::Accident;
use crate::app::services::generations::{GenerationReader, registry};
use crate::{Error, Result};

// Re-export main types for easy access
pub use join::{YearRecords, join_year};
pub use stats::{AssemblyResult, AssemblyStats, YearStats};

/// Inclusive span of years to assemble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    start: u16,
    end: u16,
}

impl YearRange {
    /// Create a range, checking order and that every year is supported
    pub fn new(start: u16, end: u16) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidYearRange { start, end });
        }

        let registry = registry();
        for year in start..=end {
            if !registry.supports(year) {
                return Err(Error::unsupported_year(year));
            }
        }

        Ok(Self { start, end })
    }

    /// Range covering a single year
    pub fn single(year: u16) -> Result<Self> {
        Self::new(year, year)
    }

    /// Range covering every supported year
    pub fn all_supported() -> Self {
        let registry = registry();
        Self {
            start: registry.first_year(),
            end: registry.last_year(),
        }
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    /// Years of the range in ascending order
    pub fn years(&self) -> RangeInclusive<u16> {
        self.start..=self.end
    }

    pub fn len(&self) -> usize {
        usize::from(self.end - self.start) + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Reads and joins the accident files of a range of years
#[derive(Debug, Clone)]
pub struct DatasetAssembler {
    data_path: PathBuf,
    show_progress: bool,
}

impl DatasetAssembler {
    /// Create an assembler reading `<data_path>/<year>/` directories
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            show_progress: false,
        }
    }

    /// Show a progress bar over years
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Assemble every year of `range`
    ///
    /// # Errors
    ///
    /// * Returns `Error::UnsupportedYear` before reading anything when a year
    ///   has no generation
    /// * Returns the first I/O, structure, value or referential error met
    pub fn assemble(&self, range: &YearRange) -> Result<AssemblyResult> {
        let start_time = Instant::now();

        let readers = range
            .years()
            .map(|year| registry().reader_for(year).map(|reader| (year, reader)))
            .collect::<Result<Vec<(u16, &'static dyn GenerationReader)>>>()?;

        info!(
            "Assembling accidents for {} from {}",
            range,
            self.data_path.display()
        );

        let progress_bar = if self.show_progress {
            let pb = ProgressBar::new(readers.len() as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            pb.set_message("Reading accident files...");
            Some(pb)
        } else {
            None
        };

        let mut accidents = Vec::new();
        let mut stats = AssemblyStats::new();

        for (year, reader) in readers {
            if let Some(pb) = &progress_bar {
                pb.set_message(format!("Reading {} ({})", year, reader.name()));
            }

            let (year_accidents, year_stats) = self.assemble_year(year, reader)?;
            accidents.extend(year_accidents);
            stats.years.push(year_stats);

            if let Some(pb) = &progress_bar {
                pb.inc(1);
            }
        }

        if let Some(pb) = &progress_bar {
            pb.finish_with_message("Accident files loaded");
        }

        stats.total_duration = start_time.elapsed();

        info!(
            "Assembled {} accidents, {} vehicles, {} users and {} places over {} years in {:.2}s",
            stats.total_accidents(),
            stats.total_vehicles(),
            stats.total_users(),
            stats.total_places(),
            stats.years.len(),
            stats.total_duration.as_secs_f64()
        );

        Ok(AssemblyResult { accidents, stats })
    }

    /// Read the four files of `year` one after another and join them
    pub fn assemble_year(
        &self,
        year: u16,
        reader: &dyn GenerationReader,
    ) -> Result<(Vec<Accident>, YearStats)> {
        debug!("Reading {} with generation {}", year, reader.name());

        let read_start = Instant::now();
        let records = YearRecords {
            accidents: reader.read_characteristics(year, &self.data_path)?,
            places: reader.read_places(year, &self.data_path)?,
            vehicles: reader.read_vehicles(year, &self.data_path)?,
            users: reader.read_users(year, &self.data_path)?,
        };
        let read_duration = read_start.elapsed();

        let join_start = Instant::now();
        let (accidents, mut stats) = join_year(year, records)?;
        stats.read_duration = read_duration;
        stats.join_duration = join_start.elapsed();
        stats.generation = reader.name().to_string();

        info!(
            "Year {}: {} accidents, {} vehicles, {} users ({} unassociated), {} places in {:.2}s",
            year,
            stats.accidents,
            stats.vehicles,
            stats.users,
            stats.unassociated_users,
            stats.places,
            (stats.read_duration + stats.join_duration).as_secs_f64()
        );

        Ok((accidents, stats))
    }
}
