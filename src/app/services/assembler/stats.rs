//! Assembly statistics
//!
//! Counts and timings collected while reading and joining each year.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::app::models::Accident;

/// Output of a multi-year assembly
#[derive(Debug, Clone)]
pub struct AssemblyResult {
    /// Linked accidents of every requested year, in ascending year order
    pub accidents: Vec<Accident>,

    /// Per-year statistics
    pub stats: AssemblyStats,
}

/// Statistics for one joined year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearStats {
    /// Year the files belong to
    pub year: u16,

    /// Name of the generation that read the files
    pub generation: String,

    /// Accident rows read
    pub accidents: usize,

    /// Vehicle rows read
    pub vehicles: usize,

    /// User rows read, associated or not
    pub users: usize,

    /// Users that matched no vehicle of their accident
    pub unassociated_users: usize,

    /// Place rows read
    pub places: usize,

    /// Time spent decoding the four files
    pub read_duration: Duration,

    /// Time spent linking records
    pub join_duration: Duration,
}

impl YearStats {
    /// Create empty statistics for `year`
    pub fn new(year: u16) -> Self {
        Self {
            year,
            generation: String::new(),
            accidents: 0,
            vehicles: 0,
            users: 0,
            unassociated_users: 0,
            places: 0,
            read_duration: Duration::ZERO,
            join_duration: Duration::ZERO,
        }
    }

    /// Users attached to a vehicle
    pub fn associated_users(&self) -> usize {
        self.users - self.unassociated_users
    }
}

/// Statistics for a whole assembly
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssemblyStats {
    /// Statistics of each year in processing order
    pub years: Vec<YearStats>,

    /// Wall time of the whole assembly
    pub total_duration: Duration,
}

impl AssemblyStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_accidents(&self) -> usize {
        self.years.iter().map(|y| y.accidents).sum()
    }

    pub fn total_vehicles(&self) -> usize {
        self.years.iter().map(|y| y.vehicles).sum()
    }

    pub fn total_users(&self) -> usize {
        self.years.iter().map(|y| y.users).sum()
    }

    pub fn total_unassociated_users(&self) -> usize {
        self.years.iter().map(|y| y.unassociated_users).sum()
    }

    pub fn total_places(&self) -> usize {
        self.years.iter().map(|y| y.places).sum()
    }
}
