//! Selection criteria for per-commune person reports

use super::person::PersonCategory;
use crate::app::models::{Accident, User};
use crate::constants::MINOR_AGE_LIMIT;
use crate::{Error, Result};

/// Which road users of which commune to report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCriteria {
    /// Département code, compared verbatim with the corrected accident code
    pub department: String,

    /// Commune number within the département
    pub commune: u32,

    pub include_pedestrians: bool,
    pub include_cyclists: bool,

    /// Drivers and passengers that are neither pedestrians nor cyclists
    pub include_others: bool,

    /// Keep users recorded as unharmed or without severity
    pub include_unharmed: bool,

    /// Keep only users younger than 18 in the accident's year
    pub minors_only: bool,
}

impl SelectionCriteria {
    /// Criteria for a commune with no category selected yet
    pub fn new(department: impl Into<String>, commune: u32) -> Self {
        Self {
            department: department.into(),
            commune,
            include_pedestrians: false,
            include_cyclists: false,
            include_others: false,
            include_unharmed: false,
            minors_only: false,
        }
    }

    /// Check the criteria before any data is read
    pub fn validate(&self) -> Result<()> {
        if self.department.trim().is_empty() {
            return Err(Error::selection("department code cannot be empty"));
        }

        if !(self.include_pedestrians || self.include_cyclists || self.include_others) {
            return Err(Error::selection("no user categories selected"));
        }

        Ok(())
    }

    /// True when the accident happened in the selected commune
    ///
    /// Accidents without a recorded commune never match.
    pub fn matches_location(&self, accident: &Accident) -> bool {
        accident.department == self.department && accident.commune == Some(self.commune)
    }

    /// True when `category` is one of the selected categories
    pub fn includes(&self, category: PersonCategory) -> bool {
        match category {
            PersonCategory::Pedestrian => self.include_pedestrians,
            PersonCategory::Cyclist => self.include_cyclists,
            PersonCategory::Other => self.include_others,
        }
    }

    /// True when the user passes the severity and age filters
    pub fn accepts(&self, accident: &Accident, user: &User) -> bool {
        if !self.include_unharmed && !user.severity.is_casualty() {
            return false;
        }
        !self.minors_only || was_minor(accident, user)
    }
}

/// True when the user was under 18 in the year of the accident
///
/// Users without a birth year are never minors.
pub fn was_minor(accident: &Accident, user: &User) -> bool {
    user.birth_year
        .is_some_and(|birth_year| accident.year() - birth_year < MINOR_AGE_LIMIT)
}
