//! Selection pipeline for per-commune person reports
//!
//! Filters the assembled accidents down to the road users of one commune and
//! flattens them into date-ordered rows:
//! - [`criteria`] - What to select, with pre-flight validation
//! - [`person`] - Person categories, flattened records and report row shapes

pub mod criteria;
pub mod person;

#[cfg(test)]
pub mod tests;

use tracing::debug;

use crate::app::models::{Accident, User, Vehicle};

// Re-export main types for easy access
pub use criteria::SelectionCriteria;
pub use person::{PersonCategory, PersonRecord, ReportRow};

/// Selected persons together with the report shape to render them in
#[derive(Debug, Clone, PartialEq)]
pub struct PersonReport {
    pub records: Vec<PersonRecord>,

    /// Render the striking vehicle column (set when pedestrians are selected)
    pub with_striking_vehicle: bool,
}

impl PersonReport {
    /// Select the persons of `accidents` matching `criteria`
    pub fn build(accidents: &[Accident], criteria: &SelectionCriteria) -> Self {
        Self {
            records: select_persons(accidents, criteria),
            with_striking_vehicle: criteria.include_pedestrians,
        }
    }

    /// Rows ready for serialization
    pub fn rows(&self) -> Vec<ReportRow<'_>> {
        self.records
            .iter()
            .map(|record| ReportRow::new(record, self.with_striking_vehicle))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Flatten the users of matching accidents, ordered by accident date
///
/// Users attached to vehicles come before the unassociated users of the same
/// accident; the date sort is stable so that order survives.
pub fn select_persons(accidents: &[Accident], criteria: &SelectionCriteria) -> Vec<PersonRecord> {
    let mut records = Vec::new();

    for accident in accidents.iter().filter(|a| criteria.matches_location(a)) {
        for vehicle in &accident.vehicles {
            for user in &vehicle.users {
                if accepts(criteria, accident, user, Some(vehicle)) {
                    records.push(PersonRecord::new(accident, user, Some(vehicle)));
                }
            }
        }

        for user in &accident.unassociated_users {
            if accepts(criteria, accident, user, None) {
                records.push(PersonRecord::new(accident, user, None));
            }
        }
    }

    records.sort_by_key(|record| record.date);

    debug!(
        "Selected {} persons in commune {} of département {}",
        records.len(),
        criteria.commune,
        criteria.department
    );

    records
}

fn accepts(
    criteria: &SelectionCriteria,
    accident: &Accident,
    user: &User,
    vehicle: Option<&Vehicle>,
) -> bool {
    criteria.includes(PersonCategory::classify(user, vehicle)) && criteria.accepts(accident, user)
}
