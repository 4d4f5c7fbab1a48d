//! Flattened person rows of a commune report
//!
//! Each selected road user becomes one [`PersonRecord`] carrying the accident
//! context it needs. [`ReportRow`] renders a record under the French column
//! headings, with or without the striking vehicle column.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

use crate::app::models::{
    Accident, AccidentTimestamp, Severity, Sex, User, UserRole, Vehicle, VehicleCategory,
};

/// Column headings of the report
pub mod headings {
    pub const DATE: &str = "Date";
    pub const ADDRESS: &str = "Adresse";
    pub const LATITUDE: &str = "Latitude";
    pub const LONGITUDE: &str = "Longitude";
    pub const CATEGORY: &str = "Catégorie de personne";
    pub const SEVERITY: &str = "Gravité";
    pub const BIRTH_YEAR: &str = "Année de naissance";
    pub const SEX: &str = "Sexe";
    pub const STRIKING_VEHICLE: &str = "Véhicule qui a heurté le piéton";
}

/// Reporting category of a road user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonCategory {
    Pedestrian,
    Cyclist,
    Other,
}

impl PersonCategory {
    /// Classify a user given the vehicle it is attached to, if any
    ///
    /// Cyclists are bicycle drivers; passengers of a bicycle and unassociated
    /// non-pedestrians fall into `Other`.
    pub fn classify(user: &User, vehicle: Option<&Vehicle>) -> Self {
        match (user.role, vehicle) {
            (UserRole::Pedestrian, _) => PersonCategory::Pedestrian,
            (UserRole::Driver, Some(v)) if v.category == VehicleCategory::Bicycle => {
                PersonCategory::Cyclist
            }
            _ => PersonCategory::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PersonCategory::Pedestrian => "Piéton",
            PersonCategory::Cyclist => "Cycliste",
            PersonCategory::Other => "Autre",
        }
    }
}

impl fmt::Display for PersonCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for PersonCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One selected road user with its accident context
#[derive(Debug, Clone, PartialEq)]
pub struct PersonRecord {
    pub date: AccidentTimestamp,
    pub address: String,
    pub latitude: String,
    pub longitude: String,
    pub category: PersonCategory,
    pub severity: Severity,
    pub birth_year: Option<i32>,
    pub sex: Sex,
    /// Vehicle that struck a pedestrian; `None` for other categories
    pub striking_vehicle: Option<VehicleCategory>,
}

impl PersonRecord {
    /// Flatten `user` of `accident`, attached to `vehicle` when associated
    pub fn new(accident: &Accident, user: &User, vehicle: Option<&Vehicle>) -> Self {
        let category = PersonCategory::classify(user, vehicle);
        let striking_vehicle = (category == PersonCategory::Pedestrian).then(|| {
            vehicle.map_or(VehicleCategory::Indeterminable, |v| v.category)
        });

        Self {
            date: accident.timestamp,
            address: accident.address.clone(),
            latitude: accident.latitude.clone(),
            longitude: accident.longitude.clone(),
            category,
            severity: user.severity,
            birth_year: user.birth_year,
            sex: user.sex,
            striking_vehicle,
        }
    }
}

/// Serializable view of a record in one of the two report shapes
#[derive(Debug, Clone, Copy)]
pub struct ReportRow<'a> {
    record: &'a PersonRecord,
    with_striking_vehicle: bool,
}

impl<'a> ReportRow<'a> {
    pub fn new(record: &'a PersonRecord, with_striking_vehicle: bool) -> Self {
        Self {
            record,
            with_striking_vehicle,
        }
    }
}

impl Serialize for ReportRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if self.with_striking_vehicle { 9 } else { 8 };
        let record = self.record;

        let mut row = serializer.serialize_struct("Person", fields)?;
        row.serialize_field(headings::DATE, &record.date)?;
        row.serialize_field(headings::ADDRESS, &record.address)?;
        row.serialize_field(headings::LATITUDE, &record.latitude)?;
        row.serialize_field(headings::LONGITUDE, &record.longitude)?;
        row.serialize_field(headings::CATEGORY, &record.category)?;
        row.serialize_field(headings::SEVERITY, &record.severity)?;
        row.serialize_field(headings::BIRTH_YEAR, &record.birth_year)?;
        row.serialize_field(headings::SEX, &record.sex)?;
        if self.with_striking_vehicle {
            row.serialize_field(headings::STRIKING_VEHICLE, &record.striking_vehicle)?;
        }
        row.end()
    }
}
