//! Core data models for reconciled road accident records
//!
//! This module defines the normalized accident graph produced by the dataset
//! assembler: accidents own their place, vehicles and unassociated road users;
//! vehicles own the users that travelled in them. Every enumeration carries the
//! French label of the source vocabulary, used both for display and for
//! serialization.

use chrono::{NaiveDate, NaiveTime};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

// =============================================================================
// Enumerations
// =============================================================================

/// Declares a closed enumeration together with its French label
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident => $label:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$variant_meta])* $variant,)+
        }

        impl $name {
            /// All variants in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// French label of the source vocabulary
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }
    };
}

labelled_enum! {
    /// Reserved lane at the accident place (`vosp`)
    pub enum SpecialLane {
        NotRecorded => "Non renseignée",
        NotApplicable => "Sans objet",
        CycleTrack => "Piste cyclable",
        CycleLane => "Bande cyclable",
        OtherReservedLane => "Voie réservée",
    }
}

labelled_enum! {
    /// Role of a road user in the accident (`catu`)
    pub enum UserRole {
        Driver => "Conducteur",
        Passenger => "Passager",
        Pedestrian => "Piéton",
    }
}

labelled_enum! {
    /// Injury severity of a road user (`grav`)
    pub enum Severity {
        NotRecorded => "Non renseigné",
        Unharmed => "Indemne",
        Killed => "Tué",
        Hospitalized => "Blessé hospitalisé",
        LightlyInjured => "Blessé léger",
    }
}

labelled_enum! {
    /// Sex of a road user (`sexe`)
    pub enum Sex {
        NotRecorded => "Non renseigné",
        Male => "Masculin",
        Female => "Féminin",
    }
}

labelled_enum! {
    /// Canonical vehicle class (`catv`), collapsing the source's many codes
    pub enum VehicleCategory {
        Indeterminable => "Indéterminable",
        Bicycle => "Bicyclette",
        Scooter => "Scooter",
        Motorcycle => "Motocyclette",
        LightVehicle => "Véhicule léger",
        UtilityVehicle => "Véhicule utilitaire",
        HeavyGoodsVehicle => "Poids lourd",
        Bus => "Autobus",
        Coach => "Autocar",
        Train => "Train",
        Tramway => "Tramway",
        Other => "Autre véhicule",
    }
}

impl Severity {
    /// True when the user is known to be hurt or killed
    pub fn is_casualty(&self) -> bool {
        !matches!(self, Severity::NotRecorded | Severity::Unharmed)
    }
}

// =============================================================================
// Timestamp
// =============================================================================

/// Local date and time of an accident, to the minute
///
/// Rendered as `YYYY-MM-DDTHH:MM`, which sorts chronologically as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccidentTimestamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl AccidentTimestamp {
    /// Build a timestamp, rejecting impossible dates and times
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)?;
        NaiveTime::from_hms_opt(hour, minute, 0)?;
        Some(Self {
            year,
            month,
            day,
            hour,
            minute,
        })
    }
}

impl fmt::Display for AccidentTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}

impl FromStr for AccidentTimestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::configuration(format!("invalid accident timestamp '{}'", s));

        let (date, time) = s.trim().split_once('T').ok_or_else(invalid)?;
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| invalid())?;
        let time = NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| invalid())?;

        use chrono::{Datelike, Timelike};
        Ok(Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            hour: time.hour(),
            minute: time.minute(),
        })
    }
}

impl Serialize for AccidentTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =============================================================================
// Records
// =============================================================================

/// Composite identity of a vehicle within one year's files
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VehicleKey {
    pub accident_id: String,
    pub vehicle_id: String,
}

impl VehicleKey {
    pub fn new(accident_id: impl Into<String>, vehicle_id: impl Into<String>) -> Self {
        Self {
            accident_id: accident_id.into(),
            vehicle_id: vehicle_id.into(),
        }
    }
}

/// Road layout at the accident location (one `lieux` row)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub accident_id: String,
    pub special_lane: SpecialLane,
}

/// Person involved in an accident (one `usagers` row)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub accident_id: String,
    /// Vehicle the user travelled in or was struck by; may match no vehicle
    pub vehicle_id: String,
    pub role: UserRole,
    pub severity: Severity,
    pub sex: Sex,
    /// Birth year, `None` when unrecorded
    pub birth_year: Option<i32>,
}

impl User {
    /// Key under which this user's vehicle would be indexed
    pub fn vehicle_key(&self) -> VehicleKey {
        VehicleKey::new(self.accident_id.clone(), self.vehicle_id.clone())
    }
}

/// Vehicle involved in an accident (one `vehicules` row) with its occupants
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    pub accident_id: String,
    pub vehicle_id: String,
    pub category: VehicleCategory,
    pub users: Vec<User>,
}

impl Vehicle {
    pub fn key(&self) -> VehicleKey {
        VehicleKey::new(self.accident_id.clone(), self.vehicle_id.clone())
    }
}

/// One accident (one `caracteristiques` row) with everything linked to it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Accident {
    /// Natural key, unique within the source year only
    pub id: String,
    pub timestamp: AccidentTimestamp,
    /// Département code after legacy corrections (e.g. "75", "2A", "971")
    pub department: String,
    /// INSEE commune number within the département, `None` when unrecorded
    pub commune: Option<u32>,
    pub address: String,
    /// Decimal degrees as text, empty when unrecorded
    pub latitude: String,
    pub longitude: String,
    pub place: Option<Place>,
    pub vehicles: Vec<Vehicle>,
    /// Users whose vehicle key matched no vehicle of this accident
    pub unassociated_users: Vec<User>,
}

impl Accident {
    /// Create an accident with no linked records yet
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        timestamp: AccidentTimestamp,
        department: String,
        commune: Option<u32>,
        address: String,
        latitude: String,
        longitude: String,
    ) -> Self {
        Self {
            id,
            timestamp,
            department,
            commune,
            address,
            latitude,
            longitude,
            place: None,
            vehicles: Vec::new(),
            unassociated_users: Vec::new(),
        }
    }

    /// Year of the accident, used for age computations
    pub fn year(&self) -> i32 {
        self.timestamp.year
    }

    /// Total number of users, associated or not
    pub fn user_count(&self) -> usize {
        self.vehicles.iter().map(|v| v.users.len()).sum::<usize>() + self.unassociated_users.len()
    }
}
