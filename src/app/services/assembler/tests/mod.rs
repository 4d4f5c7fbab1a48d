//! Test utilities for the dataset assembler
//!
//! Builders for in-memory records, so join behaviour can be checked without
//! touching the file system.

use crate::app::models::{
    Accident, AccidentTimestamp, Place, Severity, Sex, SpecialLane, User, UserRole, Vehicle,
    VehicleCategory,
};

mod join_tests;

pub fn accident(id: &str) -> Accident {
    Accident::new(
        id.to_string(),
        AccidentTimestamp::new(2020, 5, 17, 14, 30).unwrap(),
        "75".to_string(),
        Some(112),
        "RUE DE LA ROQUETTE".to_string(),
        "48,8566".to_string(),
        "2,3522".to_string(),
    )
}

pub fn vehicle(accident_id: &str, vehicle_id: &str) -> Vehicle {
    Vehicle {
        accident_id: accident_id.to_string(),
        vehicle_id: vehicle_id.to_string(),
        category: VehicleCategory::LightVehicle,
        users: Vec::new(),
    }
}

pub fn user(accident_id: &str, vehicle_id: &str, role: UserRole) -> User {
    User {
        accident_id: accident_id.to_string(),
        vehicle_id: vehicle_id.to_string(),
        role,
        severity: Severity::LightlyInjured,
        sex: Sex::Female,
        birth_year: Some(1990),
    }
}

pub fn place(accident_id: &str) -> Place {
    Place {
        accident_id: accident_id.to_string(),
        special_lane: SpecialLane::NotApplicable,
    }
}
