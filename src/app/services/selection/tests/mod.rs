//! Test utilities for the selection pipeline

use crate::app::models::{
    Accident, AccidentTimestamp, Severity, Sex, User, UserRole, Vehicle, VehicleCategory,
};


pub fn accident_at(id: &str, department: &str, commune: Option<u32>, date: (i32, u32, u32)) -> Accident {
    let (year, month, day) = date;
    Accident::new(
        id.to_string(),
        AccidentTimestamp::new(year, month, day, 8, 15).unwrap(),
        department.to_string(),
        commune,
        format!("ADRESSE {id}"),
        "48,85".to_string(),
        "2,35".to_string(),
    )
}

pub fn person(
    accident_id: &str,
    role: UserRole,
    severity: Severity,
    birth_year: Option<i32>,
) -> User {
    User {
        accident_id: accident_id.to_string(),
        vehicle_id: "A01".to_string(),
        role,
        severity,
        sex: Sex::Male,
        birth_year,
    }
}

pub fn vehicle_with(accident_id: &str, category: VehicleCategory, users: Vec<User>) -> Vehicle {
    Vehicle {
        accident_id: accident_id.to_string(),
        vehicle_id: "A01".to_string(),
        category,
        users,
    }
}

/// Two accidents in Paris 11e (75/111), one elsewhere and one without commune
pub fn sample_accidents() -> Vec<Accident> {
    let mut late = accident_at("1", "75", Some(111), (2019, 6, 2));
    late.vehicles.push(vehicle_with(
        "1",
        VehicleCategory::LightVehicle,
        vec![
            person("1", UserRole::Driver, Severity::Unharmed, Some(1970)),
            person("1", UserRole::Pedestrian, Severity::Hospitalized, Some(2010)),
        ],
    ));
    late.unassociated_users
        .push(person("1", UserRole::Pedestrian, Severity::LightlyInjured, None));

    let mut early = accident_at("2", "75", Some(111), (2012, 1, 20));
    early.vehicles.push(vehicle_with(
        "2",
        VehicleCategory::Bicycle,
        vec![
            person("2", UserRole::Driver, Severity::Killed, Some(1996)),
            person("2", UserRole::Passenger, Severity::LightlyInjured, Some(2000)),
        ],
    ));

    let mut elsewhere = accident_at("3", "93", Some(111), (2015, 3, 3));
    elsewhere.vehicles.push(vehicle_with(
        "3",
        VehicleCategory::Bicycle,
        vec![person("3", UserRole::Driver, Severity::Killed, Some(1990))],
    ));

    let mut unknown_commune = accident_at("4", "75", None, (2015, 3, 3));
    unknown_commune
        .unassociated_users
        .push(person("4", UserRole::Pedestrian, Severity::Killed, Some(1950)));

    vec![late, early, elsewhere, unknown_commune]
}
