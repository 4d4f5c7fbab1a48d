//! Tests for the referential join

use super::*;
use crate::Error;
use crate::app::models::UserRole;
use crate::app::services::assembler::{YearRecords, join_year};

fn base_records() -> YearRecords {
    YearRecords {
        accidents: vec![accident("A1"), accident("A2")],
        places: vec![place("A2"), place("A1")],
        vehicles: vec![vehicle("A1", "V1"), vehicle("A1", "V2"), vehicle("A2", "V1")],
        users: vec![
            user("A1", "V1", UserRole::Driver),
            user("A1", "V2", UserRole::Driver),
            user("A1", "V2", UserRole::Passenger),
            user("A2", "V1", UserRole::Driver),
        ],
    }
}

#[test]
fn test_users_attach_to_matching_vehicle() {
    let (accidents, stats) = join_year(2020, base_records()).unwrap();

    assert_eq!(accidents.len(), 2);
    let a1 = &accidents[0];
    assert_eq!(a1.id, "A1");
    assert_eq!(a1.vehicles.len(), 2);
    assert_eq!(a1.vehicles[0].users.len(), 1);
    assert_eq!(a1.vehicles[1].users.len(), 2);
    assert_eq!(a1.vehicles[1].users[1].role, UserRole::Passenger);
    assert!(a1.unassociated_users.is_empty());

    let a2 = &accidents[1];
    assert_eq!(a2.vehicles[0].users.len(), 1);
    assert_eq!(a2.vehicles[0].users[0].accident_id, "A2");

    assert_eq!(stats.accidents, 2);
    assert_eq!(stats.vehicles, 3);
    assert_eq!(stats.users, 4);
    assert_eq!(stats.unassociated_users, 0);
    assert_eq!(stats.places, 2);
}

#[test]
fn test_same_vehicle_id_in_two_accidents_is_distinct() {
    let (accidents, _) = join_year(2020, base_records()).unwrap();

    assert_eq!(accidents[0].vehicles[0].vehicle_id, "V1");
    assert_eq!(accidents[1].vehicles[0].vehicle_id, "V1");
    assert_eq!(accidents[0].user_count(), 3);
    assert_eq!(accidents[1].user_count(), 1);
}

#[test]
fn test_user_without_vehicle_is_unassociated() {
    let mut records = base_records();
    records.users.push(user("A2", "V9", UserRole::Pedestrian));
    records.users.push(user("A2", "", UserRole::Passenger));

    let (accidents, stats) = join_year(2020, records).unwrap();

    let a2 = &accidents[1];
    assert_eq!(a2.unassociated_users.len(), 2);
    assert_eq!(a2.unassociated_users[0].role, UserRole::Pedestrian);
    assert_eq!(a2.vehicles[0].users.len(), 1);
    assert_eq!(stats.unassociated_users, 2);
    assert_eq!(stats.associated_users(), 4);
}

#[test]
fn test_places_attach_to_their_accident() {
    let (accidents, _) = join_year(2020, base_records()).unwrap();

    assert_eq!(accidents[0].place.as_ref().unwrap().accident_id, "A1");
    assert_eq!(accidents[1].place.as_ref().unwrap().accident_id, "A2");
}

#[test]
fn test_accident_without_place_or_vehicle() {
    let records = YearRecords {
        accidents: vec![accident("A1")],
        ..Default::default()
    };

    let (accidents, _) = join_year(2020, records).unwrap();
    assert!(accidents[0].place.is_none());
    assert!(accidents[0].vehicles.is_empty());
}

#[test]
fn test_source_order_is_preserved() {
    let records = YearRecords {
        accidents: vec![accident("C"), accident("A"), accident("B")],
        vehicles: vec![vehicle("A", "2"), vehicle("A", "1")],
        ..Default::default()
    };

    let (accidents, _) = join_year(2020, records).unwrap();
    let ids: Vec<_> = accidents.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["C", "A", "B"]);

    let vehicle_ids: Vec<_> = accidents[1].vehicles.iter().map(|v| v.vehicle_id.as_str()).collect();
    assert_eq!(vehicle_ids, ["2", "1"]);
}

#[test]
fn test_duplicate_accident() {
    let mut records = base_records();
    records.accidents.push(accident("A1"));

    let err = join_year(2015, records).unwrap_err();
    assert!(matches!(
        err,
        Error::DuplicateAccident { year: 2015, ref accident_id } if accident_id == "A1"
    ));
    assert_eq!(err.to_string(), "in year 2015, accident A1 encountered twice");
    assert!(err.is_referential());
}

#[test]
fn test_duplicate_vehicle() {
    let mut records = base_records();
    records.vehicles.push(vehicle("A1", "V2"));

    let err = join_year(2020, records).unwrap_err();
    assert_eq!(
        err.to_string(),
        "in year 2020, in accident A1, vehicle V2 encountered twice"
    );
}

#[test]
fn test_duplicate_place() {
    let mut records = base_records();
    records.places.push(place("A1"));

    let err = join_year(2020, records).unwrap_err();
    assert!(matches!(err, Error::DuplicatePlace { ref accident_id, .. } if accident_id == "A1"));
}

#[test]
fn test_orphan_user() {
    let mut records = base_records();
    records.users.push(user("A9", "V1", UserRole::Driver));

    let err = join_year(2020, records).unwrap_err();
    assert_eq!(err.to_string(), "in year 2020, a user has nonexistent accident A9");
}

#[test]
fn test_orphan_vehicle() {
    let mut records = base_records();
    records.vehicles.push(vehicle("A9", "V1"));

    let err = join_year(2020, records).unwrap_err();
    assert!(matches!(
        err,
        Error::OrphanVehicle { ref accident_id, ref vehicle_id, .. }
            if accident_id == "A9" && vehicle_id == "V1"
    ));
}

#[test]
fn test_orphan_user_with_known_vehicle_key_in_unknown_accident() {
    let mut records = base_records();
    records.vehicles.push(vehicle("A9", "V1"));
    records.users.push(user("A9", "V1", UserRole::Driver));

    // the user attaches to its vehicle; the vehicle itself is the orphan
    let err = join_year(2020, records).unwrap_err();
    assert!(matches!(err, Error::OrphanVehicle { .. }));
}

#[test]
fn test_orphan_place() {
    let mut records = base_records();
    records.places.push(place("A9"));

    let err = join_year(2020, records).unwrap_err();
    assert!(matches!(err, Error::OrphanPlace { year: 2020, .. }));
}

#[test]
fn test_keys_containing_separators_do_not_collide() {
    let records = YearRecords {
        accidents: vec![accident("1_2"), accident("1")],
        vehicles: vec![vehicle("1_2", "3"), vehicle("1", "2_3")],
        users: vec![user("1", "2_3", UserRole::Driver)],
        ..Default::default()
    };

    let (accidents, _) = join_year(2020, records).unwrap();
    assert!(accidents[0].vehicles[0].users.is_empty());
    assert_eq!(accidents[1].vehicles[0].users.len(), 1);
}
