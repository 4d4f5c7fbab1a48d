//! Referential join of one year's records
//!
//! Links the four record kinds of a single year into accident aggregates. Any
//! duplicate key or dangling reference aborts the year; no partial result is
//! returned.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

use super::stats::YearStats;
use crate::app::models::{Accident, Place, User, Vehicle, VehicleKey};
use crate::{Error, Result};

/// Unlinked records read from the four files of one year
#[derive(Debug, Clone, Default)]
pub struct YearRecords {
    pub accidents: Vec<Accident>,
    pub places: Vec<Place>,
    pub vehicles: Vec<Vehicle>,
    pub users: Vec<User>,
}

/// Link the records of `year` into accidents
///
/// Users attach to the vehicle sharing their (accident, vehicle) key, or else
/// to their accident as unassociated users. Vehicles and places then attach to
/// their accident. Accidents keep their source row order, as do the vehicles
/// and users within them.
pub fn join_year(year: u16, records: YearRecords) -> Result<(Vec<Accident>, YearStats)> {
    let YearRecords {
        mut accidents,
        places,
        mut vehicles,
        users,
    } = records;

    let mut stats = YearStats::new(year);
    stats.accidents = accidents.len();
    stats.vehicles = vehicles.len();
    stats.users = users.len();
    stats.places = places.len();

    let accident_index = index_accidents(year, &accidents)?;
    let vehicle_index = index_vehicles(year, &vehicles)?;

    for user in users {
        match vehicle_index.get(&user.vehicle_key()) {
            Some(&position) => {
                let vehicle = &mut vehicles[position];
                if vehicle.accident_id != user.accident_id {
                    return Err(Error::VehicleAccidentMismatch {
                        year,
                        user_accident_id: user.accident_id,
                        vehicle_id: vehicle.vehicle_id.clone(),
                        vehicle_accident_id: vehicle.accident_id.clone(),
                    });
                }
                vehicle.users.push(user);
            }
            None => match accident_index.get(&user.accident_id) {
                Some(&position) => {
                    stats.unassociated_users += 1;
                    accidents[position].unassociated_users.push(user);
                }
                None => {
                    return Err(Error::OrphanUser {
                        year,
                        accident_id: user.accident_id,
                    });
                }
            },
        }
    }

    for vehicle in vehicles {
        match accident_index.get(&vehicle.accident_id) {
            Some(&position) => accidents[position].vehicles.push(vehicle),
            None => {
                return Err(Error::OrphanVehicle {
                    year,
                    accident_id: vehicle.accident_id,
                    vehicle_id: vehicle.vehicle_id,
                });
            }
        }
    }

    for place in places {
        let Some(&position) = accident_index.get(&place.accident_id) else {
            return Err(Error::OrphanPlace {
                year,
                accident_id: place.accident_id,
            });
        };

        let accident = &mut accidents[position];
        if accident.place.is_some() {
            return Err(Error::DuplicatePlace {
                year,
                accident_id: place.accident_id,
            });
        }
        accident.place = Some(place);
    }

    debug!(
        "Joined {}: {} accidents, {} vehicles, {} users ({} unassociated), {} places",
        year,
        stats.accidents,
        stats.vehicles,
        stats.users,
        stats.unassociated_users,
        stats.places
    );

    Ok((accidents, stats))
}

fn index_accidents(year: u16, accidents: &[Accident]) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::with_capacity(accidents.len());

    for (position, accident) in accidents.iter().enumerate() {
        match index.entry(accident.id.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(position);
            }
            Entry::Occupied(_) => {
                return Err(Error::DuplicateAccident {
                    year,
                    accident_id: accident.id.clone(),
                });
            }
        }
    }

    Ok(index)
}

fn index_vehicles(year: u16, vehicles: &[Vehicle]) -> Result<HashMap<VehicleKey, usize>> {
    let mut index = HashMap::with_capacity(vehicles.len());

    for (position, vehicle) in vehicles.iter().enumerate() {
        match index.entry(vehicle.key()) {
            Entry::Vacant(entry) => {
                entry.insert(position);
            }
            Entry::Occupied(_) => {
                return Err(Error::DuplicateVehicle {
                    year,
                    accident_id: vehicle.accident_id.clone(),
                    vehicle_id: vehicle.vehicle_id.clone(),
                });
            }
        }
    }

    Ok(index)
}
