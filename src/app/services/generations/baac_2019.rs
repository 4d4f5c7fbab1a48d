//! Reader for the 2019-2021 file layout
//!
//! Files are named `<prefix>-<year>.csv` and separated by semicolons. The 2021
//! characteristics file is published as `carcteristiques-2021.csv`. Values are
//! mostly in their final shape: four-digit years, `HH:MM` times and decimal
//! coordinates. Communes are prefixed by their département code, and vehicles
//! are keyed by `id_vehicule` instead of `num_veh`.

use std::path::{Path, PathBuf};
use tracing::info;

use super::corrections;
use super::{GenerationReader, YearFiles, build_timestamp, read_file, year_directory};
use crate::Result;
use crate::app::models::{Accident, Place, User, Vehicle};
use crate::app::services::row_decoder::Row;
use crate::app::services::row_decoder::field_parsers::{
    invalid_value, parse_code, parse_optional_i32, parse_required_i32, parse_required_key,
    parse_required_string, parse_required_u32,
};
use crate::constants::{MISSPELLED_CHARACTERISTICS_YEAR, columns, delimiters, file_prefixes};

/// Reader for the 2019-2021 layout
#[derive(Debug, Clone, Copy, Default)]
pub struct Baac2019;

impl Baac2019 {
    fn file_path(prefix: &str, year: u16, data_path: &Path) -> PathBuf {
        year_directory(year, data_path).join(format!("{prefix}-{year}.csv"))
    }

    fn convert_accident(row: &Row) -> Result<Accident> {
        let id = parse_required_key(row, columns::ACCIDENT_ID, None)?;
        let accident_id = Some(id.as_str());

        let day = parse_required_u32(row, columns::DAY, accident_id)?;
        let month = parse_required_u32(row, columns::MONTH, accident_id)?;
        let year = parse_required_i32(row, columns::YEAR, accident_id)?;

        let clock = row.column(columns::TIME)?;
        let time = parse_clock_time(clock)
            .ok_or_else(|| invalid_value(row, columns::TIME, clock, accident_id))?;
        let timestamp = build_timestamp(row, &id, (year, month, day), time)?;

        let department = row.column(columns::DEPARTMENT)?.to_string();

        let raw_commune = row.column(columns::COMMUNE)?;
        let commune = if raw_commune.is_empty() {
            None
        } else {
            let number = corrections::strip_department_prefix(raw_commune, &department);
            Some(
                number
                    .parse::<u32>()
                    .map_err(|_| invalid_value(row, columns::COMMUNE, raw_commune, accident_id))?,
            )
        };

        let address = parse_required_string(row, columns::ADDRESS)?;
        let latitude = corrections::trim_decimal_coordinate(row.column(columns::LATITUDE)?);
        let longitude = corrections::trim_decimal_coordinate(row.column(columns::LONGITUDE)?);

        Ok(Accident::new(
            id, timestamp, department, commune, address, latitude, longitude,
        ))
    }

    fn convert_place(row: &Row) -> Result<Place> {
        let accident_id = parse_required_key(row, columns::ACCIDENT_ID, None)?;
        let special_lane = parse_code(
            row,
            columns::SPECIAL_LANE,
            Some(accident_id.as_str()),
            codes::special_lane,
        )?;

        Ok(Place {
            accident_id,
            special_lane,
        })
    }

    fn convert_vehicle(row: &Row) -> Result<Vehicle> {
        let accident_id = parse_required_key(row, columns::ACCIDENT_ID, None)?;
        let id = Some(accident_id.as_str());

        let vehicle_id = parse_required_key(row, columns::VEHICLE_ID_2019, id)?;
        let category = parse_code(row, columns::VEHICLE_CATEGORY, id, |code| {
            Some(codes::vehicle_category(code))
        })?;

        Ok(Vehicle {
            accident_id,
            vehicle_id,
            category,
            users: Vec::new(),
        })
    }

    fn convert_user(row: &Row) -> Result<User> {
        let accident_id = parse_required_key(row, columns::ACCIDENT_ID, None)?;
        let id = Some(accident_id.as_str());

        let vehicle_id = parse_required_string(row, columns::VEHICLE_ID_2019)?;
        let role = parse_code(row, columns::USER_ROLE, id, codes::user_role)?;
        let sex = parse_code(row, columns::SEX, id, codes::sex)?;
        let severity = parse_code(row, columns::SEVERITY, id, codes::severity)?;
        let birth_year = parse_optional_i32(row, columns::BIRTH_YEAR, id)?;

        Ok(User {
            accident_id,
            vehicle_id,
            role,
            severity,
            sex,
            birth_year,
        })
    }
}

/// Parse an `HH:MM` clock time into `(hour, minute)`
fn parse_clock_time(raw: &str) -> Option<(u32, u32)> {
    let (hour, minute) = raw.split_once(':')?;
    if hour.is_empty() || minute.len() != 2 {
        return None;
    }
    Some((hour.parse().ok()?, minute.parse().ok()?))
}

impl GenerationReader for Baac2019 {
    fn name(&self) -> &'static str {
        "baac_2019"
    }

    fn year_files(&self, year: u16, data_path: &Path) -> YearFiles {
        let characteristics = if year == MISSPELLED_CHARACTERISTICS_YEAR {
            file_prefixes::CHARACTERISTICS_MISSPELLED
        } else {
            file_prefixes::CHARACTERISTICS
        };

        YearFiles {
            characteristics: Self::file_path(characteristics, year, data_path),
            places: Self::file_path(file_prefixes::PLACES, year, data_path),
            vehicles: Self::file_path(file_prefixes::VEHICLES, year, data_path),
            users: Self::file_path(file_prefixes::USERS, year, data_path),
        }
    }

    fn read_characteristics(&self, year: u16, data_path: &Path) -> Result<Vec<Accident>> {
        let path = self.year_files(year, data_path).characteristics;
        info!("Reading accident characteristics from {}", path.display());
        read_file(
            &path,
            delimiters::SEMICOLON,
            encoding_rs::WINDOWS_1252,
            Self::convert_accident,
        )
    }

    fn read_places(&self, year: u16, data_path: &Path) -> Result<Vec<Place>> {
        let path = self.year_files(year, data_path).places;
        read_file(
            &path,
            delimiters::SEMICOLON,
            encoding_rs::WINDOWS_1252,
            Self::convert_place,
        )
    }

    fn read_vehicles(&self, year: u16, data_path: &Path) -> Result<Vec<Vehicle>> {
        let path = self.year_files(year, data_path).vehicles;
        read_file(
            &path,
            delimiters::SEMICOLON,
            encoding_rs::WINDOWS_1252,
            Self::convert_vehicle,
        )
    }

    fn read_users(&self, year: u16, data_path: &Path) -> Result<Vec<User>> {
        let path = self.year_files(year, data_path).users;
        read_file(
            &path,
            delimiters::SEMICOLON,
            encoding_rs::WINDOWS_1252,
            Self::convert_user,
        )
    }
}

/// Code tables of the 2019-2021 layout
pub mod codes {
    use crate::app::models::{Severity, Sex, SpecialLane, UserRole, VehicleCategory};
    use crate::constants::UNRECORDED_CODE;

    /// `catv`; references retired in 2006 still occur and keep their class
    pub fn vehicle_category(code: i32) -> VehicleCategory {
        match code {
            UNRECORDED_CODE | 0 => VehicleCategory::Indeterminable,
            1 => VehicleCategory::Bicycle,
            4 | 30 | 32 | 34 => VehicleCategory::Scooter,
            5 | 31 | 33 => VehicleCategory::Motorcycle,
            7..=9 => VehicleCategory::LightVehicle,
            10..=12 => VehicleCategory::UtilityVehicle,
            13..=15 => VehicleCategory::HeavyGoodsVehicle,
            37 => VehicleCategory::Bus,
            38 => VehicleCategory::Coach,
            39 => VehicleCategory::Train,
            40 => VehicleCategory::Tramway,
            // includes 50 (EDP à moteur), 60 (EDP sans moteur) and 80 (VAE)
            _ => VehicleCategory::Other,
        }
    }

    pub fn user_role(code: i32) -> Option<UserRole> {
        match code {
            1 => Some(UserRole::Driver),
            2 => Some(UserRole::Passenger),
            3 => Some(UserRole::Pedestrian),
            _ => None,
        }
    }

    pub fn severity(code: i32) -> Option<Severity> {
        match code {
            UNRECORDED_CODE => Some(Severity::NotRecorded),
            1 => Some(Severity::Unharmed),
            2 => Some(Severity::Killed),
            3 => Some(Severity::Hospitalized),
            4 => Some(Severity::LightlyInjured),
            _ => None,
        }
    }

    pub fn sex(code: i32) -> Option<Sex> {
        match code {
            UNRECORDED_CODE => Some(Sex::NotRecorded),
            1 => Some(Sex::Male),
            2 => Some(Sex::Female),
            _ => None,
        }
    }

    pub fn special_lane(code: i32) -> Option<SpecialLane> {
        match code {
            UNRECORDED_CODE => Some(SpecialLane::NotRecorded),
            0 => Some(SpecialLane::NotApplicable),
            1 => Some(SpecialLane::CycleTrack),
            2 => Some(SpecialLane::CycleLane),
            3 => Some(SpecialLane::OtherReservedLane),
            _ => None,
        }
    }
}
