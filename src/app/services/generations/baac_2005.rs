//! Reader for the 2005-2018 file layout
//!
//! Files are named `<prefix>_<year>.csv` up to 2016 and `<prefix>-<year>.csv`
//! afterwards. They are comma-separated, except the 2009 characteristics file
//! which uses tabs, and were exported in Windows-1252. Years have two digits,
//! times are packed `HHMM` integers, coordinates are fixed-point and the
//! département code carries a padding zero.

use std::path::{Path, PathBuf};
use tracing::info;

use super::corrections;
use super::{GenerationReader, YearFiles, build_timestamp, read_file, year_directory};
use crate::Result;
use crate::app::models::{Accident, Place, SpecialLane, User, Vehicle};
use crate::app::services::row_decoder::Row;
use crate::app::services::row_decoder::field_parsers::{
    invalid_value, parse_code, parse_optional_i32, parse_optional_u32, parse_required_i32,
    parse_required_key, parse_required_string, parse_required_u32,
};
use crate::constants::{
    LAST_UNDERSCORE_SUFFIX_YEAR, TAB_SEPARATED_CHARACTERISTICS_YEAR, columns, delimiters,
    file_prefixes,
};

/// Reader for the 2005-2018 layout
#[derive(Debug, Clone, Copy, Default)]
pub struct Baac2005;

impl Baac2005 {
    fn file_path(prefix: &str, year: u16, data_path: &Path) -> PathBuf {
        let separator = if year <= LAST_UNDERSCORE_SUFFIX_YEAR {
            '_'
        } else {
            '-'
        };
        year_directory(year, data_path).join(format!("{prefix}{separator}{year}.csv"))
    }

    fn characteristics_delimiter(year: u16) -> u8 {
        if year == TAB_SEPARATED_CHARACTERISTICS_YEAR {
            delimiters::TAB
        } else {
            delimiters::COMMA
        }
    }

    fn convert_accident(row: &Row) -> Result<Accident> {
        let id = parse_required_key(row, columns::ACCIDENT_ID, None)?;
        let accident_id = Some(id.as_str());

        let day = parse_required_u32(row, columns::DAY, accident_id)?;
        let month = parse_required_u32(row, columns::MONTH, accident_id)?;
        let year = corrections::expand_two_digit_year(parse_required_i32(
            row,
            columns::YEAR,
            accident_id,
        )?);

        let packed_time = row.column(columns::TIME)?;
        let time = corrections::decompose_packed_time(packed_time)
            .ok_or_else(|| invalid_value(row, columns::TIME, packed_time, accident_id))?;
        let timestamp = build_timestamp(row, &id, (year, month, day), time)?;

        let department = corrections::correct_department(row.column(columns::DEPARTMENT)?);
        let commune = parse_optional_u32(row, columns::COMMUNE, accident_id)?;
        let address = parse_required_string(row, columns::ADDRESS)?;
        let latitude = Self::coordinate(row, columns::LATITUDE, accident_id)?;
        let longitude = Self::coordinate(row, columns::LONGITUDE, accident_id)?;

        Ok(Accident::new(
            id, timestamp, department, commune, address, latitude, longitude,
        ))
    }

    fn coordinate(row: &Row, column: &str, accident_id: Option<&str>) -> Result<String> {
        let raw = row.column(column)?;
        corrections::fixed_point_coordinate(raw)
            .ok_or_else(|| invalid_value(row, column, raw, accident_id))
    }

    fn convert_place(row: &Row) -> Result<Place> {
        let accident_id = parse_required_key(row, columns::ACCIDENT_ID, None)?;

        let special_lane = if row.column(columns::SPECIAL_LANE)?.is_empty() {
            SpecialLane::NotRecorded
        } else {
            parse_code(
                row,
                columns::SPECIAL_LANE,
                Some(accident_id.as_str()),
                codes::special_lane,
            )?
        };

        Ok(Place {
            accident_id,
            special_lane,
        })
    }

    fn convert_vehicle(row: &Row) -> Result<Vehicle> {
        let accident_id = parse_required_key(row, columns::ACCIDENT_ID, None)?;
        let id = Some(accident_id.as_str());

        let vehicle_id = parse_required_key(row, columns::VEHICLE_ID_2005, id)?;
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

        let vehicle_id = parse_required_string(row, columns::VEHICLE_ID_2005)?;
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

impl GenerationReader for Baac2005 {
    fn name(&self) -> &'static str {
        "baac_2005"
    }

    fn year_files(&self, year: u16, data_path: &Path) -> YearFiles {
        YearFiles {
            characteristics: Self::file_path(file_prefixes::CHARACTERISTICS, year, data_path),
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
            Self::characteristics_delimiter(year),
            encoding_rs::WINDOWS_1252,
            Self::convert_accident,
        )
    }

    fn read_places(&self, year: u16, data_path: &Path) -> Result<Vec<Place>> {
        let path = self.year_files(year, data_path).places;
        read_file(
            &path,
            delimiters::COMMA,
            encoding_rs::WINDOWS_1252,
            Self::convert_place,
        )
    }

    fn read_vehicles(&self, year: u16, data_path: &Path) -> Result<Vec<Vehicle>> {
        let path = self.year_files(year, data_path).vehicles;
        read_file(
            &path,
            delimiters::COMMA,
            encoding_rs::WINDOWS_1252,
            Self::convert_vehicle,
        )
    }

    fn read_users(&self, year: u16, data_path: &Path) -> Result<Vec<User>> {
        let path = self.year_files(year, data_path).users;
        read_file(
            &path,
            delimiters::COMMA,
            encoding_rs::WINDOWS_1252,
            Self::convert_user,
        )
    }
}

/// Code tables of the 2005-2018 layout
pub mod codes {
    use crate::app::models::{Severity, Sex, SpecialLane, UserRole, VehicleCategory};
    use crate::constants::UNRECORDED_CODE;

    /// `catv`, with the references retired in 2006 folded into their successors
    pub fn vehicle_category(code: i32) -> VehicleCategory {
        match code {
            UNRECORDED_CODE | 0 => VehicleCategory::Indeterminable,
            1 => VehicleCategory::Bicycle,
            // 04 scooter immatriculé, retired 2006
            4 | 30 | 32 | 34 => VehicleCategory::Scooter,
            // 05 motocyclette, retired 2006
            5 | 31 | 33 => VehicleCategory::Motorcycle,
            // 08 VL + caravane, 09 VL + remorque, retired 2006
            7..=9 => VehicleCategory::LightVehicle,
            // 11 VU + caravane, 12 VU + remorque, retired 2006
            10..=12 => VehicleCategory::UtilityVehicle,
            13..=15 => VehicleCategory::HeavyGoodsVehicle,
            37 => VehicleCategory::Bus,
            38 => VehicleCategory::Coach,
            39 => VehicleCategory::Train,
            40 => VehicleCategory::Tramway,
            _ => VehicleCategory::Other,
        }
    }

    /// `catu`; code 4 (roller or scooter pedestrian) became a vehicle in 2018
    pub fn user_role(code: i32) -> Option<UserRole> {
        match code {
            1 | 4 => Some(UserRole::Driver),
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

    /// `vosp`; an empty cell is handled by the caller
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
