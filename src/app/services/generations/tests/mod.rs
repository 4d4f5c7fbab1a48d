//! Test fixtures for the dataset generations
//!
//! Each helper writes a small but complete year directory in one of the two
//! layouts under a temporary data path.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

mod registry_tests;

/// Write `content` to `<data_path>/<year>/<name>`
pub fn write_year_file(data_path: &Path, year: u16, name: &str, content: &[u8]) -> PathBuf {
    let dir = data_path.join(year.to_string());
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Characteristics of two accidents in the 2012 layout (one in Corsica)
pub const CHARACTERISTICS_2012: &[u8] = b"Num_Acc,an,mois,jour,hrmn,lum,agg,int,atm,col,com,adr,gps,lat,long,dep\n\
201200000001,12,3,7,930,1,2,1,1,3,101,RUE DE RIVOLI,M,4886123,0234560,750\n\
201200000002,12,3,8,5,1,2,1,1,3,,,M,,,201\n";

pub const PLACES_2012: &[u8] = b"Num_Acc,catr,vosp,prof\n\
201200000001,4,1,1\n\
201200000002,3,,1\n";

pub const VEHICLES_2012: &[u8] = b"Num_Acc,senc,catv,occutc,num_veh\n\
201200000001,0,1,0,A01\n\
201200000001,0,7,0,B02\n\
201200000002,0,33,0,A01\n";

/// Users: a cyclist, a driver, a pedestrian struck by B02 and a passenger of an
/// unknown vehicle
pub const USERS_2012: &[u8] = b"Num_Acc,place,catu,grav,sexe,an_nais,num_veh\n\
201200000001,1,1,3,1,1998,A01\n\
201200000001,1,1,1,2,1975,B02\n\
201200000001,,3,2,1,2001,B02\n\
201200000002,2,2,4,2,,Z99\n";

/// Write the complete 2012 fixture
pub fn write_year_2012(data_path: &Path) {
    write_year_file(data_path, 2012, "caracteristiques_2012.csv", CHARACTERISTICS_2012);
    write_year_file(data_path, 2012, "lieux_2012.csv", PLACES_2012);
    write_year_file(data_path, 2012, "vehicules_2012.csv", VEHICLES_2012);
    write_year_file(data_path, 2012, "usagers_2012.csv", USERS_2012);
}

pub const CHARACTERISTICS_2019: &[u8] = b"\"Num_Acc\";\"jour\";\"mois\";\"an\";\"hrmn\";\"lum\";\"dep\";\"com\";\"agg\";\"adr\";\"lat\";\"long\"\n\
\"201900000001\";\"30\";\"11\";\"2019\";\"01:30\";\"4\";\"93\";\"93053\";\"1\";\"AUTOROUTE A3\";\"48,89621000\";\"2,47012000\"\n\
\"201900000002\";\"02\";\"01\";\"2019\";\"18:05\";\"1\";\"2A\";\"2A004\";\"2\";\"COURS NAPOLEON\";\"41,92000000\";\"8,73800000\"\n";

pub const PLACES_2019: &[u8] = b"\"Num_Acc\";\"catr\";\"vosp\"\n\
\"201900000001\";\"1\";\"0\"\n\
\"201900000002\";\"4\";\"-1\"\n";

pub const VEHICLES_2019: &[u8] = b"\"Num_Acc\";\"id_vehicule\";\"num_veh\";\"catv\"\n\
\"201900000001\";\"138 306 524\";\"B01\";\"2\"\n\
\"201900000002\";\"138 306 525\";\"A01\";\"1\"\n";

pub const USERS_2019: &[u8] = b"\"Num_Acc\";\"id_vehicule\";\"num_veh\";\"catu\";\"grav\";\"sexe\";\"an_nais\"\n\
\"201900000001\";\"138 306 524\";\"B01\";\"1\";\"1\";\"1\";\"1980\"\n\
\"201900000002\";\"138 306 525\";\"A01\";\"1\";\"3\";\"2\";\"2005\"\n\
\"201900000002\";\"138 306 525\";\"A01\";\"3\";\"-1\";\"-1\";\"\"\n";

/// Write the complete 2019 fixture
pub fn write_year_2019(data_path: &Path) {
    write_year_file(data_path, 2019, "caracteristiques-2019.csv", CHARACTERISTICS_2019);
    write_year_file(data_path, 2019, "lieux-2019.csv", PLACES_2019);
    write_year_file(data_path, 2019, "vehicules-2019.csv", VEHICLES_2019);
    write_year_file(data_path, 2019, "usagers-2019.csv", USERS_2019);
}

/// Temporary data path holding the 2012 and 2019 fixtures
pub fn create_test_data_path() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_year_2012(dir.path());
    write_year_2019(dir.path());
    dir
}
