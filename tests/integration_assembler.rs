//! End-to-end tests over small data directories in both file layouts
//!
//! Each test writes a temporary `<data_path>/<year>/` tree, assembles it and
//! checks the linked model and the person report built from it.

use accident_processor::app::models::{Severity, UserRole, VehicleCategory};
use accident_processor::app::services::assembler::{DatasetAssembler, YearRange};
use accident_processor::app::services::report_writer::{ReportFormat, write_report, write_report_to};
use accident_processor::app::services::selection::{PersonCategory, PersonReport, SelectionCriteria};
use accident_processor::Error;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CHARACTERISTICS_2012: &str = "Num_Acc,an,mois,jour,hrmn,lum,agg,int,atm,col,com,adr,gps,lat,long,dep\n\
201200000001,12,3,7,930,1,2,1,1,3,101,RUE DE RIVOLI,M,4886123,0234560,750\n\
201200000002,12,3,8,5,1,2,1,1,3,,,M,,,201\n";

const PLACES_2012: &str = "Num_Acc,catr,vosp,prof\n\
201200000001,4,1,1\n\
201200000002,3,,1\n";

const VEHICLES_2012: &str = "Num_Acc,senc,catv,occutc,num_veh\n\
201200000001,0,1,0,A01\n\
201200000001,0,7,0,B02\n\
201200000002,0,33,0,A01\n";

const USERS_2012: &str = "Num_Acc,place,catu,grav,sexe,an_nais,num_veh\n\
201200000001,1,1,3,1,1998,A01\n\
201200000001,1,1,1,2,1975,B02\n\
201200000001,,3,2,1,2001,B02\n\
201200000002,2,2,4,2,,Z99\n";

const CHARACTERISTICS_2019: &str = "\"Num_Acc\";\"jour\";\"mois\";\"an\";\"hrmn\";\"lum\";\"dep\";\"com\";\"agg\";\"adr\";\"lat\";\"long\"\n\
\"201900000001\";\"30\";\"11\";\"2019\";\"01:30\";\"4\";\"75\";\"75101\";\"1\";\"QUAI DU LOUVRE\";\"48,85900000\";\"2,34000000\"\n";

const PLACES_2019: &str = "\"Num_Acc\";\"catr\";\"vosp\"\n\
\"201900000001\";\"4\";\"2\"\n";

const VEHICLES_2019: &str = "\"Num_Acc\";\"id_vehicule\";\"num_veh\";\"catv\"\n\
\"201900000001\";\"138 306 524\";\"A01\";\"7\"\n";

const USERS_2019: &str = "\"Num_Acc\";\"id_vehicule\";\"num_veh\";\"catu\";\"grav\";\"sexe\";\"an_nais\"\n\
\"201900000001\";\"138 306 524\";\"A01\";\"1\";\"1\";\"1\";\"1980\"\n\
\"201900000001\";\"138 306 524\";\"A01\";\"3\";\"4\";\"2\";\"2010\"\n";

fn write(data_path: &Path, year: u16, name: &str, content: &str) {
    let dir = data_path.join(year.to_string());
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

fn write_2005_layout(data_path: &Path, year: u16, characteristics: &str) {
    let sep = if year <= 2016 { '_' } else { '-' };
    write(data_path, year, &format!("caracteristiques{sep}{year}.csv"), characteristics);
    write(data_path, year, &format!("lieux{sep}{year}.csv"), PLACES_2012);
    write(data_path, year, &format!("vehicules{sep}{year}.csv"), VEHICLES_2012);
    write(data_path, year, &format!("usagers{sep}{year}.csv"), USERS_2012);
}

/// Header-only files: a year without accidents
fn write_empty_2005_layout(data_path: &Path, year: u16) {
    let sep = if year <= 2016 { '_' } else { '-' };
    write(data_path, year, &format!("caracteristiques{sep}{year}.csv"), "Num_Acc,an,mois,jour,hrmn,com,adr,lat,long,dep\n");
    write(data_path, year, &format!("lieux{sep}{year}.csv"), "Num_Acc,vosp\n");
    write(data_path, year, &format!("vehicules{sep}{year}.csv"), "Num_Acc,catv,num_veh\n");
    write(data_path, year, &format!("usagers{sep}{year}.csv"), "Num_Acc,catu,grav,sexe,an_nais,num_veh\n");
}

fn write_2019(data_path: &Path) {
    write(data_path, 2019, "caracteristiques-2019.csv", CHARACTERISTICS_2019);
    write(data_path, 2019, "lieux-2019.csv", PLACES_2019);
    write(data_path, 2019, "vehicules-2019.csv", VEHICLES_2019);
    write(data_path, 2019, "usagers-2019.csv", USERS_2019);
}

/// Data path with 2012 and 2013 (same accident keys) in the 2005 layout
fn create_2005_data_path() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_2005_layout(dir.path(), 2012, CHARACTERISTICS_2012);
    write_2005_layout(
        dir.path(),
        2013,
        &CHARACTERISTICS_2012.replace(",12,3,", ",13,3,"),
    );
    dir
}

#[test]
fn test_assemble_links_users_vehicles_and_places() {
    let dir = create_2005_data_path();
    let result = DatasetAssembler::new(dir.path())
        .assemble(&YearRange::single(2012).unwrap())
        .unwrap();

    assert_eq!(result.accidents.len(), 2);
    assert_eq!(result.stats.years.len(), 1);
    assert_eq!(result.stats.total_users(), 4);
    assert_eq!(result.stats.total_unassociated_users(), 1);

    let paris = &result.accidents[0];
    assert_eq!(paris.department, "75");
    assert_eq!(paris.commune, Some(101));
    assert!(paris.place.is_some());
    assert_eq!(paris.vehicles.len(), 2);
    assert_eq!(paris.vehicles[0].users.len(), 1);
    assert_eq!(paris.vehicles[1].users.len(), 2);
    assert_eq!(paris.vehicles[1].users[1].role, UserRole::Pedestrian);
    assert!(paris.unassociated_users.is_empty());

    let corsica = &result.accidents[1];
    assert_eq!(corsica.department, "2A");
    assert_eq!(corsica.unassociated_users.len(), 1);
    assert_eq!(corsica.unassociated_users[0].severity, Severity::LightlyInjured);
}

#[test]
fn test_same_key_in_two_years_is_kept_twice() {
    let dir = create_2005_data_path();
    let result = DatasetAssembler::new(dir.path())
        .assemble(&YearRange::new(2012, 2013).unwrap())
        .unwrap();

    assert_eq!(result.accidents.len(), 4);
    let years: Vec<i32> = result.accidents.iter().map(|a| a.year()).collect();
    assert_eq!(years, vec![2012, 2012, 2013, 2013]);
    assert_eq!(result.accidents[0].id, result.accidents[2].id);
}

#[test]
fn test_missing_year_directory_aborts() {
    let dir = create_2005_data_path();
    let err = DatasetAssembler::new(dir.path())
        .assemble(&YearRange::new(2012, 2014).unwrap())
        .unwrap_err();

    assert!(matches!(err, Error::FileNotFound { .. }));
}

#[test]
fn test_unsupported_year_is_rejected_before_reading() {
    assert!(matches!(
        YearRange::new(2004, 2012),
        Err(Error::UnsupportedYear { year: 2004 })
    ));
}

#[test]
fn test_duplicate_accident_fails_the_year() {
    let dir = TempDir::new().unwrap();
    let duplicated = format!(
        "{}201200000001,12,3,9,1200,1,2,1,1,3,101,RUE DE RIVOLI,M,,,750\n",
        CHARACTERISTICS_2012
    );
    write_2005_layout(dir.path(), 2012, &duplicated);

    let err = DatasetAssembler::new(dir.path())
        .assemble(&YearRange::single(2012).unwrap())
        .unwrap_err();

    assert!(err.is_referential());
    assert!(err.to_string().contains("201200000001"));
}

#[test]
fn test_commune_report_across_generations() {
    let dir = create_2005_data_path();
    write_2019(dir.path());
    for year in 2014..=2018 {
        write_empty_2005_layout(dir.path(), year);
    }

    let result = DatasetAssembler::new(dir.path())
        .assemble(&YearRange::new(2012, 2019).unwrap())
        .unwrap();

    let mut criteria = SelectionCriteria::new("75", 101);
    criteria.include_pedestrians = true;
    criteria.include_cyclists = true;
    criteria.validate().unwrap();

    let report = PersonReport::build(&result.accidents, &criteria);
    let categories: Vec<PersonCategory> = report.records.iter().map(|r| r.category).collect();

    // cyclist and pedestrian in 2012 and 2013, pedestrian in 2019
    assert_eq!(
        categories,
        vec![
            PersonCategory::Cyclist,
            PersonCategory::Pedestrian,
            PersonCategory::Cyclist,
            PersonCategory::Pedestrian,
            PersonCategory::Pedestrian,
        ]
    );
    assert_eq!(
        report.records[4].striking_vehicle,
        Some(VehicleCategory::LightVehicle)
    );

    let mut buffer = Vec::new();
    write_report_to(&mut buffer, &report.rows(), ReportFormat::Csv).unwrap();
    let csv = String::from_utf8(buffer).unwrap();
    let mut lines = csv.lines();

    assert_eq!(
        lines.next(),
        Some(
            "Date,Adresse,Latitude,Longitude,Catégorie de personne,Gravité,Année de naissance,Sexe,Véhicule qui a heurté le piéton"
        )
    );
    assert_eq!(
        lines.next(),
        Some("2012-03-07T09:30,RUE DE RIVOLI,\"48,86123\",\"2,3456\",Cycliste,Blessé hospitalisé,1998,Masculin,")
    );
    assert_eq!(lines.count(), 4);
}

#[test]
fn test_empty_selection_writes_no_file() {
    let dir = create_2005_data_path();
    let result = DatasetAssembler::new(dir.path())
        .assemble(&YearRange::single(2012).unwrap())
        .unwrap();

    let mut criteria = SelectionCriteria::new("75", 999);
    criteria.include_others = true;
    let report = PersonReport::build(&result.accidents, &criteria);
    assert!(report.is_empty());

    let out = dir.path().join("report.csv");
    let written = write_report(&report.rows(), ReportFormat::Csv, Some(&out)).unwrap();
    assert_eq!(written, 0);
    assert!(!out.exists());
}

#[test]
fn test_no_category_is_rejected() {
    let criteria = SelectionCriteria::new("75", 101);
    let err = criteria.validate().unwrap_err();
    assert_eq!(err.to_string(), "no user categories selected");
}
