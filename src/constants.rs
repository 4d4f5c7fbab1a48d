//! Application constants for the accident processor
//!
//! This module contains the file naming conventions, column names, delimiters
//! and default values shared by the dataset generations and the CLI.

// =============================================================================
// Supported Years
// =============================================================================

/// First year published in the 2005 file layout
pub const BAAC_2005_FIRST_YEAR: u16 = 2005;

/// Last year published in the 2005 file layout
pub const BAAC_2005_LAST_YEAR: u16 = 2018;

/// First year published in the 2019 file layout
pub const BAAC_2019_FIRST_YEAR: u16 = 2019;

/// Last year published in the 2019 file layout
pub const BAAC_2019_LAST_YEAR: u16 = 2021;

/// Last year whose 2005-layout file names use an underscore before the year
pub const LAST_UNDERSCORE_SUFFIX_YEAR: u16 = 2016;

/// Year whose characteristics file is tab-separated
pub const TAB_SEPARATED_CHARACTERISTICS_YEAR: u16 = 2009;

/// Year whose characteristics file name is misspelled at the source
pub const MISSPELLED_CHARACTERISTICS_YEAR: u16 = 2021;

// =============================================================================
// File Names and Delimiters
// =============================================================================

/// File name prefixes of the four per-year files
pub mod file_prefixes {
    pub const CHARACTERISTICS: &str = "caracteristiques";
    pub const CHARACTERISTICS_MISSPELLED: &str = "carcteristiques";
    pub const PLACES: &str = "lieux";
    pub const VEHICLES: &str = "vehicules";
    pub const USERS: &str = "usagers";
}

/// Field delimiters used across generations
pub mod delimiters {
    pub const COMMA: u8 = b',';
    pub const TAB: u8 = b'\t';
    pub const SEMICOLON: u8 = b';';
}

// =============================================================================
// Column Names
// =============================================================================

/// Source column names (matched case-insensitively)
pub mod columns {
    pub const ACCIDENT_ID: &str = "Num_Acc";
    pub const VEHICLE_ID_2005: &str = "num_veh";
    pub const VEHICLE_ID_2019: &str = "id_vehicule";
    pub const DAY: &str = "jour";
    pub const MONTH: &str = "mois";
    pub const YEAR: &str = "an";
    pub const TIME: &str = "hrmn";
    pub const DEPARTMENT: &str = "dep";
    pub const COMMUNE: &str = "com";
    pub const ADDRESS: &str = "adr";
    pub const LATITUDE: &str = "lat";
    pub const LONGITUDE: &str = "long";
    pub const SPECIAL_LANE: &str = "vosp";
    pub const VEHICLE_CATEGORY: &str = "catv";
    pub const USER_ROLE: &str = "catu";
    pub const SEX: &str = "sexe";
    pub const SEVERITY: &str = "grav";
    pub const BIRTH_YEAR: &str = "an_nais";
}

// =============================================================================
// Value Conventions
// =============================================================================

/// Code the source uses for "non renseigné"
pub const UNRECORDED_CODE: i32 = -1;

/// Century added to the two-digit years of the 2005 layout
pub const TWO_DIGIT_YEAR_CENTURY: i32 = 2000;

/// Number of integer digits in the fixed-point coordinates of the 2005 layout
pub const FIXED_POINT_INTEGER_DIGITS: usize = 2;

/// Reserved département codes for Corsica in the 2005 layout
pub const CORSE_DU_SUD_CODE: &str = "201";
pub const HAUTE_CORSE_CODE: &str = "202";
pub const CORSE_DU_SUD: &str = "2A";
pub const HAUTE_CORSE: &str = "2B";

/// Age under which a road user counts as a minor
pub const MINOR_AGE_LIMIT: i32 = 18;

// =============================================================================
// Configuration Defaults
// =============================================================================

/// Default directory holding one sub-directory per year
pub const DEFAULT_DATA_PATH: &str = "./data";

/// Application directory name under the user's config directory
pub const CONFIG_DIR_NAME: &str = "accident-processor";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the data path
pub const ENV_DATA_PATH: &str = "ACCIDENT_DATA_PATH";

/// Environment variable overriding the first year to read
pub const ENV_START_YEAR: &str = "ACCIDENT_START_YEAR";

/// Environment variable overriding the last year to read
pub const ENV_END_YEAR: &str = "ACCIDENT_END_YEAR";

/// Accepted shapes of a département code on the command line
pub const DEPARTMENT_PATTERN: &str = r"^(\d{2,3}|2[AB])$";
