//! Test utilities for the row decoder
//!
//! Fixtures are written as raw bytes so that encoding fallbacks can be
//! exercised with genuine Windows-1252 content.

use std::io::Write;
use tempfile::NamedTempFile;


/// Helper to create a temporary file with given raw content
pub fn create_temp_file(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

/// Small semicolon-separated users file in the 2019 style
pub fn create_users_csv() -> &'static [u8] {
    b"\"Num_Acc\";\"id_vehicule\";\"catu\";\"grav\";\"sexe\";\"an_nais\"\n\
\"201900000001\";\"138 306 524\";\"1\";\"4\";\"2\";\"2002\"\n\
\"201900000001\";\"138 306 525\";\"3\";\"1\";\"1\";\"\"\n"
}
