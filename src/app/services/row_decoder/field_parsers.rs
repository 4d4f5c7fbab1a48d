//! Field parsing utilities for decoded rows
//!
//! Every failure is reported as [`Error::InvalidValue`] naming the column, the
//! raw value, the accident key when it is already known and the file.

use super::decoder::Row;
use crate::{Error, Result};

/// Build the value error for `column` of `row`
pub fn invalid_value(row: &Row, column: &str, value: &str, accident_id: Option<&str>) -> Error {
    Error::invalid_value(column, value, accident_id, row.path())
}

/// Parse a required string field, which may be empty
pub fn parse_required_string(row: &Row, column: &str) -> Result<String> {
    Ok(row.column(column)?.to_string())
}

/// Parse a required non-empty identifier
pub fn parse_required_key(row: &Row, column: &str, accident_id: Option<&str>) -> Result<String> {
    let value = row.column(column)?;
    if value.is_empty() {
        return Err(invalid_value(row, column, value, accident_id));
    }
    Ok(value.to_string())
}

/// Parse a required i32 field
pub fn parse_required_i32(row: &Row, column: &str, accident_id: Option<&str>) -> Result<i32> {
    let value = row.column(column)?;
    value
        .parse::<i32>()
        .map_err(|_| invalid_value(row, column, value, accident_id))
}

/// Parse a required u32 field
pub fn parse_required_u32(row: &Row, column: &str, accident_id: Option<&str>) -> Result<u32> {
    let value = row.column(column)?;
    value
        .parse::<u32>()
        .map_err(|_| invalid_value(row, column, value, accident_id))
}

/// Parse an optional i32 field; an empty cell is `None`
pub fn parse_optional_i32(
    row: &Row,
    column: &str,
    accident_id: Option<&str>,
) -> Result<Option<i32>> {
    let value = row.column(column)?;
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<i32>()
        .map(Some)
        .map_err(|_| invalid_value(row, column, value, accident_id))
}

/// Parse an optional u32 field; an empty cell is `None`
pub fn parse_optional_u32(
    row: &Row,
    column: &str,
    accident_id: Option<&str>,
) -> Result<Option<u32>> {
    let value = row.column(column)?;
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<u32>()
        .map(Some)
        .map_err(|_| invalid_value(row, column, value, accident_id))
}

/// Parse a coded field through a generation's code table
///
/// The table returns `None` for codes it does not know.
pub fn parse_code<T>(
    row: &Row,
    column: &str,
    accident_id: Option<&str>,
    table: impl Fn(i32) -> Option<T>,
) -> Result<T> {
    let value = row.column(column)?;
    value
        .parse::<i32>()
        .ok()
        .and_then(table)
        .ok_or_else(|| invalid_value(row, column, value, accident_id))
}
