//! Legacy value corrections
//!
//! The 2005-2018 files encode several values in ways the later files no longer
//! use: two-digit years, packed `HHMM` times, zero-padded département codes and
//! fixed-point coordinates. These functions normalize them to the shapes the
//! 2019 files already use. They are pure and never touch the file system.

use crate::constants::{
    CORSE_DU_SUD, CORSE_DU_SUD_CODE, FIXED_POINT_INTEGER_DIGITS, HAUTE_CORSE, HAUTE_CORSE_CODE,
    TWO_DIGIT_YEAR_CENTURY,
};

/// Decimal separator of the coordinates published from 2019 on
pub const COORDINATE_SEPARATOR: char = ',';

/// Add the century to a two-digit year (`5` -> `2005`)
pub fn expand_two_digit_year(year: i32) -> i32 {
    year + TWO_DIGIT_YEAR_CENTURY
}

/// Split a packed time of one to four digits into `(hour, minute)`
///
/// The last two digits are the minute; whatever precedes them is the hour.
/// `"5"` is 00:05, `"930"` is 09:30 and `"2115"` is 21:15. Returns `None` for
/// empty, over-long or non-numeric input. Range checks are left to the caller.
pub fn decompose_packed_time(raw: &str) -> Option<(u32, u32)> {
    if raw.is_empty() || raw.len() > 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let split = raw.len().saturating_sub(2);
    let hour = if split == 0 {
        0
    } else {
        raw[..split].parse().ok()?
    };
    let minute = raw[split..].parse().ok()?;

    Some((hour, minute))
}

/// Normalize a département code of the 2005 layout
///
/// `"201"`/`"202"` are Corsica (`"2A"`/`"2B"`); any other three-character code
/// ending in `'0'` carries a padding zero (`"750"` -> `"75"`).
pub fn correct_department(raw: &str) -> String {
    match raw {
        CORSE_DU_SUD_CODE => CORSE_DU_SUD.to_string(),
        HAUTE_CORSE_CODE => HAUTE_CORSE.to_string(),
        _ if raw.len() == 3 && raw.ends_with('0') => raw[..2].to_string(),
        _ => raw.to_string(),
    }
}

/// Convert a fixed-point coordinate of the 2005 layout to a decimal string
///
/// The separator goes after the first two digits, following an optional sign;
/// trailing zeros, a dangling separator and one leading zero are then removed
/// (`"4885123"` -> `"48,85123"`, `"0229760"` -> `"2,2976"`). Empty values and
/// single digits such as `"0"` are unrecorded and become an empty string.
/// Returns `None` when the value is not numeric, whatever its length.
pub fn fixed_point_coordinate(raw: &str) -> Option<String> {
    let (sign, digits) = split_sign(raw);

    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() < FIXED_POINT_INTEGER_DIGITS {
        return Some(String::new());
    }

    let (integer, fraction) = digits.split_at(FIXED_POINT_INTEGER_DIGITS);
    let decimal = format!("{integer}{COORDINATE_SEPARATOR}{fraction}");
    let trimmed = trim_trailing_zeros(&decimal);
    let unpadded = match trimmed.strip_prefix('0') {
        Some(rest) if !rest.is_empty() && !rest.starts_with(COORDINATE_SEPARATOR) => rest,
        _ => trimmed,
    };

    Some(format!("{sign}{unpadded}"))
}

/// Trim trailing zeros from a coordinate already published as a decimal string
///
/// Integers without a separator are left alone.
pub fn trim_decimal_coordinate(raw: &str) -> String {
    trim_trailing_zeros(raw).to_string()
}

/// Remove the département prefix a 2019 commune code carries (`"75101"` -> `"101"`)
pub fn strip_department_prefix<'a>(commune: &'a str, department: &str) -> &'a str {
    if department.is_empty() {
        return commune;
    }
    commune.strip_prefix(department).unwrap_or(commune)
}

fn split_sign(raw: &str) -> (&str, &str) {
    match raw.chars().next() {
        Some(sign @ ('-' | '+')) => raw.split_at(sign.len_utf8()),
        _ => ("", raw),
    }
}

fn trim_trailing_zeros(decimal: &str) -> &str {
    if !decimal.contains([COORDINATE_SEPARATOR, '.']) {
        return decimal;
    }
    decimal
        .trim_end_matches('0')
        .trim_end_matches([COORDINATE_SEPARATOR, '.'])
}
