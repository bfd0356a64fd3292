//! Domain checkers: network ports, S3 bucket names, and the fixed enums.

use once_cell::sync::Lazy;
use regex::Regex;

use super::expect_str;
use super::primitive::parse_integer;
use crate::error::{ValidationError, ValidationResult};
use crate::value::Value;

/// Lowest accepted port; `-1` stands for "any/disabled".
pub const PORT_MIN: i64 = -1;
pub const PORT_MAX: i64 = 65_535;

pub const VALID_ENCODINGS: &[&str] = &["plain", "base64"];
pub const VALID_STATUSES: &[&str] = &["Active", "Inactive"];

static S3_BUCKET_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9.-]{1,61}[a-z0-9]$").expect("static regex"));

/// Check a port number in `-1..=65535`.
///
/// Deferred references skip every check and come back unchanged: their value
/// is not known until the template is evaluated.
pub fn network_port(value: &Value) -> ValidationResult<Value> {
    if value.is_deferred() {
        return Ok(value.clone());
    }

    let port = parse_integer(value)?;
    if port < i128::from(PORT_MIN) || port > i128::from(PORT_MAX) {
        return Err(ValidationError::InvalidPort {
            value: value.to_string(),
            min: PORT_MIN,
            max: PORT_MAX,
        });
    }
    Ok(value.clone())
}

/// Check the simplified S3 bucket grammar: 3-63 characters of lowercase
/// letters, digits, `.` and `-`, starting and ending with a letter or digit.
pub fn s3_bucket_name(value: &Value) -> ValidationResult<Value> {
    let name = expect_str("s3_bucket_name", value)?;
    if !S3_BUCKET_NAME.is_match(name) {
        return Err(ValidationError::InvalidBucketName {
            value: value.to_string(),
        });
    }
    Ok(value.clone())
}

pub fn encoding(value: &Value) -> ValidationResult<Value> {
    one_of("encoding", VALID_ENCODINGS, value)
}

pub fn status(value: &Value) -> ValidationResult<Value> {
    one_of("status", VALID_STATUSES, value)
}

/// Exact, case-sensitive membership. Non-strings are simply not members.
fn one_of(
    field: &'static str,
    allowed: &'static [&'static str],
    value: &Value,
) -> ValidationResult<Value> {
    match value.as_str() {
        Some(s) if allowed.contains(&s) => Ok(value.clone()),
        _ => Err(ValidationError::NotOneOf {
            field,
            value: value.to_string(),
            allowed,
        }),
    }
}
