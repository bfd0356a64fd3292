//! IAM grammar checkers.
//!
//! Role and group names are `iam_names` plus a length ceiling; the length is
//! always checked first, so an over-long name with bad characters reports the
//! length.

use once_cell::sync::Lazy;
use regex::Regex;

use super::expect_str;
use crate::error::{ValidationError, ValidationResult};
use crate::value::Value;

pub const IAM_PATH_MAX: usize = 512;
pub const IAM_ROLE_NAME_MAX: usize = 64;
pub const IAM_GROUP_NAME_MAX: usize = 128;

static IAM_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_.+=@,-]+$").expect("static regex"));

static IAM_PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/.*/$|^/$").expect("static regex"));

/// Letters, digits and `_ . + = @ , -`; at least one character.
pub fn iam_names(value: &Value) -> ValidationResult<Value> {
    let name = expect_str("iam_names", value)?;
    if !IAM_NAME.is_match(name) {
        return Err(ValidationError::InvalidIamName {
            value: value.to_string(),
        });
    }
    Ok(value.clone())
}

/// `/` alone, or anything that starts and ends with `/`, up to 512 characters.
pub fn iam_path(value: &Value) -> ValidationResult<Value> {
    let path = expect_str("iam_path", value)?;
    check_length("IAM path", IAM_PATH_MAX, path)?;
    if !IAM_PATH.is_match(path) {
        return Err(ValidationError::InvalidIamPath {
            value: value.to_string(),
        });
    }
    Ok(value.clone())
}

pub fn iam_role_name(value: &Value) -> ValidationResult<Value> {
    let name = expect_str("iam_role_name", value)?;
    check_length("IAM role name", IAM_ROLE_NAME_MAX, name)?;
    iam_names(value)
}

pub fn iam_group_name(value: &Value) -> ValidationResult<Value> {
    let name = expect_str("iam_group_name", value)?;
    check_length("IAM group name", IAM_GROUP_NAME_MAX, name)?;
    iam_names(value)
}

/// Length in characters, not bytes.
fn check_length(field: &'static str, limit: usize, text: &str) -> ValidationResult<()> {
    let length = text.chars().count();
    if length > limit {
        return Err(ValidationError::TooLong {
            field,
            limit,
            length,
        });
    }
    Ok(())
}
