//! Validator units and the [`Validator`] registry.
//!
//! Each unit is a plain function `fn(&Value) -> ValidationResult<Value>`
//! (or, for `integer_range`, a factory that returns one). They share no
//! state; the only shared resources are lazily compiled, read-only regexes.
//!
//! [`Validator`] names every unit so hosts and the CLI can pick one at
//! runtime by name.
//!
//! # Adding a validator
//!
//! 1. Write the function in the matching submodule and re-export it here
//! 2. Add the `Validator` variant, its `as_str`, `summary` and `named` arms
//! 3. Add the name to `ALL_NAMES`

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::error::{ValidationError, ValidationResult};
use crate::value::Value;

pub mod domain;
pub mod iam;
pub mod primitive;

pub use domain::{encoding, network_port, s3_bucket_name, status};
pub use iam::{iam_group_name, iam_names, iam_path, iam_role_name};
pub use primitive::{boolean, integer, integer_range, positive_integer};

/// Borrow the string inside `value` or report a shape mismatch.
pub(crate) fn expect_str<'a>(validator: &'static str, value: &'a Value) -> ValidationResult<&'a str> {
    value.as_str().ok_or(ValidationError::UnexpectedType {
        validator,
        expected: "string",
        found: value.type_name(),
    })
}

// ── Validator ────────────────────────────────────────────────────────────────

/// A runtime-selectable validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Validator {
    Boolean,
    Integer,
    PositiveInteger,
    IntegerRange { min: i64, max: i64 },
    NetworkPort,
    S3BucketName,
    Encoding,
    Status,
    IamNames,
    IamPath,
    IamRoleName,
    IamGroupName,
}

impl Validator {
    pub const ALL_NAMES: &'static [&'static str] = &[
        "boolean",
        "integer",
        "positive_integer",
        "integer_range",
        "network_port",
        "s3_bucket_name",
        "encoding",
        "status",
        "iam_names",
        "iam_path",
        "iam_role_name",
        "iam_group_name",
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::PositiveInteger => "positive_integer",
            Self::IntegerRange { .. } => "integer_range",
            Self::NetworkPort => "network_port",
            Self::S3BucketName => "s3_bucket_name",
            Self::Encoding => "encoding",
            Self::Status => "status",
            Self::IamNames => "iam_names",
            Self::IamPath => "iam_path",
            Self::IamRoleName => "iam_role_name",
            Self::IamGroupName => "iam_group_name",
        }
    }

    /// One-line description for listings.
    pub const fn summary(&self) -> &'static str {
        match self {
            Self::Boolean => "normalize a boolean marker to \"true\" or \"false\"",
            Self::Integer => "any base-10 integer (value passed through)",
            Self::PositiveInteger => "integer >= 0",
            Self::IntegerRange { .. } => "integer within an inclusive range (needs --min/--max)",
            Self::NetworkPort => "port in -1..=65535, or a deferred reference",
            Self::S3BucketName => "3-63 chars of a-z, 0-9, '.', '-'",
            Self::Encoding => "one of: plain, base64",
            Self::Status => "one of: Active, Inactive",
            Self::IamNames => "letters, digits and _.+=@,-",
            Self::IamPath => "\"/\" or /.../, at most 512 chars",
            Self::IamRoleName => "IAM name, at most 64 chars",
            Self::IamGroupName => "IAM name, at most 128 chars",
        }
    }

    /// `(name, summary)` for every validator, in `ALL_NAMES` order.
    pub fn catalog() -> impl Iterator<Item = (&'static str, &'static str)> {
        Self::ALL_NAMES.iter().filter_map(|name| {
            let bounds = (*name == "integer_range").then_some((0, 0));
            Self::named(name, bounds)
                .ok()
                .map(|v| (v.as_str(), v.summary()))
        })
    }

    /// Resolve a validator by name (`snake_case` or `kebab-case`).
    ///
    /// `integer_range` requires `bounds`; every other validator rejects them.
    pub fn named(name: &str, bounds: Option<(i64, i64)>) -> Result<Self, ParseValidatorError> {
        let key = name.trim().to_ascii_lowercase().replace('-', "_");

        if key == "integer_range" {
            let (min, max) = bounds.ok_or(ParseValidatorError::MissingBounds)?;
            return Ok(Self::IntegerRange { min, max });
        }

        let validator = match key.as_str() {
            "boolean" => Self::Boolean,
            "integer" => Self::Integer,
            "positive_integer" => Self::PositiveInteger,
            "network_port" => Self::NetworkPort,
            "s3_bucket_name" => Self::S3BucketName,
            "encoding" => Self::Encoding,
            "status" => Self::Status,
            "iam_names" => Self::IamNames,
            "iam_path" => Self::IamPath,
            "iam_role_name" => Self::IamRoleName,
            "iam_group_name" => Self::IamGroupName,
            _ => return Err(ParseValidatorError::Unknown(name.to_owned())),
        };

        if bounds.is_some() {
            return Err(ParseValidatorError::UnexpectedBounds(validator.as_str()));
        }
        Ok(validator)
    }

    /// Run the validator.
    ///
    /// Rejections are logged at `debug`; the error itself is returned
    /// unchanged to the caller.
    pub fn validate(&self, value: &Value) -> ValidationResult<Value> {
        let result = match *self {
            Self::Boolean => boolean(value),
            Self::Integer => integer(value),
            Self::PositiveInteger => positive_integer(value),
            Self::IntegerRange { min, max } => primitive::check_range(value, min, max),
            Self::NetworkPort => network_port(value),
            Self::S3BucketName => s3_bucket_name(value),
            Self::Encoding => encoding(value),
            Self::Status => status(value),
            Self::IamNames => iam_names(value),
            Self::IamPath => iam_path(value),
            Self::IamRoleName => iam_role_name(value),
            Self::IamGroupName => iam_group_name(value),
        };

        if let Err(err) = &result {
            debug!(validator = %self, %value, error = %err, "value rejected");
        }
        result
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntegerRange { min, max } => write!(f, "integer_range({min}, {max})"),
            other => f.write_str(other.as_str()),
        }
    }
}

impl FromStr for Validator {
    type Err = ParseValidatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::named(s, None)
    }
}

/// A validator name could not be resolved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseValidatorError {
    #[error("unknown validator: {0}")]
    Unknown(String),

    #[error("integer_range requires both a minimum and a maximum")]
    MissingBounds,

    #[error("validator '{0}' does not take range bounds")]
    UnexpectedBounds(&'static str),
}

impl ParseValidatorError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Unknown(_) => vec![
                format!("Known validators: {}", Validator::ALL_NAMES.join(", ")),
                "Try: propguard list".into(),
            ],
            Self::MissingBounds => vec!["Pass both --min and --max".into()],
            Self::UnexpectedBounds(_) => {
                vec!["Only integer_range accepts --min/--max".into()]
            }
        }
    }
}
