//! Validation errors.
//!
//! There is exactly one rejection signal, [`ValidationError`]. Every variant
//! renders a complete human-readable sentence; most embed the offending value
//! and the allowed bounds or set.

use serde::Serialize;
use thiserror::Error;

/// A candidate value was rejected.
///
/// All errors are:
/// - Cloneable (callers may collect them for batch reporting)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    // ========================================================================
    // Primitive coercion
    // ========================================================================
    #[error("{value} is not a valid boolean")]
    InvalidBoolean { value: String },

    #[error("{value} is not a valid integer")]
    InvalidInteger { value: String },

    #[error("{value} is not a positive integer")]
    NotPositive { value: String },

    #[error("integer {value} must be between {min} and {max}")]
    OutOfRange { value: String, min: i64, max: i64 },

    // ========================================================================
    // Domain rules
    // ========================================================================
    #[error("network port {value} must be between {min} and {max}")]
    InvalidPort { value: String, min: i64, max: i64 },

    #[error("{value} is not a valid S3 bucket name")]
    InvalidBucketName { value: String },

    #[error("{field} {value} needs to be one of {allowed:?}")]
    NotOneOf {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    // ========================================================================
    // IAM grammar
    // ========================================================================
    #[error("{value} is not a valid IAM name")]
    InvalidIamName { value: String },

    #[error("{value} is not a valid IAM path")]
    InvalidIamPath { value: String },

    #[error("{field} may not exceed {limit} characters (got {length})")]
    TooLong {
        field: &'static str,
        limit: usize,
        length: usize,
    },

    // ========================================================================
    // Shape mismatch
    // ========================================================================
    #[error("{validator} expects a {expected}, got a {found}")]
    UnexpectedType {
        validator: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

impl ValidationError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidBoolean { .. } => vec![
                "Use one of: true, false, 1, 0, \"true\", \"false\", \"True\", \"False\"".into(),
            ],
            Self::InvalidInteger { .. } => {
                vec!["Use a base-10 integer such as 42 or \"-7\"".into()]
            }
            Self::NotPositive { .. } => vec!["Use zero or a positive integer".into()],
            Self::OutOfRange { min, max, .. } | Self::InvalidPort { min, max, .. } => {
                vec![format!("Pick a value from {min} to {max} inclusive")]
            }
            Self::InvalidBucketName { .. } => vec![
                "Bucket names are 3-63 characters long".into(),
                "Use lowercase letters, digits, '.' and '-'".into(),
                "Start and end with a letter or digit".into(),
            ],
            Self::NotOneOf { allowed, .. } => {
                vec![format!("Allowed values (case-sensitive): {}", allowed.join(", "))]
            }
            Self::InvalidIamName { .. } => vec![
                "IAM names may contain letters, digits and _ . + = @ , -".into(),
            ],
            Self::InvalidIamPath { .. } => {
                vec!["IAM paths are \"/\" or start and end with \"/\", e.g. /division/".into()]
            }
            Self::TooLong { field, limit, .. } => {
                vec![format!("Shorten the {field} to at most {limit} characters")]
            }
            Self::UnexpectedType { expected, .. } => vec![format!("Pass a {expected} value")],
        }
    }

    /// Error category for CLI display styling and reporting.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidBoolean { .. }
            | Self::InvalidInteger { .. }
            | Self::InvalidBucketName { .. }
            | Self::InvalidIamName { .. }
            | Self::InvalidIamPath { .. } => ErrorCategory::Malformed,
            Self::NotPositive { .. }
            | Self::OutOfRange { .. }
            | Self::InvalidPort { .. }
            | Self::TooLong { .. } => ErrorCategory::OutOfBounds,
            Self::NotOneOf { .. } => ErrorCategory::NotAllowed,
            Self::UnexpectedType { .. } => ErrorCategory::WrongType,
        }
    }
}

/// Broad classification of a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCategory {
    /// The value does not follow the expected grammar.
    Malformed,
    /// The value is well-formed but outside a numeric or length limit.
    OutOfBounds,
    /// The value is not a member of a fixed set.
    NotAllowed,
    /// The value has the wrong shape altogether.
    WrongType,
}

impl ErrorCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Malformed => "malformed",
            Self::OutOfBounds => "out-of-bounds",
            Self::NotAllowed => "not-allowed",
            Self::WrongType => "wrong-type",
        }
    }
}

/// Convenient result type alias.
pub type ValidationResult<T> = Result<T, ValidationError>;
