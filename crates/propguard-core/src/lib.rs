//! Propguard Core - property value validation
//!
//! This crate holds the pure validators a template generator runs before it
//! places a property value into an output document (for example an
//! infrastructure-as-code template).
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          propguard-cli (CLI)            │
//! │    check / batch / list commands        │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     propguard-adapters (Host side)      │
//! │  JSON/TOML values, intrinsics, manifests│
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Core (Pure Functions)            │
//! │   Value, DeferredReference, Validators  │
//! │        No I/O, no shared state          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use propguard_core::prelude::*;
//!
//! assert_eq!(boolean(&Value::from("True")).unwrap(), Value::from("true"));
//! assert!(network_port(&Value::from(65_536)).is_err());
//!
//! let retries = integer_range(1, 10);
//! assert_eq!(retries(&Value::from("3")).unwrap(), Value::from("3"));
//!
//! let by_name: Validator = "iam-role-name".parse().unwrap();
//! assert!(by_name.validate(&Value::from("deploy")).is_ok());
//! ```

pub mod error;
pub mod validators;
pub mod value;

pub use error::{ErrorCategory, ValidationError, ValidationResult};
pub use validators::{ParseValidatorError, Validator};
pub use value::{DeferredReference, Value};

// Public API - what external crates should use
pub mod prelude {
    pub use crate::error::{ErrorCategory, ValidationError, ValidationResult};
    pub use crate::validators::{
        ParseValidatorError, Validator, boolean, encoding, iam_group_name, iam_names, iam_path,
        iam_role_name, integer, integer_range, network_port, positive_integer, s3_bucket_name,
        status,
    };
    pub use crate::value::{DeferredReference, Value};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
