//! Host-side adapters for Propguard.
//!
//! The core validators know nothing about documents or files. This crate is
//! the host model's side of the contract: it turns JSON/TOML into candidate
//! values, marks intrinsic functions as deferred references, and loads check
//! manifests from disk.

pub mod intrinsic;
pub mod json;
pub mod manifest;

// Re-export commonly used adapters
pub use intrinsic::Intrinsic;
pub use json::{value_from_json, value_from_literal};
pub use manifest::{
    Check, CheckReport, Manifest, ManifestError, ManifestFormat, ManifestLoader,
};
