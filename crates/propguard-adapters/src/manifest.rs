//! Check manifests: named validator runs declared in TOML or JSON files.
//!
//! # `checks.toml` format
//!
//! ```toml
//! [[check]]
//! name      = "WebBucket"          # label shown in reports
//! validator = "s3_bucket_name"     # any name from `Validator::ALL_NAMES`
//! value     = "assets.example.com"
//!
//! [[check]]
//! name      = "Retries"
//! validator = "integer_range"
//! min       = 1                    # integer_range only
//! max       = 10
//! value     = "3"
//!
//! [[check]]
//! name      = "ListenerPort"
//! validator = "network_port"
//! value     = { Ref = "PortParam" } # intrinsic: passed through
//! ```
//!
//! The JSON form is the same document: `{"check": [{...}, ...]}`.

use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use propguard_core::{ParseValidatorError, ValidationResult, Validator, Value};

use crate::json::value_from_json;

// ── Errors ────────────────────────────────────────────────────────────────────

/// A manifest could not be located, read, parsed or resolved.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest path not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("unsupported manifest format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("check '{name}' in '{}': {source}", path.display())]
    InvalidCheck {
        path: PathBuf,
        name: String,
        #[source]
        source: ParseValidatorError,
    },

    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl ManifestError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotFound { path } => vec![
                format!("Nothing exists at '{}'", path.display()),
                "Pass a manifest file or a directory containing manifests".into(),
            ],
            Self::Io { .. } | Self::Walk(_) => vec!["Check file permissions".into()],
            Self::Parse { .. } => vec![
                "Each check needs `name`, `validator` and `value`".into(),
                "Checks live in a `[[check]]` array (TOML) or a \"check\" list (JSON)".into(),
            ],
            Self::UnsupportedFormat { .. } => {
                vec!["Use a .toml or .json manifest".into()]
            }
            Self::InvalidCheck { source, .. } => source.suggestions(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a manifest file.
#[derive(Debug, Deserialize, Clone)]
pub struct ManifestFile {
    #[serde(default, rename = "check", alias = "checks")]
    pub checks: Vec<CheckEntry>,
}

/// One `[[check]]` entry.
#[derive(Debug, Deserialize, Clone)]
pub struct CheckEntry {
    pub name: String,
    pub validator: String,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub value: serde_json::Value,
}

/// A resolved check, ready to run.
#[derive(Debug, Clone)]
pub struct Check {
    pub name: String,
    pub validator: Validator,
    pub value: Value,
}

impl Check {
    pub fn run(&self) -> ValidationResult<Value> {
        self.validator.validate(&self.value)
    }
}

/// All checks from one manifest file.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub source: PathBuf,
    pub checks: Vec<Check>,
}

/// Result of one check.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub source: PathBuf,
    pub name: String,
    pub validator: Validator,
    pub input: Value,
    pub outcome: ValidationResult<Value>,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }
}

impl Manifest {
    /// Parse manifest text. `source` is only used for diagnostics.
    pub fn parse(
        source: impl Into<PathBuf>,
        text: &str,
        format: ManifestFormat,
    ) -> Result<Self, ManifestError> {
        let source = source.into();
        let file: ManifestFile = match format {
            ManifestFormat::Toml => toml::from_str(text).map_err(|e| ManifestError::Parse {
                path: source.clone(),
                message: e.to_string(),
            })?,
            ManifestFormat::Json => {
                serde_json::from_str(text).map_err(|e| ManifestError::Parse {
                    path: source.clone(),
                    message: e.to_string(),
                })?
            }
        };

        let checks = file
            .checks
            .into_iter()
            .map(|entry| resolve_check(&source, entry))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { source, checks })
    }

    /// Run every check in declaration order.
    ///
    /// With `fail_fast`, stops after the first failing check (which is still
    /// included in the output).
    pub fn run(&self, fail_fast: bool) -> Vec<CheckReport> {
        let mut reports = Vec::with_capacity(self.checks.len());
        for check in &self.checks {
            let report = CheckReport {
                source: self.source.clone(),
                name: check.name.clone(),
                validator: check.validator,
                input: check.value.clone(),
                outcome: check.run(),
            };
            let failed = !report.passed();
            reports.push(report);
            if fail_fast && failed {
                break;
            }
        }
        reports
    }
}

fn resolve_check(source: &Path, entry: CheckEntry) -> Result<Check, ManifestError> {
    let bounds = match (entry.min, entry.max) {
        (Some(min), Some(max)) => Some((min, max)),
        (None, None) => None,
        _ => {
            return Err(ManifestError::InvalidCheck {
                path: source.to_path_buf(),
                name: entry.name,
                source: ParseValidatorError::MissingBounds,
            });
        }
    };

    let validator =
        Validator::named(&entry.validator, bounds).map_err(|e| ManifestError::InvalidCheck {
            path: source.to_path_buf(),
            name: entry.name.clone(),
            source: e,
        })?;

    Ok(Check {
        name: entry.name,
        validator,
        value: value_from_json(entry.value),
    })
}

/// Supported manifest encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Json,
}

impl ManifestFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(OsStr::to_str)?.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads manifests from files or directory trees.
///
/// An explicitly named file must load cleanly. During a directory walk, files
/// whose manifest is unreadable or malformed emit a `WARN` log and are
/// skipped; they do not prevent other manifests from loading.
///
/// # Example
///
/// ```no_run
/// use propguard_adapters::ManifestLoader;
///
/// let manifests = ManifestLoader::default().load("./checks")?;
/// println!("Loaded {} manifests", manifests.len());
/// # Ok::<(), propguard_adapters::ManifestError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ManifestLoader {
    extensions: Vec<String>,
}

impl Default for ManifestLoader {
    fn default() -> Self {
        Self::new(["toml", "json"])
    }
}

impl ManifestLoader {
    /// Restrict directory walks to files with these extensions.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// Load one file, or every matching file under a directory.
    ///
    /// Symlinks are followed. Entries below the root that cannot be read
    /// (dangling links, loops, permission errors) are skipped with a warning,
    /// the same as files that fail to parse.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<Manifest>, ManifestError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ManifestError::NotFound {
                path: path.to_path_buf(),
            });
        }

        if path.is_file() {
            return Ok(vec![load_file(path)?]);
        }

        let mut manifests = Vec::new();
        let walk = WalkDir::new(path)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name();
        for entry in walk {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.accepts(entry.path()) {
                continue;
            }

            match load_file(entry.path()) {
                Ok(manifest) => {
                    debug!(
                        file   = %entry.path().display(),
                        checks = manifest.checks.len(),
                        "loaded manifest"
                    );
                    manifests.push(manifest);
                }
                Err(e) => {
                    warn!(
                        file  = %entry.path().display(),
                        error = %e,
                        "skipping manifest due to load error"
                    );
                }
            }
        }

        debug!(count = manifests.len(), "finished loading manifests");
        Ok(manifests)
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

fn load_file(path: &Path) -> Result<Manifest, ManifestError> {
    let format = ManifestFormat::from_path(path).ok_or_else(|| ManifestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let text = fs::read_to_string(path).map_err(|e| ManifestError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Manifest::parse(path, &text, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use propguard_core::ValidationError;
    use tempfile::TempDir;

    const SAMPLE_TOML: &str = r#"
[[check]]
name = "WebBucket"
validator = "s3_bucket_name"
value = "assets.example.com"

[[check]]
name = "Retries"
validator = "integer_range"
min = 1
max = 10
value = "30"

[[check]]
name = "ListenerPort"
validator = "network-port"
value = { Ref = "PortParam" }
"#;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn parses_toml_checks() {
        let m = Manifest::parse("checks.toml", SAMPLE_TOML, ManifestFormat::Toml).unwrap();
        assert_eq!(m.checks.len(), 3);
        assert_eq!(m.checks[0].validator, Validator::S3BucketName);
        assert_eq!(
            m.checks[1].validator,
            Validator::IntegerRange { min: 1, max: 10 }
        );
        assert!(m.checks[2].value.is_deferred());
    }

    #[test]
    fn parses_json_checks() {
        let json = r#"{"check": [
            {"name": "Enc", "validator": "encoding", "value": "base64"},
            {"name": "Flag", "validator": "boolean", "value": 1}
        ]}"#;
        let m = Manifest::parse("c.json", json, ManifestFormat::Json).unwrap();
        let reports = m.run(false);
        assert!(reports.iter().all(CheckReport::passed));
        assert_eq!(reports[1].outcome, Ok(Value::from("true")));
    }

    #[test]
    fn run_reports_every_check() {
        let m = Manifest::parse("checks.toml", SAMPLE_TOML, ManifestFormat::Toml).unwrap();
        let reports = m.run(false);
        assert_eq!(reports.len(), 3);
        assert!(reports[0].passed());
        assert!(matches!(
            reports[1].outcome,
            Err(ValidationError::OutOfRange { min: 1, max: 10, .. })
        ));
        assert!(reports[2].passed());
    }

    #[test]
    fn fail_fast_stops_after_first_failure() {
        let m = Manifest::parse("checks.toml", SAMPLE_TOML, ManifestFormat::Toml).unwrap();
        let reports = m.run(true);
        assert_eq!(reports.len(), 2);
        assert!(!reports[1].passed());
    }

    #[test]
    fn partial_bounds_are_rejected() {
        let text = r#"
[[check]]
name = "R"
validator = "integer_range"
min = 1
value = 3
"#;
        let err = Manifest::parse("m.toml", text, ManifestFormat::Toml).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::InvalidCheck {
                source: ParseValidatorError::MissingBounds,
                ..
            }
        ));
    }

    #[test]
    fn unknown_validator_names_the_check() {
        let text = r#"
[[check]]
name = "Mystery"
validator = "uuid"
value = "x"
"#;
        let err = Manifest::parse("m.toml", text, ManifestFormat::Toml).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Mystery"), "{msg}");
        assert!(msg.contains("uuid"), "{msg}");
    }

    #[test]
    fn missing_value_is_parse_error() {
        let text = r#"
[[check]]
name = "NoValue"
validator = "integer"
"#;
        let err = Manifest::parse("m.toml", text, ManifestFormat::Toml).unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            ManifestFormat::from_path(Path::new("a/b.TOML")),
            Some(ManifestFormat::Toml)
        );
        assert_eq!(
            ManifestFormat::from_path(Path::new("c.json")),
            Some(ManifestFormat::Json)
        );
        assert_eq!(ManifestFormat::from_path(Path::new("c.yaml")), None);
    }

    #[test]
    fn load_missing_path_is_not_found() {
        let err = ManifestLoader::default()
            .load("/definitely/not/here")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn load_single_file() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "checks.toml", SAMPLE_TOML);
        let manifests = ManifestLoader::default().load(&path).unwrap();
        assert_eq!(manifests.len(), 1);
        assert_eq!(manifests[0].source, path);
    }

    #[test]
    fn explicit_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "bad.toml", "[[check]]\nname = ");
        assert!(ManifestLoader::default().load(&path).is_err());
    }

    #[test]
    fn directory_walk_skips_bad_and_foreign_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.toml", SAMPLE_TOML);
        write(
            dir.path(),
            "nested/b.json",
            r#"{"check": [{"name": "S", "validator": "status", "value": "Active"}]}"#,
        );
        write(dir.path(), "broken.toml", "not = [valid");
        write(dir.path(), "notes.txt", "ignored");

        let manifests = ManifestLoader::default().load(dir.path()).unwrap();
        assert_eq!(manifests.len(), 2);
        let total: usize = manifests.iter().map(|m| m.checks.len()).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn loader_respects_configured_extensions() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.toml", SAMPLE_TOML);
        write(
            dir.path(),
            "b.json",
            r#"{"check": [{"name": "S", "validator": "status", "value": "Active"}]}"#,
        );

        let manifests = ManifestLoader::new([".json"]).load(dir.path()).unwrap();
        assert_eq!(manifests.len(), 1);
        assert_eq!(manifests[0].checks[0].validator, Validator::Status);
    }

    #[cfg(unix)]
    #[test]
    fn directory_walk_skips_dangling_links() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        write(dir.path(), "good.toml", SAMPLE_TOML);
        let missing = dir.path().join("missing.toml");
        symlink(&missing, dir.path().join("broken.toml")).unwrap();
        symlink(dir.path(), dir.path().join("loop")).unwrap();

        let manifests = ManifestLoader::default().load(dir.path()).unwrap();
        assert_eq!(manifests.len(), 1);
        assert!(manifests[0].source.ends_with("good.toml"));
    }
}
