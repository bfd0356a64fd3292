//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `PROPGUARD__OUTPUT__FORMAT=json`,
//!    `PROPGUARD__CHECKS__EXTENSIONS=toml,json`, ...
//! 3. Config file (`--config`, or the platform default from [`AppConfig::config_path`])
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Environment variable prefix; nested keys are separated by `__`.
const ENV_PREFIX: &str = "PROPGUARD";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output settings.
    pub output: OutputConfig,
    /// Batch check settings.
    pub checks: ChecksConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// Used when `--output-format` is left at `auto`.
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecksConfig {
    /// Stop `batch` at the first failing check.
    pub fail_fast: bool,
    /// File extensions picked up when `batch` walks a directory.
    pub extensions: Vec<String>,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            extensions: vec!["toml".into(), "json".into()],
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// A file passed via `--config` must exist; the platform default is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "loading configuration");

        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> CliResult<Self> {
        let defaults = Config::try_from(&Self::default()).map_err(config_error)?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("checks.extensions"),
            )
            .build()
            .and_then(|cfg| cfg.try_deserialize::<Self>())
            .map_err(config_error)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.propguard.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "propguard", "propguard")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".propguard.toml"))
    }
}

fn config_error(err: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: err.to_string(),
        source: Some(Box::new(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert!(!cfg.output.no_color);
        assert_eq!(cfg.output.format, OutputFormat::Auto);
        assert!(!cfg.checks.fail_fast);
        assert_eq!(cfg.checks.extensions, ["toml", "json"]);
    }

    #[test]
    fn missing_optional_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("absent.toml"), false).unwrap();
        assert_eq!(cfg.checks, ChecksConfig::default());
    }

    #[test]
    fn missing_explicit_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, CliError::ConfigError { .. }));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("propguard.toml");
        fs::write(
            &path,
            "[output]\nformat = \"json\"\n\n[checks]\nfail_fast = true\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.output.format, OutputFormat::Json);
        assert!(cfg.checks.fail_fast);
        // untouched keys keep their defaults
        assert!(!cfg.output.no_color);
        assert_eq!(cfg.checks.extensions, ["toml", "json"]);
    }

    #[test]
    fn bad_value_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("propguard.toml");
        fs::write(&path, "[output]\nformat = \"sparkly\"\n").unwrap();

        assert!(matches!(
            AppConfig::load(Some(&path)),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
