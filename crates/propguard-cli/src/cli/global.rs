//! Flags accepted by every `propguard` subcommand.
//!
//! Flattened into [`super::Cli`] and marked `global`, so `propguard -v check ...`
//! and `propguard check ... -v` mean the same thing.

use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global arguments for all commands.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Verbosity counter.
    ///
    /// Each `-v` lowers the log filter one step (INFO, DEBUG, TRACE). At DEBUG
    /// every rejected value is logged with the validator that refused it.
    /// `RUST_LOG`, when set, replaces this mapping entirely.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "More log output on stderr (-v, -vv, -vvv)",
        long_help = "Raise the log level on stderr:
    (none)  - warnings and errors only
    -v      - accepted values and batch totals
    -vv     - every rejected value, manifest discovery
    -vvv    - everything, including config loading
Errors also show their full cause chain once -v is given."
    )]
    pub verbose: u8,

    /// Only failures are printed; exit codes still report the outcome.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print failures only; rely on the exit code"
    )]
    pub quiet: bool,

    /// Turn off ANSI colours in results and error reports.
    ///
    /// Also set by the `NO_COLOR` environment variable
    /// (<https://no-color.org>) or `output.no_color` in the config file.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Config file to read instead of the platform default.
    ///
    /// Unlike the default location, a file named here must exist.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read configuration from FILE (must exist)"
    )]
    pub config: Option<PathBuf>,

    /// Rendering of results on stdout and log lines on stderr.
    ///
    /// `auto` defers to `output.format` from the config, then to terminal
    /// detection.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Result format: auto, human, plain or json"
    )]
    pub output_format: OutputFormat,
}

impl GlobalArgs {
    /// The format asked for by the flag, falling back to the config value.
    ///
    /// May still be `Auto`; terminal detection happens in the output layer.
    pub fn requested_format(&self, configured: OutputFormat) -> OutputFormat {
        match self.output_format {
            OutputFormat::Auto => configured,
            explicit => explicit,
        }
    }
}

/// How results are rendered.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human on a terminal, plain when piped.
    #[default]
    Auto,
    /// Coloured, with check marks.
    Human,
    /// No colour codes.
    Plain,
    /// One JSON document on stdout, JSON log lines on stderr.
    Json,
}
