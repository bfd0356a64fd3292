//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "propguard",
    bin_name = "propguard",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Validate template property values before they reach your stack",
    long_about = "Propguard checks property values (ports, bucket names, IAM names \
                  and paths, booleans, integers) against the rules a template \
                  generator enforces, and prints the normalized value.",
    after_help = "EXAMPLES:\n\
        \x20 propguard check network_port 8080\n\
        \x20 propguard check integer_range 3 --min 1 --max 10\n\
        \x20 propguard check boolean True\n\
        \x20 propguard batch ./checks --fail-fast\n\
        \x20 propguard completions bash > /usr/share/bash-completion/completions/propguard",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate a single value.
    #[command(
        visible_alias = "c",
        about = "Validate a single value",
        after_help = "EXAMPLES:\n\
            \x20 propguard check s3_bucket_name assets.example.com\n\
            \x20 propguard check network_port '{\"Ref\": \"PortParam\"}'\n\
            \x20 propguard check integer 42 --string"
    )]
    Check(CheckArgs),

    /// Run every check in one or more manifests.
    #[command(
        visible_alias = "b",
        about = "Run check manifests",
        after_help = "EXAMPLES:\n\
            \x20 propguard batch checks.toml\n\
            \x20 propguard batch ./checks other.json --fail-fast\n\
            \x20 propguard --output-format json batch ./checks"
    )]
    Batch(BatchArgs),

    /// List available validators.
    #[command(
        visible_alias = "ls",
        about = "List available validators",
        after_help = "EXAMPLES:\n\
            \x20 propguard list\n\
            \x20 propguard list --format json"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 propguard completions bash > ~/.local/share/bash-completion/completions/propguard\n\
            \x20 propguard completions zsh  > ~/.zfunc/_propguard\n\
            \x20 propguard completions fish > ~/.config/fish/completions/propguard.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Propguard configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 propguard config show\n\
            \x20 propguard config path"
    )]
    Config(ConfigCommands),
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `propguard check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Validator name (snake_case or kebab-case).
    #[arg(value_name = "VALIDATOR", help = "Validator to run (see `propguard list`)")]
    pub validator: String,

    /// Candidate value.  Parsed as JSON when possible, so `5` is an integer,
    /// `"5"` a string and `{"Ref": "P"}` a deferred reference.
    #[arg(
        value_name = "VALUE",
        allow_hyphen_values = true,
        help = "Value to validate (JSON literal or bare string)"
    )]
    pub value: String,

    /// Lower bound for `integer_range`.
    #[arg(long = "min", value_name = "N", allow_hyphen_values = true)]
    pub min: Option<i64>,

    /// Upper bound for `integer_range`.
    #[arg(long = "max", value_name = "N", allow_hyphen_values = true)]
    pub max: Option<i64>,

    /// Treat VALUE as a plain string, never as JSON.
    #[arg(short = 's', long = "string", help = "Do not parse VALUE as JSON")]
    pub string: bool,
}

// ── batch ─────────────────────────────────────────────────────────────────────

/// Arguments for `propguard batch`.
#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Manifest files or directories.
    #[arg(value_name = "PATH", required = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,

    /// Stop at the first failing check.
    #[arg(long = "fail-fast", help = "Stop at the first failing check")]
    pub fail_fast: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `propguard list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `propguard completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `propguard config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration.
    Show,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
