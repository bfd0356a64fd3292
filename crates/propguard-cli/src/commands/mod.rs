//! Command handlers, one module per subcommand.

pub mod batch;
pub mod check;
pub mod completions;
pub mod config;
pub mod list;
