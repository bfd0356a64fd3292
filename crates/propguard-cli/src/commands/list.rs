//! Implementation of the `propguard list` command.

use serde::Serialize;

use propguard_core::Validator;

use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct Entry {
    name: &'static str,
    summary: &'static str,
}

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    match args.format {
        ListFormat::Table => {
            output.header("Available validators:")?;
            let width = Validator::ALL_NAMES.iter().map(|n| n.len()).max().unwrap_or(0);
            for (name, summary) in Validator::catalog() {
                output.print(&format!("  {name:<width$}  {summary}"))?;
            }
        }

        ListFormat::List => {
            for name in Validator::ALL_NAMES {
                output.print(name)?;
            }
        }

        ListFormat::Json => {
            let entries: Vec<Entry> = Validator::catalog()
                .map(|(name, summary)| Entry { name, summary })
                .collect();
            output.json(&entries)?;
        }
    }

    Ok(())
}
