//! Implementation of the `propguard check` command.

use serde::Serialize;
use tracing::{info, instrument};

use propguard_adapters::value_from_literal;
use propguard_core::{Validator, Value};

use crate::{
    cli::CheckArgs,
    error::{CliError, CliResult},
    output::{OutputManager, value_text},
};

/// JSON shape of a `check` result.
#[derive(Debug, Serialize)]
struct CheckOutput<'a> {
    validator: String,
    input: &'a Value,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'static str>,
}

#[instrument(skip_all, fields(validator = %args.validator))]
pub fn execute(args: CheckArgs, output: OutputManager) -> CliResult<()> {
    let validator = resolve(&args)?;
    let input = parse_input(&args);
    let outcome = validator.validate(&input);

    if output.is_json() {
        output.json(&CheckOutput {
            validator: validator.to_string(),
            input: &input,
            valid: outcome.is_ok(),
            output: outcome.as_ref().ok().cloned(),
            error: outcome.as_ref().err().map(ToString::to_string),
            category: outcome.as_ref().err().map(|e| e.category().as_str()),
        })?;
    }

    match outcome {
        Ok(normalized) => {
            info!(%validator, %normalized, "value accepted");
            if !output.is_json() {
                output.success(&value_text(&normalized))?;
            }
            Ok(())
        }
        Err(source) => Err(CliError::Rejected {
            validator: validator.to_string(),
            source,
        }),
    }
}

fn resolve(args: &CheckArgs) -> CliResult<Validator> {
    let bounds = match (args.min, args.max) {
        (Some(min), Some(max)) => Some((min, max)),
        (None, None) => None,
        _ => return Err(propguard_core::ParseValidatorError::MissingBounds.into()),
    };
    Ok(Validator::named(&args.validator, bounds)?)
}

fn parse_input(args: &CheckArgs) -> Value {
    if args.string {
        Value::from(args.value.as_str())
    } else {
        value_from_literal(&args.value)
    }
}
