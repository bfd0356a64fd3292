//! Implementation of the `propguard batch` command.

use serde::Serialize;
use tracing::{debug, info, instrument};

use propguard_adapters::{CheckReport, ManifestLoader};
use propguard_core::Value;

use crate::{
    cli::BatchArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::{OutputManager, value_text},
};

/// JSON shape of one check result.
#[derive(Debug, Serialize)]
struct ReportOutput<'a> {
    source: String,
    name: &'a str,
    validator: String,
    input: &'a Value,
    passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a CheckReport> for ReportOutput<'a> {
    fn from(report: &'a CheckReport) -> Self {
        Self {
            source: report.source.display().to_string(),
            name: &report.name,
            validator: report.validator.to_string(),
            input: &report.input,
            passed: report.passed(),
            output: report.outcome.as_ref().ok(),
            error: report.outcome.as_ref().err().map(ToString::to_string),
        }
    }
}

/// JSON shape of the whole run.
#[derive(Debug, Serialize)]
struct BatchOutput<'a> {
    total: usize,
    passed: usize,
    failed: usize,
    checks: Vec<ReportOutput<'a>>,
}

#[instrument(skip_all, fields(paths = args.paths.len()))]
pub fn execute(args: BatchArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let fail_fast = args.fail_fast || config.checks.fail_fast;
    let loader = ManifestLoader::new(&config.checks.extensions);

    let mut reports = Vec::new();
    'paths: for path in &args.paths {
        for manifest in loader.load(path)? {
            debug!(source = %manifest.source.display(), checks = manifest.checks.len(), "running manifest");
            let run = manifest.run(fail_fast);
            let stop = fail_fast && run.iter().any(|r| !r.passed());
            reports.extend(run);
            if stop {
                break 'paths;
            }
        }
    }

    let total = reports.len();
    let failed = reports.iter().filter(|r| !r.passed()).count();
    info!(total, failed, "batch finished");

    if output.is_json() {
        output.json(&BatchOutput {
            total,
            passed: total - failed,
            failed,
            checks: reports.iter().map(ReportOutput::from).collect(),
        })?;
    } else {
        render(&reports, &output)?;
        if total == 0 {
            output.warning("no checks found")?;
        } else {
            output.dim(&format!("\n{} passed, {failed} failed", total - failed))?;
        }
    }

    if failed > 0 {
        return Err(CliError::ChecksFailed { failed, total });
    }
    Ok(())
}

fn render(reports: &[CheckReport], output: &OutputManager) -> CliResult<()> {
    let mut current = None;
    for report in reports {
        if current != Some(&report.source) {
            output.header(&report.source.display().to_string())?;
            current = Some(&report.source);
        }
        match &report.outcome {
            Ok(value) => output.success(&format!(
                "{} ({}): {}",
                report.name,
                report.validator,
                value_text(value)
            ))?,
            Err(err) => output.error(&format!("{} ({}): {err}", report.name, report.validator))?,
        }
    }
    Ok(())
}
