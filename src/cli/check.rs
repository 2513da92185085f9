//! The check command: resolve identity, load rules, probe, report.

use super::Cli;
use crate::config::{load_rule_set, AppSettings};
use crate::error::CliResult;
use crate::evaluator::{Evaluator, Outcome};
use crate::identity::resolve_with_override;
use crate::output::{self, OutputFormat};
use crate::probe::ConnectProbe;
use std::io;
use std::time::Duration;
use tracing::info;

/// Execute a full check run.
///
/// Identity and configuration failures abort before any probe is sent.
/// Unreachable ports never fail the run; they are reported.
pub async fn execute(cli: &Cli) -> CliResult<Outcome> {
    let settings = match &cli.settings {
        Some(path) => AppSettings::load_from(path)?,
        None => AppSettings::load()?,
    };

    let format = cli.output.unwrap_or(settings.output_format);
    let timeout = cli
        .timeout
        .map(Duration::from_millis)
        .unwrap_or_else(|| settings.timeout());

    let local_ip = resolve_with_override(cli.local_ip.as_deref())?;
    info!(%local_ip, "resolved local identity");

    if format.is_streaming() {
        output::print_local_ip(local_ip)?;
    }

    let rule_set = load_rule_set(&cli.config)?;
    info!(path = %cli.config.display(), rules = rule_set.len(), "loaded rules");

    let evaluator = Evaluator::new(rule_set, local_ip, ConnectProbe::new(timeout));

    if cli.dry_run {
        let count = output::write_dry_run(&mut io::stdout().lock(), evaluator.applicable_rules())?;
        return Ok(if count == 0 {
            Outcome::NoApplicableRules
        } else {
            Outcome::Checked(count)
        });
    }

    match format {
        OutputFormat::Plain => run_streaming(evaluator, cli.quiet).await,
        OutputFormat::Json | OutputFormat::Csv => {
            let evaluation = evaluator.collect().await;
            output::write_evaluation(&mut io::stdout().lock(), &evaluation, format)?;
            output::write_outcome_notice(&mut io::stderr().lock(), &evaluation, format)?;
            Ok(evaluation.outcome())
        }
    }
}

/// Print each rule's report as soon as it has been checked.
async fn run_streaming(evaluator: Evaluator<ConnectProbe>, quiet: bool) -> CliResult<Outcome> {
    let spinner = (!quiet).then(output::probe_spinner);
    let evaluator = match &spinner {
        Some(pb) => evaluator.with_progress(pb.clone()),
        None => evaluator,
    };

    let mut write_err = None;
    let outcome = evaluator
        .run(|report| {
            let result = match &spinner {
                Some(pb) => pb.suspend(|| output::print_rule_report(report)),
                None => output::print_rule_report(report),
            };
            if let Err(e) = result {
                write_err.get_or_insert(e);
            }
        })
        .await;

    if let Some(e) = write_err {
        return Err(e.into());
    }

    if outcome == Outcome::NoApplicableRules {
        output::print_no_applicable_rules()?;
    }

    Ok(outcome)
}
