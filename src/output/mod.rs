//! Output formatting module.
//!
//! Provides formatters for plain text, JSON, and CSV output of evaluation
//! results. Plain output is streamed rule by rule; JSON and CSV are written
//! once the run completes.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::write_csv;
pub use json_format::write_json;
pub use plain::{
    print_error, print_local_ip, print_no_applicable_rules, print_rule_report, probe_spinner,
    write_dry_run, write_local_ip, write_no_applicable_rules, write_rule_report,
};

use crate::evaluator::Evaluation;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Coloured human-readable lines
    #[default]
    Plain,
    /// JSON structured output
    Json,
    /// CSV format, one row per port
    Csv,
}

impl OutputFormat {
    /// Whether results are printed as they arrive rather than at the end.
    pub fn is_streaming(self) -> bool {
        matches!(self, Self::Plain)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Write a completed evaluation in one of the batch formats.
///
/// Plain output is handled incrementally by the caller; passing it here
/// replays every report.
pub fn write_evaluation<W: Write>(
    out: &mut W,
    evaluation: &Evaluation,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Plain => {
            write_local_ip(out, evaluation.local_ip)?;
            for report in &evaluation.reports {
                write_rule_report(out, report)?;
            }
            if evaluation.no_applicable_rules {
                write_no_applicable_rules(out)?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json(out, evaluation),
        OutputFormat::Csv => write_csv(out, evaluation).map_err(io::Error::other),
    }
}

/// Report outcomes the batch format itself cannot carry.
///
/// A CSV run with no applicable rules is a bare header row, so the outcome is
/// written to `err` instead. JSON records it in `no_applicable_rules`.
pub fn write_outcome_notice<W: Write>(
    err: &mut W,
    evaluation: &Evaluation,
    format: OutputFormat,
) -> io::Result<()> {
    if format == OutputFormat::Csv && evaluation.no_applicable_rules {
        write_no_applicable_rules(err)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::net::Ipv4Addr;

    fn empty_evaluation() -> Evaluation {
        Evaluation {
            local_ip: Ipv4Addr::new(10, 0, 0, 5),
            checked_at: Utc::now(),
            reports: Vec::new(),
            no_applicable_rules: true,
        }
    }

    #[test]
    fn test_csv_notes_no_applicable_rules() {
        let mut err = Vec::new();
        write_outcome_notice(&mut err, &empty_evaluation(), OutputFormat::Csv).unwrap();
        let text = String::from_utf8(err).unwrap();
        assert!(text.contains("No applicable rules found for this host"));
    }

    #[test]
    fn test_json_needs_no_notice() {
        let mut err = Vec::new();
        write_outcome_notice(&mut err, &empty_evaluation(), OutputFormat::Json).unwrap();
        assert!(err.is_empty());
    }

    #[test]
    fn test_csv_with_results_needs_no_notice() {
        let mut evaluation = empty_evaluation();
        evaluation.no_applicable_rules = false;

        let mut err = Vec::new();
        write_outcome_notice(&mut err, &evaluation, OutputFormat::Csv).unwrap();
        assert!(err.is_empty());
    }
}
