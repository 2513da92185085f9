//! Plain text output formatting.
//!
//! Produces human-readable output with colors.

use crate::evaluator::{ReportEvent, RuleReport};
use crate::services::service_for_port;
use crate::types::Rule;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::net::Ipv4Addr;
use std::time::Duration;

/// Announce the address rules are being matched against.
pub fn write_local_ip<W: Write>(out: &mut W, local_ip: Ipv4Addr) -> io::Result<()> {
    writeln!(out, "{}", style(format!("Local IP address: {}", local_ip)).cyan())?;
    writeln!(out)
}

/// Write the header and per-port lines for one rule.
pub fn write_rule_report<W: Write>(out: &mut W, report: &RuleReport) -> io::Result<()> {
    for event in report.events() {
        match event {
            ReportEvent::RuleHeader {
                note,
                applies_to_all,
            } => {
                writeln!(
                    out,
                    "{}",
                    style(format!("==== Checking rule: {} ====", note)).yellow()
                )?;
                if applies_to_all {
                    writeln!(out, "{}", style("(This rule applies to all hosts)").yellow())?;
                }
            }
            ReportEvent::Port(result) => {
                let target = format!("{}:{} ({})", result.destination, result.port, result.protocol);
                if result.success {
                    writeln!(
                        out,
                        "{}",
                        style(format!("✓ {} - Connection successful", target)).green()
                    )?;
                } else {
                    writeln!(
                        out,
                        "{}",
                        style(format!("✗ {} - Connection failed", target)).red()
                    )?;
                }
            }
            ReportEvent::NoApplicableRules => write_no_applicable_rules(out)?,
        }
    }
    writeln!(out)
}

pub fn write_no_applicable_rules<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{}",
        style("No applicable rules found for this host").red()
    )
}

/// List the rules that would be checked, without probing.
pub fn write_dry_run<'a, W, I>(out: &mut W, rules: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Rule>,
{
    let mut count = 0;
    for rule in rules {
        count += 1;
        writeln!(
            out,
            "{}",
            style(format!("==== Rule: {} ====", rule.note)).yellow()
        )?;
        if rule.applies_to_all() {
            writeln!(out, "{}", style("(This rule applies to all hosts)").yellow())?;
        }
        for spec in &rule.ports {
            let service = spec
                .resolve_port()
                .ok()
                .and_then(|p| service_for_port(p.as_u16()))
                .filter(|name| *name != spec.port)
                .map(|name| format!(" [{}]", name))
                .unwrap_or_default();
            writeln!(
                out,
                "  {} {}:{} ({}){}",
                style("•").dim(),
                rule.destination,
                spec.port,
                spec.protocol,
                style(service).dim()
            )?;
        }
        writeln!(out)?;
    }

    if count == 0 {
        write_no_applicable_rules(out)?;
    }
    Ok(count)
}

pub fn print_local_ip(local_ip: Ipv4Addr) -> io::Result<()> {
    write_local_ip(&mut io::stdout().lock(), local_ip)
}

pub fn print_rule_report(report: &RuleReport) -> io::Result<()> {
    write_rule_report(&mut io::stdout().lock(), report)
}

pub fn print_no_applicable_rules() -> io::Result<()> {
    write_no_applicable_rules(&mut io::stdout().lock())
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Spinner shown on stderr while a probe is in flight.
///
/// Hidden automatically when stderr is not a terminal.
pub fn probe_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(spinner);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::PortResult;
    use crate::types::{PortSpec, Protocol, Source};

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        console::strip_ansi_codes(&String::from_utf8(buf).unwrap()).into_owned()
    }

    fn result(port: &str, protocol: Protocol, success: bool) -> PortResult {
        PortResult {
            destination: "db.internal".to_string(),
            port: port.to_string(),
            protocol,
            success,
        }
    }

    #[test]
    fn test_rule_report_lines() {
        let report = RuleReport {
            note: "database".to_string(),
            applies_to_all: true,
            port_results: vec![
                result("5432", Protocol::Tcp, true),
                result("53", Protocol::Udp, false),
            ],
        };

        let text = render(|out| write_rule_report(out, &report));
        assert_eq!(
            text,
            "==== Checking rule: database ====\n\
             (This rule applies to all hosts)\n\
             ✓ db.internal:5432 (TCP) - Connection successful\n\
             ✗ db.internal:53 (UDP) - Connection failed\n\n"
        );
    }

    #[test]
    fn test_specific_rule_has_no_wildcard_line() {
        let report = RuleReport {
            note: "web".to_string(),
            applies_to_all: false,
            port_results: vec![],
        };
        let text = render(|out| write_rule_report(out, &report));
        assert!(!text.contains("applies to all hosts"));
    }

    #[test]
    fn test_local_ip_and_no_rules() {
        let text = render(|out| write_local_ip(out, Ipv4Addr::new(10, 0, 0, 5)));
        assert_eq!(text, "Local IP address: 10.0.0.5\n\n");

        let text = render(|out| write_no_applicable_rules(out));
        assert_eq!(text, "No applicable rules found for this host\n");
    }

    #[test]
    fn test_dry_run_lists_rules() {
        let rules = vec![Rule::new(
            Source::Universal,
            "proxy",
            vec![PortSpec::new("443", Protocol::Tcp), PortSpec::new("http", Protocol::Tcp)],
            "egress",
        )];

        let mut buf = Vec::new();
        let count = write_dry_run(&mut buf, &rules).unwrap();
        let text = console::strip_ansi_codes(&String::from_utf8(buf).unwrap()).into_owned();

        assert_eq!(count, 1);
        assert!(text.contains("==== Rule: egress ===="));
        assert!(text.contains("proxy:443 (TCP) [https]"));
        assert!(text.contains("proxy:http (TCP)\n"));
    }

    #[test]
    fn test_dry_run_empty() {
        let mut buf = Vec::new();
        let count = write_dry_run(&mut buf, std::iter::empty::<&Rule>()).unwrap();
        assert_eq!(count, 0);
        assert!(String::from_utf8(buf).unwrap().contains("No applicable rules"));
    }
}
