//! Rule evaluation.
//!
//! Walks the rule set in file order, skips rules that do not apply to this
//! host and probes every declared port of the ones that do. Probing is
//! sequential: one rule at a time, one port at a time, so reports come out in
//! the order the rules and ports were written.

use crate::probe::Prober;
use crate::types::{Protocol, Rule, RuleSet};
use chrono::{DateTime, Utc};
use futures::stream::{self, Stream, StreamExt};
use indicatif::ProgressBar;
use serde::Serialize;
use std::net::Ipv4Addr;
use tracing::{debug, info};

/// Verdict for one declared port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortResult {
    pub destination: String,
    pub port: String,
    pub protocol: Protocol,
    pub success: bool,
}

/// Results for one applicable rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleReport {
    pub note: String,
    pub applies_to_all: bool,
    pub port_results: Vec<PortResult>,
}

impl RuleReport {
    /// Number of ports that could be reached.
    pub fn succeeded(&self) -> usize {
        self.port_results.iter().filter(|r| r.success).count()
    }

    /// Whether every declared port could be reached.
    pub fn all_succeeded(&self) -> bool {
        self.port_results.iter().all(|r| r.success)
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// This many rules applied and were checked.
    Checked(usize),
    /// No rule matched this host and none was universal.
    NoApplicableRules,
}

/// One event in the report stream, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportEvent<'a> {
    RuleHeader { note: &'a str, applies_to_all: bool },
    Port(&'a PortResult),
    NoApplicableRules,
}

impl RuleReport {
    /// Header event followed by one event per port.
    pub fn events(&self) -> impl Iterator<Item = ReportEvent<'_>> {
        std::iter::once(ReportEvent::RuleHeader {
            note: &self.note,
            applies_to_all: self.applies_to_all,
        })
        .chain(self.port_results.iter().map(ReportEvent::Port))
    }
}

/// Complete results of a run, for structured output.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub local_ip: Ipv4Addr,
    pub checked_at: DateTime<Utc>,
    pub reports: Vec<RuleReport>,
    pub no_applicable_rules: bool,
}

impl Evaluation {
    pub fn outcome(&self) -> Outcome {
        if self.reports.is_empty() {
            Outcome::NoApplicableRules
        } else {
            Outcome::Checked(self.reports.len())
        }
    }

    /// Every event of the run, in emission order.
    pub fn events(&self) -> Vec<ReportEvent<'_>> {
        if self.reports.is_empty() {
            return vec![ReportEvent::NoApplicableRules];
        }
        self.reports.iter().flat_map(|r| r.events()).collect()
    }
}

/// Checks a rule set from the point of view of one host.
pub struct Evaluator<P> {
    rule_set: RuleSet,
    local_ip: Ipv4Addr,
    prober: P,
    progress: Option<ProgressBar>,
}

impl<P: Prober> Evaluator<P> {
    pub fn new(rule_set: RuleSet, local_ip: Ipv4Addr, prober: P) -> Self {
        Self {
            rule_set,
            local_ip,
            prober,
            progress: None,
        }
    }

    /// Show the probe in flight on a spinner.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Rules that apply to this host, in file order.
    pub fn applicable_rules(&self) -> impl Iterator<Item = &Rule> {
        self.rule_set.applicable(self.local_ip)
    }

    /// Lazily check each applicable rule.
    ///
    /// Nothing is probed until the stream is polled, and each rule is fully
    /// probed before the next one starts.
    pub fn evaluate(&self) -> impl Stream<Item = RuleReport> + '_ {
        stream::iter(self.applicable_rules()).then(move |rule| self.check_rule(rule))
    }

    /// Probe every declared port of a rule, in order.
    pub async fn check_rule(&self, rule: &Rule) -> RuleReport {
        debug!(note = %rule.note, destination = %rule.destination, "checking rule");

        let mut port_results = Vec::with_capacity(rule.ports.len());
        for spec in &rule.ports {
            if let Some(pb) = &self.progress {
                pb.set_message(format!("{}:{} ({})", rule.destination, spec.port, spec.protocol));
                pb.tick();
            }

            let success = self.prober.probe_spec(&rule.destination, spec).await;
            port_results.push(PortResult {
                destination: rule.destination.clone(),
                port: spec.port.clone(),
                protocol: spec.protocol.clone(),
                success,
            });
        }

        RuleReport {
            note: rule.note.clone(),
            applies_to_all: rule.applies_to_all(),
            port_results,
        }
    }

    /// Drive the evaluation, handing each report to `sink` as it completes.
    pub async fn run<F>(&self, mut sink: F) -> Outcome
    where
        F: FnMut(&RuleReport),
    {
        let reports = self.evaluate();
        futures::pin_mut!(reports);

        let mut checked = 0;
        while let Some(report) = reports.next().await {
            checked += 1;
            sink(&report);
        }

        if let Some(pb) = &self.progress {
            pb.finish_and_clear();
        }

        info!(local_ip = %self.local_ip, checked, total = self.rule_set.len(), "evaluation complete");

        if checked == 0 {
            Outcome::NoApplicableRules
        } else {
            Outcome::Checked(checked)
        }
    }

    /// Run to completion and gather every report.
    pub async fn collect(&self) -> Evaluation {
        let mut reports = Vec::new();
        self.run(|report| reports.push(report.clone())).await;

        Evaluation {
            local_ip: self.local_ip,
            checked_at: Utc::now(),
            no_applicable_rules: reports.is_empty(),
            reports,
        }
    }
}
