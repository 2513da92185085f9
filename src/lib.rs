//! # portpecker - Network Reachability Rule Checker
//!
//! portpecker reads a list of reachability rules and, for every rule that
//! applies to the machine it runs on, tries to open a connection to each
//! declared destination port.
//!
//! ## Rules
//!
//! A rule has a `source` (an IPv4 address, or `*` for every host), a
//! `destination`, a list of `{port, protocol}` checks and a free-text `note`.
//! A rule applies when its source is exactly this host's primary IPv4 address
//! or is the wildcard.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portpecker::config::load_rule_set;
//! use portpecker::evaluator::Evaluator;
//! use portpecker::identity::resolve_local_ipv4;
//! use portpecker::probe::ConnectProbe;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let local_ip = resolve_local_ipv4()?;
//!     let rules = load_rule_set("config.json")?;
//!
//!     let evaluator = Evaluator::new(rules, local_ip, ConnectProbe::default());
//!     evaluator
//!         .run(|report| println!("{}: {}/{} reachable", report.note, report.succeeded(), report.port_results.len()))
//!         .await;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`identity`] - Local IPv4 address resolution
//! - [`types`] - Rules, sources, ports and protocols
//! - [`probe`] - Timeout-bounded TCP and UDP connection probes
//! - [`evaluator`] - Rule selection and sequential probing
//! - [`config`] - Rule file loading and application settings
//! - [`output`] - Plain, JSON and CSV formatters
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod identity;
pub mod output;
pub mod probe;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ConfigError, IdentityError};
pub use evaluator::{Evaluation, Evaluator, Outcome, PortResult, ReportEvent, RuleReport};
pub use probe::{ConnectProbe, Prober};
pub use types::{Port, PortSpec, Protocol, Rule, RuleSet, Source};
