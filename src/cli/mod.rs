//! Command-line interface definitions for portpecker.
//!
//! Uses `clap` derive macros for declarative argument parsing:
//! `portpecker [CONFIG]` checks every rule in `CONFIG` (default
//! `config.json`) that applies to this host.

mod check;

pub use check::execute;

use crate::config::DEFAULT_RULES_FILE;
use crate::output::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Check that declared network reachability rules hold from this host.
///
/// Each rule names a source host, a destination and a list of ports. Rules
/// whose source is this host's IPv4 address, or `*`, are checked by opening
/// a connection to every listed port.
#[derive(Parser, Debug)]
#[command(name = "portpecker")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Verify network reachability rules from this host", long_about = None)]
pub struct Cli {
    /// Rule file to check
    #[arg(value_name = "CONFIG", default_value = DEFAULT_RULES_FILE)]
    pub config: PathBuf,

    /// Output format for results
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Connection timeout in milliseconds
    #[arg(short = 't', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Match rules against this address instead of the detected one
    #[arg(long, value_name = "IPV4", env = "PORTPECKER_LOCAL_IP")]
    pub local_ip: Option<String>,

    /// List applicable rules without probing
    #[arg(long)]
    pub dry_run: bool,

    /// Path to an application settings file
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress the progress spinner
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Default log filter for the chosen verbosity.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}
