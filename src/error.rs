//! Error types for portpecker.
//!
//! Uses `thiserror` for ergonomic error definitions. Per-port probe failures
//! are not represented here: they collapse to `success: false`.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to determine the address this host checks rules as.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("no suitable IP address found")]
    NoSuitableAddress,

    #[error("invalid local IP override '{0}': expected an IPv4 address")]
    InvalidOverride(String),
}

/// Errors loading the rule set or application settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid configuration format: {0}")]
    InvalidFormat(String),

    #[error("could not determine configuration directory")]
    DirectoryNotFound,
}

/// Top-level error for the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("getting local IP: {0}")]
    Identity(#[from] IdentityError),

    #[error("loading config: {0}")]
    Config(#[from] ConfigError),

    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type alias for identity resolution.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
