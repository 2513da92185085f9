//! Port and protocol types.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535).
//! `PortSpec` is one declared check: a port, as written in the rule file, and
//! the transport to use.

use super::null_as_default;
use crate::services::port_for_service;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated network port number (1-65535).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;
    /// Maximum valid port number.
    pub const MAX: u16 = 65535;

    /// Create a new Port from a u16, returning None if invalid.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Port {
    type Error = PortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(PortError::OutOfRange(value))
    }
}

/// Parses either a decimal port number or a well-known service name.
impl FromStr for Port {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PortError::Empty);
        }

        if s.bytes().all(|b| b.is_ascii_digit()) {
            let n: u16 = s
                .parse()
                .map_err(|_| PortError::InvalidFormat(s.to_string()))?;
            return Self::try_from(n);
        }

        port_for_service(s)
            .and_then(Self::new)
            .ok_or_else(|| PortError::UnknownService(s.to_string()))
    }
}

/// Error type for port parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(u16),
    #[error("invalid port number: {0}")]
    InvalidFormat(String),
    #[error("unknown service name: {0}")]
    UnknownService(String),
    #[error("empty port specification")]
    Empty,
}

/// Transport used for a reachability check.
///
/// Rule files spell these exactly `"TCP"` and `"UDP"`. Anything else is kept
/// verbatim as `Unsupported` so the rule still loads and the check reports a
/// failure instead of aborting the run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Protocol {
    Tcp,
    Udp,
    Unsupported(String),
}

impl Protocol {
    /// Whether a probe can be attempted with this protocol at all.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }
}

impl Default for Protocol {
    /// A missing protocol is an empty, unsupported one.
    fn default() -> Self {
        Self::Unsupported(String::new())
    }
}

impl From<String> for Protocol {
    fn from(s: String) -> Self {
        match s.as_str() {
            "TCP" => Self::Tcp,
            "UDP" => Self::Udp,
            _ => Self::Unsupported(s),
        }
    }
}

impl From<&str> for Protocol {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<Protocol> for String {
    fn from(protocol: Protocol) -> Self {
        match protocol {
            Protocol::Tcp => "TCP".to_string(),
            Protocol::Udp => "UDP".to_string(),
            Protocol::Unsupported(s) => s,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp => write!(f, "TCP"),
            Self::Udp => write!(f, "UDP"),
            Self::Unsupported(s) => write!(f, "{}", s),
        }
    }
}

/// One declared check within a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSpec {
    /// Port as written in the rule file: a number or a service name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub port: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub protocol: Protocol,
}

impl PortSpec {
    pub fn new(port: impl Into<String>, protocol: Protocol) -> Self {
        Self {
            port: port.into(),
            protocol,
        }
    }

    /// Resolve the declared port to a number.
    pub fn resolve_port(&self) -> Result<Port, PortError> {
        self.port.parse()
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.port, self.protocol)
    }
}
