//! Rule and rule set types.
//!
//! A rule names a source host, a destination and the ports that should be
//! reachable between them. The source is either one specific address or the
//! wildcard `*`, which applies to every host.

use super::null_as_default;
use super::port::PortSpec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// Who a rule applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Source {
    /// A single host, identified by its address as written in the rule file.
    Specific(String),
    /// Every host (`*`).
    Universal,
}

impl Source {
    /// Literal used in rule files for a universal source.
    pub const WILDCARD: &'static str = "*";

    /// Whether this source selects the given local address.
    ///
    /// Specific sources are compared as text against the dotted-quad form of
    /// `local_ip`. No CIDR or hostname matching is performed.
    pub fn matches(&self, local_ip: Ipv4Addr) -> bool {
        match self {
            Self::Universal => true,
            Self::Specific(addr) => *addr == local_ip.to_string(),
        }
    }
}

impl From<String> for Source {
    fn from(s: String) -> Self {
        if s == Self::WILDCARD {
            Self::Universal
        } else {
            Self::Specific(s)
        }
    }
}

impl From<Source> for String {
    fn from(source: Source) -> Self {
        match source {
            Source::Specific(s) => s,
            Source::Universal => Source::WILDCARD.to_string(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Specific(s) => write!(f, "{}", s),
            Self::Universal => write!(f, "{}", Self::WILDCARD),
        }
    }
}

impl Default for Source {
    /// An empty specific source, which never matches a local address.
    fn default() -> Self {
        Self::Specific(String::new())
    }
}

/// Shape of a rule as it appears in the rule file.
///
/// Missing or `null` fields take their empty value, so a partial rule still
/// loads; it simply never applies or never reaches anything.
#[derive(Deserialize)]
struct RuleDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    source: Source,
    #[serde(default, deserialize_with = "null_as_default")]
    destination: String,
    #[serde(default, deserialize_with = "null_as_default")]
    ports: Vec<PortSpec>,
    #[serde(default, deserialize_with = "null_as_default")]
    note: String,
}

/// A reachability rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RuleDocument")]
pub struct Rule {
    pub source: Source,
    pub destination: String,
    pub ports: Vec<PortSpec>,
    pub note: String,
    /// Derived once from `source` when the rule is built.
    #[serde(skip_serializing)]
    applies_to_all: bool,
}

impl Rule {
    pub fn new(
        source: Source,
        destination: impl Into<String>,
        ports: Vec<PortSpec>,
        note: impl Into<String>,
    ) -> Self {
        let applies_to_all = source == Source::Universal;
        Self {
            source,
            destination: destination.into(),
            ports,
            note: note.into(),
            applies_to_all,
        }
    }

    /// True iff the rule's source is the wildcard.
    #[inline]
    pub fn applies_to_all(&self) -> bool {
        self.applies_to_all
    }

    /// Whether the rule should be checked from a host with this address.
    pub fn applies_to(&self, local_ip: Ipv4Addr) -> bool {
        self.applies_to_all || self.source.matches(local_ip)
    }
}

impl From<RuleDocument> for Rule {
    fn from(doc: RuleDocument) -> Self {
        Self::new(doc.source, doc.destination, doc.ports, doc.note)
    }
}

/// The full set of rules, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default, deserialize_with = "null_as_default")]
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules that apply to the given host, in file order.
    pub fn applicable(&self, local_ip: Ipv4Addr) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |r| r.applies_to(local_ip))
    }
}
