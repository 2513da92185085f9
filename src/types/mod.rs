//! Core type definitions for rules and the ports they declare.
//!
//! Sum types and newtypes keep invalid states out of the evaluator: a rule
//! source is either specific or universal, never a magic string.

mod port;
mod rule;

pub use port::{Port, PortError, PortSpec, Protocol};
pub use rule::{Rule, RuleSet, Source};

use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` like a missing field: the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
