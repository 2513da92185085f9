//! Rule file loading.
//!
//! The rule file is read once at start-up. Any problem reading or parsing it
//! aborts the run before a single probe is sent.

use crate::error::{ConfigError, ConfigResult};
use crate::types::RuleSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default rule file, relative to the working directory.
pub const DEFAULT_RULES_FILE: &str = "config.json";

/// Load a rule set from a JSON file.
pub fn load_rule_set(path: impl AsRef<Path>) -> ConfigResult<RuleSet> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let rule_set = parse_rule_set(&content)?;
    debug!(path = %path.display(), rules = rule_set.len(), "loaded rule set");
    Ok(rule_set)
}

/// Parse a rule set from JSON text.
pub fn parse_rule_set(content: &str) -> ConfigResult<RuleSet> {
    serde_json::from_str(content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
}
