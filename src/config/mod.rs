//! Configuration management for portpecker.
//!
//! Two sources: the rule file named on the command line, and optional
//! XDG-located application settings.

mod loader;
mod settings;

pub use loader::{load_rule_set, parse_rule_set, DEFAULT_RULES_FILE};
pub use settings::{AppSettings, Paths};
