//! Tunable command limits.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default cap on cells for `Allocate`, `Free` and `Recover`.
pub const DEFAULT_MAX_CELLS_PER_COMMAND: usize = 2;

/// Argument limits applied by the command executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleConfig {
    /// Maximum cells named by one `Allocate`, `Free` or `Recover`.
    pub max_cells_per_command: usize,
    /// Maximum cells named by one `Fortify` (`None` = unbounded).
    pub fortify_cell_cap: Option<usize>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            max_cells_per_command: DEFAULT_MAX_CELLS_PER_COMMAND,
            fortify_cell_cap: None,
        }
    }
}

impl RuleConfig {
    /// Parse rules from a JSON document. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or names unknown fields.
    pub fn from_json_str(json: &str) -> Result<Self, RulesError> {
        serde_json::from_str(json).map_err(|e| RulesError::Parse(e.to_string()))
    }

    /// Load rules from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, RulesError> {
        let json = std::fs::read_to_string(path).map_err(|e| RulesError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&json)
    }

    /// Check if a `Fortify` naming `count` cells is within the cap.
    #[must_use]
    pub fn fortify_allows(&self, count: usize) -> bool {
        self.fortify_cell_cap.is_none_or(|cap| count <= cap)
    }
}

/// Error loading a rule file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// The file could not be read.
    Io {
        /// Path that failed.
        path: String,
        /// Underlying I/O error.
        reason: String,
    },
    /// The JSON did not describe a valid rule set.
    Parse(String),
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, reason } => write!(f, "failed to read rules from {path}: {reason}"),
            Self::Parse(reason) => write!(f, "failed to parse rules: {reason}"),
        }
    }
}

impl std::error::Error for RulesError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rules = RuleConfig::default();
        assert_eq!(rules.max_cells_per_command, 2);
        assert!(rules.fortify_allows(1_000));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let rules = RuleConfig::from_json_str(r#"{"fortify_cell_cap": 2}"#).unwrap();
        assert_eq!(rules.max_cells_per_command, 2);
        assert!(rules.fortify_allows(2));
        assert!(!rules.fortify_allows(3));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = RuleConfig::from_json_str(r#"{"max_cells": 3}"#).unwrap_err();
        assert!(matches!(err, RulesError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = RuleConfig::load(Path::new("/nonexistent/rules.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/rules.json"));
    }
}
