//! CLI command implementations for memgrid.

pub(crate) mod generate;
pub(crate) mod run;
pub(crate) mod validate;

mod output;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<memgrid::replay::ReplayError> for CliError {
    fn from(e: memgrid::replay::ReplayError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<memgrid::game::RulesError> for CliError {
    fn from(e: memgrid::game::RulesError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<memgrid::mapgen::GridGenError> for CliError {
    fn from(e: memgrid::mapgen::GridGenError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}
