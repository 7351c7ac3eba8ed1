//! Run command implementation.

use super::output::{format_text, JsonGameResult};
use super::{CliError, OutputFormat};
use memgrid::game::RuleConfig;
use memgrid::replay::{Recording, ReplayEngine};
use std::path::PathBuf;
use tracing::info;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the recording or rules cannot be loaded or replayed.
pub(crate) fn execute(
    recording: PathBuf,
    format: OutputFormat,
    round: Option<usize>,
    rules: Option<PathBuf>,
) -> Result<(), CliError> {
    let mut loaded = Recording::load(&recording)?;
    if let Some(rules_path) = rules {
        loaded.rules = RuleConfig::load(&rules_path)?;
        info!(path = %rules_path.display(), "rules overridden");
    }

    let recorded = loaded.round_count();
    let mut engine = ReplayEngine::new(loaded)?;
    match round {
        Some(round) => engine.seek(round)?,
        None => engine.run_to_end()?,
    }
    info!(rounds = engine.round(), recorded, "replay finished");

    match format {
        OutputFormat::Text => {
            print!("{}", format_text(&engine));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonGameResult::from_engine(&engine))?;
            println!("{json}");
        }
    }

    Ok(())
}
