//! Generate command implementation.

use super::CliError;
use memgrid::mapgen::{generate_grid, GridGenConfig};

/// Execute the generate command.
///
/// # Errors
///
/// Returns an error if the parameters are rejected.
pub(crate) fn execute(
    cells: usize,
    seed: Option<u64>,
    system: f64,
    corrupt: f64,
) -> Result<(), CliError> {
    // Generate seed if not provided
    let seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() ^ u64::from(d.subsec_nanos()))
            .unwrap_or(42)
    });
    tracing::info!(seed, cells, "generating grid");

    let config = GridGenConfig {
        system_ratio: system,
        corrupt_ratio: corrupt,
    };
    let grid = generate_grid(seed, cells, &config)?;
    println!("{}", serde_json::to_string(&grid)?);

    Ok(())
}
