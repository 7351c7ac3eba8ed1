//! Recording validation command implementation.

use super::CliError;
use memgrid::game::check_invariants;
use memgrid::replay::{Recording, ReplayEngine};
use std::path::PathBuf;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the recording cannot be loaded or violates an
/// invariant during replay.
pub(crate) fn execute(recording: PathBuf) -> Result<(), CliError> {
    println!("Validating: {}", recording.display());
    println!();

    let loaded = Recording::load(&recording)?;
    print_check("Recording parses", true);

    let unknown_players = loaded
        .rounds
        .iter()
        .flatten()
        .filter(|c| {
            usize::try_from(c.player)
                .ok()
                .is_none_or(|id| id >= loaded.players.len())
        })
        .count();

    let rounds = loaded.round_count();
    let mut engine = ReplayEngine::new(loaded)?;
    print_check("Initial grid accepted", true);

    while !engine.is_finished() {
        engine.step_forward_unchecked()?;
        let violations = check_invariants(engine.game());
        if !violations.is_empty() {
            print_check("Invariants hold", false);
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            return Err(CliError::new(format!(
                "round {}: {}",
                engine.round() - 1,
                messages.join("; ")
            )));
        }
    }
    print_check("Invariants hold", true);

    println!();
    println!("Summary:");
    println!("  Rounds:            {rounds}");
    println!("  Players:           {}", engine.game().players.len());
    println!("  Unknown commands:  {unknown_players} (dropped during resolution)");
    println!();
    println!("Validation successful!");

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
