//! Output formatting utilities for CLI.

// Allow format! with push_str for readability
#![allow(clippy::format_push_string)]

use memgrid::game::{PlayerScore, Response, ResponseKind};
use memgrid::replay::ReplayEngine;
use serde::Serialize;

/// JSON-serializable replay result.
#[derive(Debug, Serialize)]
pub(super) struct JsonGameResult<'a> {
    /// Rounds replayed.
    pub(super) rounds_played: usize,
    /// Advisory round limit.
    pub(super) total_rounds: u32,
    /// Responses of every replayed round.
    pub(super) rounds: Vec<&'a [Response]>,
    /// Final scores, in registration order.
    pub(super) scores: Vec<PlayerScore>,
}

impl<'a> JsonGameResult<'a> {
    /// Create from a replay engine.
    pub(super) fn from_engine(engine: &'a ReplayEngine) -> Self {
        Self {
            rounds_played: engine.round(),
            total_rounds: engine.recording().total_rounds,
            rounds: (0..engine.round())
                .filter_map(|round| engine.responses(round))
                .collect(),
            scores: engine.scores(),
        }
    }
}

/// One-line summary of a response.
pub(super) fn describe_response(response: &Response, name: &str) -> String {
    match &response.kind {
        ResponseKind::Stats(report) => format!(
            "{name}: stats free={} allocated={} corrupt={} fortified={} system={} owned={} remaining={}",
            report.free_cells,
            report.allocated_cells,
            report.corrupt_cells,
            report.fortified_cells,
            report.system_cells,
            report.owned_cells,
            report.rounds_remaining
        ),
        ResponseKind::Scan(report) if report.is_out_of_bounds() => {
            format!("{name}: scan out of bounds")
        }
        ResponseKind::Scan(report) => format!("{name}: scan @{} {:?}", report.cell, report.states),
        ResponseKind::Success { cells } => format!("{name}: success {cells:?}"),
    }
}

/// Format a finished replay as human-readable text.
pub(super) fn format_text(engine: &ReplayEngine) -> String {
    let game = engine.game();
    let name_of = |id| game.get_player(id).map_or("unknown", |p| p.name.as_str());
    let mut output = String::new();

    for round in 0..engine.round() {
        output.push_str(&format!("Round {round}\n"));
        for response in engine.responses(round).unwrap_or_default() {
            output.push_str(&format!(
                "  {}\n",
                describe_response(response, name_of(response.player))
            ));
        }
    }
    output.push('\n');

    output.push_str(&game.visualize());
    output.push('\n');
    output.push_str(&format_scores(&engine.scores()));
    output
}

/// Format a score table.
pub(super) fn format_scores(scores: &[PlayerScore]) -> String {
    let mut output = String::from("Scores:\n");
    for score in scores {
        output.push_str(&format!(
            "  {}: {} points ({} cells, {} fortified, {} blocks)\n",
            score.name,
            score.total_score,
            score.owned_cells,
            score.fortified_cells,
            score.owned_blocks
        ));
    }
    output
}
