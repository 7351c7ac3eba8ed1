//! Plain-text board dump for debugging and CLI output.

// Allow format! with push_str for readability
#![allow(clippy::format_push_string)]

use crate::game::{Game, Grid, BLOCK_SIZE};

/// Render the board of a game.
///
/// Output format:
/// ```text
/// === ROUND 3 OF 10 ===
/// Cells: 8 (free 3, allocated 2, corrupt 1, fortified 1, system 1)
///
/// block 0 @ 0000: # A:alice A:alice F:bob
/// block 1 @ 0004: . . . X
///
/// Legend: .=Free  A=Allocated  X=Corrupt  F=Fortified  #=System
/// ```
#[must_use]
pub fn render_grid(game: &Game) -> String {
    let mut output = String::new();

    let Some(board) = game.board() else {
        output.push_str("=== NOT STARTED ===\n");
        output.push_str(&format!("Players registered: {}\n", game.players.len()));
        return output;
    };

    output.push_str(&format!(
        "=== ROUND {} OF {} ===\n",
        board.round, board.total_rounds
    ));
    render_counts(&mut output, &board.grid);
    output.push('\n');

    for (block, start) in (0..board.grid.len()).step_by(BLOCK_SIZE).enumerate() {
        output.push_str(&format!("block {block} @ {start:04}:"));
        for index in start..start + BLOCK_SIZE {
            output.push(' ');
            render_cell(&mut output, game, &board.grid, index);
        }
        output.push('\n');
    }

    output.push_str("\nLegend: .=Free  A=Allocated  X=Corrupt  F=Fortified  #=System\n");
    output
}

fn render_counts(output: &mut String, grid: &Grid) {
    let counts = grid.state_counts();
    output.push_str(&format!(
        "Cells: {} (free {}, allocated {}, corrupt {}, fortified {}, system {})\n",
        grid.len(),
        counts.free,
        counts.allocated,
        counts.corrupt,
        counts.fortified,
        counts.system
    ));
}

fn render_cell(output: &mut String, game: &Game, grid: &Grid, index: usize) {
    let Some(state) = grid.state(index) else {
        output.push('?');
        return;
    };
    output.push(state.glyph());

    if let Some(owner) = grid.owner(index) {
        output.push(':');
        match game.get_player(owner) {
            Some(player) => output.push_str(&player.name),
            None => output.push_str(&format!("P{owner}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CellState, Command};

    #[test]
    fn test_render_unstarted() {
        let mut game = Game::new();
        game.register_player("alice");
        let text = render_grid(&game);
        assert!(text.contains("NOT STARTED"));
        assert!(text.contains("Players registered: 1"));
    }

    #[test]
    fn test_render_blocks_and_owners() {
        let mut game = Game::new();
        let alice = game.register_player("alice").id();
        let mut cells = vec![CellState::Free; 8];
        cells[0] = CellState::System;
        game.start_game(cells, 10).unwrap();
        game.resolve_round(&[Command::allocate(alice, [1, 2])]).unwrap();

        let text = render_grid(&game);
        assert!(text.contains("=== ROUND 1 OF 10 ==="));
        assert!(text.contains("block 0 @ 0000: # A:alice A:alice ."));
        assert!(text.contains("block 1 @ 0004: . . . ."));
        assert!(text.contains("system 1"));
    }
}
