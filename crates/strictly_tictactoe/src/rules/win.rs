//! Win detection logic for tic-tac-toe.

use crate::{Board, Cell, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The eight winning triples, in priority order.
///
/// When several lines are complete at once, the first one listed wins.
pub const WINNING_LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// A completed line and the player who owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Win {
    /// The winning player.
    pub player: Player,
    /// The three cells of the line.
    pub line: [Position; 3],
}

/// Checks the board for a completed line.
///
/// Returns the first complete line in [`WINNING_LINES`] order, or `None`.
/// A full board without a line is not distinguished here; see
/// [`super::is_draw`].
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Option<Win> {
    WINNING_LINES.iter().find_map(|&line| {
        let [a, b, c] = line;
        match board.get(a) {
            Cell::Occupied(player)
                if board.get(b) == board.get(a) && board.get(c) == board.get(a) =>
            {
                Some(Win { player, line })
            }
            _ => None,
        }
    })
}
