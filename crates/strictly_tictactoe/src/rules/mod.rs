//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating a board snapshot.
//! Rules are separated from history storage so the session can derive
//! the outcome from whichever step is current.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{WINNING_LINES, Win, evaluate};

use crate::Board;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Outcome of a board, derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// No winner and at least one empty cell.
    InProgress,
    /// A player completed a line.
    Won(Win),
    /// All nine cells filled with no winner.
    Draw,
}

impl Outcome {
    /// Derives the outcome of `board`.
    #[instrument(skip(board))]
    pub fn of(board: &Board) -> Self {
        match evaluate(board) {
            Some(win) => Outcome::Won(win),
            None if is_full(board) => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }

    /// Returns the win, if any.
    pub fn win(&self) -> Option<&Win> {
        match self {
            Outcome::Won(win) => Some(win),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Position};

    #[test]
    fn test_outcome_in_progress() {
        assert_eq!(Outcome::of(&Board::new()), Outcome::InProgress);
    }

    #[test]
    fn test_outcome_won() {
        let board = Board::new()
            .with_mark(Position::TopRight, Player::O)
            .with_mark(Position::Center, Player::O)
            .with_mark(Position::BottomLeft, Player::O);
        let outcome = Outcome::of(&board);
        assert_eq!(outcome.win().map(|w| w.player), Some(Player::O));
    }
}
