//! Errors raised at the session's input boundary.

use derive_more::{Display, Error};

/// Input rejected before it reaches the game state.
///
/// Illegal moves are not errors; see [`crate::Placement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    /// A cell index outside `0..=8`.
    #[display("Cell index {} is outside the board (0-8)", _0)]
    PositionOutOfRange(#[error(not(source))] usize),

    /// A history step that does not exist.
    #[display("Step {} does not exist (history has {} steps)", step, len)]
    StepOutOfRange {
        /// Requested step.
        step: usize,
        /// Current history length.
        len: usize,
    },
}
