//! Game session with a linear, time-travelling move history.
//!
//! A [`Session`] owns every board snapshot produced so far. Jumping to an
//! earlier step only moves the step pointer; the steps after it are
//! discarded the next time a mark is placed.

use crate::invariants::{InvariantSet, SessionInvariants};
use crate::{Board, Coords, Outcome, Player, Position, SessionError};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Display order of the move history.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Oldest step first.
    #[default]
    #[strum(serialize = "ASC")]
    Ascending,
    /// Newest step first.
    #[strum(serialize = "DESC")]
    Descending,
}

impl SortDirection {
    /// Returns the other direction.
    pub fn opposite(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// One immutable snapshot in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    board: Board,
    coords: Option<Coords>,
}

impl Step {
    /// The step before any move: empty board, no coordinates.
    pub fn initial() -> Self {
        Self {
            board: Board::new(),
            coords: None,
        }
    }

    /// Derives the step produced by `player` marking `pos`.
    pub fn after(&self, pos: Position, player: Player) -> Self {
        Self {
            board: self.board.with_mark(pos, player),
            coords: Some(Coords::from(pos)),
        }
    }

    /// Board at this step.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Coordinates of the move that produced this step.
    pub fn coords(&self) -> Option<Coords> {
        self.coords
    }
}

/// What happened to a requested mark.
///
/// Only `Placed` changes the session; the others are silent no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Placement {
    /// The mark was placed and a step appended.
    #[display("placed")]
    Placed,
    /// The target cell already holds a mark.
    #[display("cell occupied")]
    Occupied,
    /// The current board already has a winner.
    #[display("game over")]
    GameOver,
}

/// A single game and its history.
///
/// The outcome is cached and recomputed from the committed current step
/// after every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    history: Vec<Step>,
    current_step: usize,
    next_player: Player,
    sort_direction: SortDirection,
    outcome: Outcome,
}

impl Session {
    /// Creates a session at the initial step with ascending history.
    #[instrument]
    pub fn new() -> Self {
        Self::with_sort_direction(SortDirection::default())
    }

    /// Creates a session whose history starts in the given order.
    #[instrument]
    pub fn with_sort_direction(sort_direction: SortDirection) -> Self {
        Self {
            history: vec![Step::initial()],
            current_step: 0,
            next_player: Player::X,
            sort_direction,
            outcome: Outcome::InProgress,
        }
    }

    /// Builds a session by placing each mark in turn.
    ///
    /// Ignored moves are skipped exactly as [`Session::place_mark`] skips them.
    #[instrument(skip(moves), fields(count = moves.len()))]
    pub fn replay(moves: &[Position]) -> Self {
        let mut session = Self::new();
        for &pos in moves {
            session.place_mark(pos);
        }
        session
    }

    /// All recorded steps, oldest first.
    pub fn history(&self) -> &[Step] {
        &self.history
    }

    /// Index of the step being shown.
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// The step being shown.
    pub fn current(&self) -> &Step {
        &self.history[self.current_step]
    }

    /// Board of the step being shown.
    pub fn board(&self) -> &Board {
        self.current().board()
    }

    /// Player whose mark the next placement uses.
    pub fn next_player(&self) -> Player {
        self.next_player
    }

    /// Current display order of the history.
    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Outcome of the current step.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Places the next player's mark at `pos`.
    ///
    /// Steps after the current one are discarded before the new step is
    /// appended.
    #[instrument(skip(self), fields(step = self.current_step, player = %self.next_player))]
    pub fn place_mark(&mut self, pos: Position) -> Placement {
        if self.outcome.win().is_some() {
            debug!("Ignoring move, game already won");
            return Placement::GameOver;
        }
        if !self.board().is_empty(pos) {
            debug!("Ignoring move, cell occupied");
            return Placement::Occupied;
        }

        let step = self.current().after(pos, self.next_player);
        self.history.truncate(self.current_step + 1);
        self.history.push(step);
        self.current_step = self.history.len() - 1;
        self.next_player = self.next_player.opponent();
        self.refresh();

        debug!(history_len = self.history.len(), outcome = ?self.outcome, "Mark placed");
        Placement::Placed
    }

    /// Moves the step pointer without touching the history.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::StepOutOfRange`] if `step` was never recorded.
    #[instrument(skip(self))]
    pub fn jump_to(&mut self, step: usize) -> Result<(), SessionError> {
        if step >= self.history.len() {
            return Err(SessionError::StepOutOfRange {
                step,
                len: self.history.len(),
            });
        }

        self.current_step = step;
        self.next_player = Player::for_mark_count(step);
        self.refresh();

        debug!(next_player = %self.next_player, "Jumped to step");
        Ok(())
    }

    /// Flips the history display order.
    #[instrument(skip(self))]
    pub fn toggle_sort_direction(&mut self) {
        self.sort_direction = self.sort_direction.opposite();
        debug!(sort_direction = ?self.sort_direction, "Sort direction toggled");
    }

    /// Status line for the current step.
    pub fn status_text(&self) -> String {
        match self.outcome {
            Outcome::Won(win) => format!("Winner: {}", win.player),
            _ if self.current_step == 9 => "It is a draw!".to_string(),
            _ => format!("Next player: {}", self.next_player),
        }
    }

    fn refresh(&mut self) {
        self.outcome = Outcome::of(self.board());
        debug_assert!(
            SessionInvariants::check_all(self).is_ok(),
            "session invariants violated: {:?}",
            SessionInvariants::check_all(self)
        );
    }

    #[cfg(test)]
    pub(crate) fn history_mut(&mut self) -> &mut Vec<Step> {
        &mut self.history
    }

    #[cfg(test)]
    pub(crate) fn set_next_player(&mut self, player: Player) {
        self.next_player = player;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Position::*;

    #[test]
    fn test_new_session() {
        let session = Session::new();
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.current_step(), 0);
        assert_eq!(session.next_player(), Player::X);
        assert_eq!(session.current().coords(), None);
        assert_eq!(session.status_text(), "Next player: X");
    }

    #[test]
    fn test_place_records_coords() {
        let mut session = Session::new();
        assert_eq!(session.place_mark(MiddleRight), Placement::Placed);
        assert_eq!(session.current().coords(), Some(Coords::new(1, 2)));
    }

    #[test]
    fn test_game_over_blocks_moves() {
        let mut session = Session::replay(&[TopLeft, MiddleLeft, TopCenter, Center, TopRight]);
        assert_eq!(session.place_mark(BottomRight), Placement::GameOver);
        assert_eq!(session.history().len(), 6);
    }

    #[test]
    fn test_jump_back_reopens_won_game() {
        let mut session = Session::replay(&[TopLeft, MiddleLeft, TopCenter, Center, TopRight]);
        session.jump_to(4).expect("step 4 exists");
        assert_eq!(session.outcome(), Outcome::InProgress);
        assert_eq!(session.place_mark(BottomRight), Placement::Placed);
        assert_eq!(session.history().len(), 6);
        assert_eq!(session.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_jump_out_of_range() {
        let mut session = Session::replay(&[Center]);
        assert_eq!(
            session.jump_to(2),
            Err(SessionError::StepOutOfRange { step: 2, len: 2 })
        );
        assert_eq!(session.current_step(), 1);
    }

    #[test]
    fn test_toggle_sort_leaves_game_alone() {
        let mut session = Session::replay(&[Center, TopLeft]);
        let before = session.clone();
        session.toggle_sort_direction();
        assert_eq!(session.sort_direction(), SortDirection::Descending);
        assert_eq!(session.history(), before.history());
        assert_eq!(session.current_step(), before.current_step());
        assert_eq!(session.outcome(), before.outcome());
        session.toggle_sort_direction();
        assert_eq!(session, before);
    }

    #[test]
    fn test_winning_ninth_move_reports_winner() {
        // X completes the left column with the ninth mark.
        let session = Session::replay(&[
            TopLeft,
            TopCenter,
            MiddleLeft,
            Center,
            MiddleRight,
            TopRight,
            BottomCenter,
            BottomRight,
            BottomLeft,
        ]);
        assert_eq!(session.current_step(), 9);
        assert_eq!(session.status_text(), "Winner: X");
    }

    #[test]
    fn test_sort_direction_labels() {
        assert_eq!(SortDirection::Ascending.to_string(), "ASC");
        assert_eq!(SortDirection::Descending.to_string(), "DESC");
        assert_eq!(SortDirection::Ascending.opposite(), SortDirection::Descending);
    }
}
