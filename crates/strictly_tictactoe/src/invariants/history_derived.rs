//! History derivation invariant: each step adds one mark to the previous.

use super::Invariant;
use crate::{Player, Position, Session, Step};

/// Invariant: every step is its predecessor plus exactly one mark.
///
/// Step 0 is the empty board with no coordinates. Step `i` places
/// the mark of the player to move after `i - 1` marks, at an empty cell,
/// at the coordinates it records.
pub struct HistoryDerivedInvariant;

impl HistoryDerivedInvariant {
    fn derives(prev: &Step, next: &Step, marks_before: usize) -> bool {
        let Some(coords) = next.coords() else {
            return false;
        };
        let Some(pos) = Position::from_coords(coords.row, coords.col) else {
            return false;
        };
        prev.board().is_empty(pos)
            && *next.board() == prev.board().with_mark(pos, Player::for_mark_count(marks_before))
    }
}

impl Invariant<Session> for HistoryDerivedInvariant {
    fn holds(session: &Session) -> bool {
        let history = session.history();

        match history.first() {
            Some(first) if *first == Step::initial() => {}
            _ => return false,
        }

        history
            .windows(2)
            .enumerate()
            .all(|(i, pair)| Self::derives(&pair[0], &pair[1], i))
    }

    fn description() -> &'static str {
        "Each history step adds exactly one alternating mark at its recorded coordinates"
    }
}
