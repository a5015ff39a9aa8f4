//! Turn parity invariant: X moves on even steps, O on odd steps.

use super::Invariant;
use crate::{Player, Session};

/// Invariant: the next player is determined by the current step.
pub struct TurnParityInvariant;

impl Invariant<Session> for TurnParityInvariant {
    fn holds(session: &Session) -> bool {
        let step = session.current_step();
        session.history().get(step).is_some_and(|current| {
            session.next_player() == Player::for_mark_count(step)
                && current.board().mark_count() == step
        })
    }

    fn description() -> &'static str {
        "Next player is X on even steps and O on odd steps"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_holds_after_jump() {
        let mut session =
            Session::replay(&[Position::Center, Position::TopLeft, Position::TopRight]);
        assert!(TurnParityInvariant::holds(&session));
        session.jump_to(1).expect("step exists");
        assert!(TurnParityInvariant::holds(&session));
        assert_eq!(session.next_player(), Player::O);
    }

    #[test]
    fn test_wrong_player_violates() {
        let mut session = Session::new();
        session.set_next_player(Player::O);
        assert!(!TurnParityInvariant::holds(&session));
    }
}
