//! Step pointer invariant.

use super::Invariant;
use crate::Session;

/// Invariant: the current step indexes a recorded step.
pub struct StepInBoundsInvariant;

impl Invariant<Session> for StepInBoundsInvariant {
    fn holds(session: &Session) -> bool {
        session.current_step() < session.history().len()
    }

    fn description() -> &'static str {
        "Current step lies within the recorded history"
    }
}
