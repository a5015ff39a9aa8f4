//! The boundary between a session and whatever draws it.
//!
//! Views never read session fields directly. They receive a [`Snapshot`]
//! after every handled event and send [`ViewEvent`]s back through a
//! [`Controller`].

use crate::{Board, Position, Session, SessionError, SortDirection, Step};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One line of the move list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct HistoryEntry {
    /// Step this entry jumps to.
    step: usize,
    /// Button text.
    label: String,
    /// Whether this step is being shown.
    is_current: bool,
}

impl HistoryEntry {
    fn new(index: usize, step: &Step, current: usize) -> Self {
        let label = match step.coords() {
            Some(coords) if index > 0 => format!(
                "Go to move #{}: col {} row {}",
                index,
                coords.col + 1,
                coords.row + 1
            ),
            _ => "Go to game start".to_string(),
        };
        Self {
            step: index,
            label,
            is_current: index == current,
        }
    }
}

/// Read-only picture of a session, rebuilt after every event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Snapshot {
    /// Board of the current step.
    board: Board,
    /// Cells to highlight when the current board is won.
    winning_line: Option<[Position; 3]>,
    /// "Winner: X", "It is a draw!" or "Next player: O".
    status_text: String,
    /// Move list in display order.
    history_entries: Vec<HistoryEntry>,
    /// Display order of `history_entries`.
    sort_direction: SortDirection,
    /// Text for the sort toggle.
    sort_toggle_label: String,
}

impl Snapshot {
    /// True for cells on the winning line.
    pub fn is_highlighted(&self, pos: Position) -> bool {
        self.winning_line.is_some_and(|line| line.contains(&pos))
    }
}

impl From<&Session> for Snapshot {
    fn from(session: &Session) -> Self {
        let current = session.current_step();
        let mut history_entries: Vec<HistoryEntry> = session
            .history()
            .iter()
            .enumerate()
            .map(|(index, step)| HistoryEntry::new(index, step, current))
            .collect();
        if session.sort_direction() == SortDirection::Descending {
            history_entries.reverse();
        }

        Self {
            board: *session.board(),
            winning_line: session.outcome().win().map(|win| win.line),
            status_text: session.status_text(),
            history_entries,
            sort_direction: session.sort_direction(),
            sort_toggle_label: format!(
                "Change steps order to {}",
                session.sort_direction().opposite()
            ),
        }
    }
}

impl Session {
    /// Builds the view snapshot of this session.
    #[instrument(skip(self))]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(self)
    }
}

/// Input a view forwards to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewEvent {
    /// A board cell (0-8) was clicked.
    CellClicked(usize),
    /// A move list entry was clicked.
    HistoryEntryClicked(usize),
    /// The sort toggle was clicked.
    ToggleSortClicked,
}

/// Something that draws snapshots.
pub trait View {
    /// Draws a freshly computed snapshot.
    fn render(&mut self, snapshot: &Snapshot);
}

/// Owns a session and its view, and routes events between them.
#[derive(Debug)]
pub struct Controller<V> {
    session: Session,
    view: V,
}

impl<V: View> Controller<V> {
    /// Wires a session to a view and renders the initial snapshot.
    pub fn new(session: Session, mut view: V) -> Self {
        view.render(&session.snapshot());
        Self { session, view }
    }

    /// Applies one event, then renders the resulting snapshot.
    ///
    /// Illegal moves are ignored and still re-render.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] for out-of-range cell or step indices; the
    /// session is left untouched and nothing is rendered.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, event: ViewEvent) -> Result<(), SessionError> {
        match event {
            ViewEvent::CellClicked(index) => {
                let placement = self.session.place_mark(Position::try_from(index)?);
                debug!(%placement, "Cell click handled");
            }
            ViewEvent::HistoryEntryClicked(step) => self.session.jump_to(step)?,
            ViewEvent::ToggleSortClicked => self.session.toggle_sort_direction(),
        }
        self.view.render(&self.session.snapshot());
        Ok(())
    }

    /// The session being driven.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The attached view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view, for output outside of snapshots.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Splits the controller back into its parts.
    pub fn into_parts(self) -> (Session, V) {
        (self.session, self.view)
    }
}
