//! Tic-tac-toe with a time-travelling move history.
//!
//! # Architecture
//!
//! - **Rules**: pure win/draw evaluation of a single board
//! - **Session**: the history of board snapshots, the step being shown,
//!   whose turn it is and how the move list is ordered
//! - **View**: snapshots sent to a view, and the events it sends back
//! - **Invariants**: properties every session keeps between events
//!
//! # Example
//!
//! ```
//! use strictly_tictactoe::{Controller, Session, Snapshot, View, ViewEvent};
//!
//! struct Status(String);
//!
//! impl View for Status {
//!     fn render(&mut self, snapshot: &Snapshot) {
//!         self.0 = snapshot.status_text().clone();
//!     }
//! }
//!
//! let mut controller = Controller::new(Session::new(), Status(String::new()));
//! controller.dispatch(ViewEvent::CellClicked(4)).unwrap();
//! assert_eq!(controller.view().0, "Next player: O");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod invariants;
mod position;
pub mod rules;
mod session;
mod types;
mod view;

pub use error::SessionError;
pub use position::Position;
pub use rules::{Outcome, WINNING_LINES, Win, evaluate, is_draw, is_full};
pub use session::{Placement, Session, SortDirection, Step};
pub use types::{Board, Cell, Coords, Player};
pub use view::{Controller, HistoryEntry, Snapshot, View, ViewEvent};
