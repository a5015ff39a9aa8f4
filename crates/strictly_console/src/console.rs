//! Plain-text view and line commands for the console.

use anyhow::Context;
use derive_more::{Display, Error};
use std::io::{self, BufRead, Write};
use strictly_tictactoe::{Cell, Controller, Position, Session, Snapshot, View, ViewEvent};
use tracing::{debug, info, instrument, warn};

const HELP: &str = "\
Commands:
  1-9         mark that cell (numbered left to right, top to bottom)
  place <n>   mark cell n (0-8)
  jump <n>    show step n of the move list
  sort        reverse the move list
  help        show this text
  quit        leave";

/// A parsed line of console input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Forward an event to the session.
    Event(ViewEvent),
    /// Print the command list.
    Help,
    /// Stop reading input.
    Quit,
}

/// A line that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unrecognized command '{}' (type 'help')", input)]
pub struct InputError {
    /// The offending line, trimmed.
    pub input: String,
}

impl std::str::FromStr for Input {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let err = || InputError {
            input: line.to_string(),
        };
        let mut words = line.split_whitespace();
        let command = words.next().ok_or_else(err)?.to_lowercase();
        let argument = words.next().map(|w| w.parse::<usize>().map_err(|_| err()));
        if words.next().is_some() {
            return Err(err());
        }

        match (command.as_str(), argument) {
            ("place" | "p", Some(index)) => Ok(Input::Event(ViewEvent::CellClicked(index?))),
            ("jump" | "j", Some(step)) => Ok(Input::Event(ViewEvent::HistoryEntryClicked(step?))),
            ("sort" | "s", None) => Ok(Input::Event(ViewEvent::ToggleSortClicked)),
            ("help" | "h" | "?", None) => Ok(Input::Help),
            ("quit" | "q" | "exit", None) => Ok(Input::Quit),
            (cell, None) => match cell.parse::<usize>() {
                Ok(number @ 1..=9) => Ok(Input::Event(ViewEvent::CellClicked(number - 1))),
                _ => Err(err()),
            },
            _ => Err(err()),
        }
    }
}

/// Renders a snapshot as text.
///
/// Cells on a winning line are bracketed; the current move list entry
/// is marked with `>`.
pub fn render_text(snapshot: &Snapshot) -> String {
    let board = snapshot.board();
    let mut lines = Vec::new();

    for (row, cells) in board.rows().enumerate() {
        let row_text: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                let index = row * 3 + col;
                let symbol = match cell {
                    Cell::Empty => (index + 1).to_string(),
                    Cell::Occupied(player) => player.to_string(),
                };
                let highlighted = Position::from_index(index)
                    .is_some_and(|pos| snapshot.is_highlighted(pos));
                if highlighted {
                    format!("[{}]", symbol)
                } else {
                    format!(" {} ", symbol)
                }
            })
            .collect();
        lines.push(row_text.join("|"));
        if row < 2 {
            lines.push("---+---+---".to_string());
        }
    }

    lines.push(String::new());
    lines.push(snapshot.status_text().clone());
    lines.push(format!("({}: sort)", snapshot.sort_toggle_label()));
    for entry in snapshot.history_entries() {
        let marker = if *entry.is_current() { '>' } else { ' ' };
        lines.push(format!("{} [{}] {}", marker, entry.step(), entry.label()));
    }

    lines.join("\n")
}

/// A view that prints every snapshot to a writer.
///
/// Write failures are kept until [`ConsoleView::take_error`] collects them.
#[derive(Debug)]
pub struct ConsoleView<W> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleView<W> {
    /// Creates a view writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Prints a line outside of a snapshot.
    pub fn message(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }

    /// Returns the first write failure since the last call, if any.
    pub fn take_error(&mut self) -> io::Result<()> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<W: Write> View for ConsoleView<W> {
    fn render(&mut self, snapshot: &Snapshot) {
        let text = render_text(snapshot);
        if let Err(err) = self.message(&format!("{}\n", text)) {
            self.error.get_or_insert(err);
        }
    }
}

/// Keeps only the most recent snapshot.
#[derive(Debug, Default)]
pub struct LastSnapshot(Option<Snapshot>);

impl LastSnapshot {
    /// The most recent snapshot, once anything was rendered.
    pub fn get(&self) -> Option<&Snapshot> {
        self.0.as_ref()
    }
}

impl View for LastSnapshot {
    fn render(&mut self, snapshot: &Snapshot) {
        self.0 = Some(snapshot.clone());
    }
}

/// Runs the interactive loop until `quit` or end of input.
///
/// Unrecognized lines and out-of-range indices print a message and the
/// loop continues.
#[instrument(skip_all)]
pub fn run_play<R: BufRead, W: Write>(input: R, out: W, session: Session) -> io::Result<()> {
    let mut view = ConsoleView::new(out);
    view.message(HELP)?;
    let mut controller = Controller::new(session, view);
    controller.view_mut().take_error()?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Input>() {
            Ok(Input::Event(event)) => {
                if let Err(err) = controller.dispatch(event) {
                    warn!(%err, "Rejected input");
                    controller.view_mut().message(&err.to_string())?;
                }
            }
            Ok(Input::Help) => controller.view_mut().message(HELP)?,
            Ok(Input::Quit) => {
                info!("Quit requested");
                break;
            }
            Err(err) => {
                debug!(%err, "Unparsed input");
                controller.view_mut().message(&err.to_string())?;
            }
        }
        controller.view_mut().take_error()?;
    }

    Ok(())
}

/// Applies `moves` and an optional `jump`, then writes the final view.
///
/// The first rejected index stops the replay with an error naming it.
#[instrument(skip(out, session))]
pub fn run_replay<W: Write>(
    mut out: W,
    session: Session,
    moves: &[usize],
    jump: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let mut controller = Controller::new(session, LastSnapshot::default());
    for &index in moves {
        controller
            .dispatch(ViewEvent::CellClicked(index))
            .with_context(|| format!("Invalid move {}", index))?;
    }
    if let Some(step) = jump {
        controller
            .dispatch(ViewEvent::HistoryEntryClicked(step))
            .with_context(|| format!("Invalid jump to step {}", step))?;
    }

    let snapshot = controller.view().get().context("Nothing was rendered")?;
    info!(status = %snapshot.status_text(), "Replay finished");

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(snapshot)?)?;
    } else {
        writeln!(out, "{}", render_text(snapshot))?;
    }
    out.flush()?;
    Ok(())
}
