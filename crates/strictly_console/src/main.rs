//! Strictly Console - tic-tac-toe with a time-travelling move list.

#![warn(missing_docs)]

mod cli;
mod config;
mod console;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, SortArg};
use config::ConsoleConfig;
use strictly_tictactoe::Session;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ConsoleConfig::load(cli.config.as_deref())?;
    init_tracing(&config);

    match cli.command {
        Command::Play => run_play(config),
        Command::Replay {
            moves,
            jump,
            sort,
            json,
        } => run_replay(config, &moves, jump, sort, json),
    }
}

/// Logs go to stderr so stdout only carries the game.
fn init_tracing(config: &ConsoleConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run the interactive console
#[instrument(skip_all)]
fn run_play(config: ConsoleConfig) -> Result<()> {
    info!(sort = ?config.sort(), "Starting interactive session");
    let session = Session::with_sort_direction(*config.sort());
    let stdin = std::io::stdin();
    console::run_play(stdin.lock(), std::io::stdout(), session).context("Console I/O failed")
}

/// Apply moves from the command line and print the final view
#[instrument(skip(config))]
fn run_replay(
    config: ConsoleConfig,
    moves: &[usize],
    jump: Option<usize>,
    sort: Option<SortArg>,
    json: bool,
) -> Result<()> {
    let config = match sort {
        Some(sort) => config.with_sort(sort.into()),
        None => config,
    };

    let session = Session::with_sort_direction(*config.sort());
    console::run_replay(std::io::stdout(), session, moves, jump, json)
}
