//! Command-line interface for strictly_console.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use strictly_tictactoe::SortDirection;

/// Strictly Console - tic-tac-toe with a time-travelling move list
#[derive(Parser, Debug)]
#[command(name = "strictly_console")]
#[command(about = "Play tic-tac-toe and jump back to any earlier move", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively, one command per line on stdin
    Play,

    /// Apply a fixed list of moves and print the resulting view
    Replay {
        /// Cell indices (0-8) in play order, comma separated
        #[arg(long, value_delimiter = ',')]
        moves: Vec<usize>,

        /// Step to jump to after the moves
        #[arg(long)]
        jump: Option<usize>,

        /// Move list order (overrides the config file)
        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Move list order as accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortArg {
    /// Oldest move first
    Ascending,
    /// Newest move first
    Descending,
}

impl From<SortArg> for SortDirection {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Ascending => SortDirection::Ascending,
            SortArg::Descending => SortDirection::Descending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_replay() {
        let cli = Cli::parse_from([
            "strictly_console",
            "replay",
            "--moves",
            "0,3,1",
            "--jump",
            "2",
            "--sort",
            "descending",
            "--json",
        ]);
        match cli.command {
            Command::Replay {
                moves,
                jump,
                sort,
                json,
            } => {
                assert_eq!(moves, vec![0, 3, 1]);
                assert_eq!(jump, Some(2));
                assert_eq!(sort, Some(SortArg::Descending));
                assert!(json);
            }
            Command::Play => panic!("expected replay"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::parse_from(["strictly_console", "play", "--config", "game.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("game.toml")));
        assert!(matches!(cli.command, Command::Play));
    }

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
