//! CLI argument definitions and parsing structures.

use super::types::{GameId, PlayerId, SeasonType};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(name = "courtside", about = "Basketball game tracking and statistics CLI")]
pub struct Courtside {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import play-by-play CSV files into the local database.
    ///
    /// Each file becomes one game: teams and players are created on first
    /// sight, starters are read from the first row's lineup columns, and
    /// event timestamps are synthesized from the countdown clock column.
    Import {
        /// Play-by-play CSV files to import.
        files: Vec<PathBuf>,

        /// Season phase recorded on the imported games.
        #[clap(long, value_enum, default_value_t)]
        season_type: SeasonType,

        /// Total game length in minutes (split evenly across quarters).
        #[clap(long, default_value_t = 40)]
        duration: u32,

        /// Number of quarters per game.
        #[clap(long, default_value_t = 4)]
        quarters: u8,

        /// Show per-file progress information.
        #[clap(long)]
        verbose: bool,
    },

    /// Aggregate per-player statistics across a team's finished games.
    ///
    /// Reconstructs on-court intervals from the substitution log of every
    /// game, then reports minutes, shooting splits, EFF, PIR and plus-minus
    /// per player.
    TeamStats {
        /// Team name (exact match).
        #[clap(long)]
        team: Option<String>,

        /// Team ID.
        #[clap(long)]
        team_id: Option<i64>,

        /// Restrict to games of this season phase.
        #[clap(long, value_enum)]
        season_type: Option<SeasonType>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Show who is on court right now and everyone's accumulated seconds.
    Live {
        /// Game ID.
        #[clap(long)]
        game_id: GameId,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// List the on-court intervals reconstructed from substitution events.
    Intervals {
        /// Game ID.
        #[clap(long)]
        game_id: GameId,

        /// Restrict output to a single player.
        #[clap(long)]
        player_id: Option<PlayerId>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}
