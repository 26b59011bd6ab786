//! Error types for the courtside CLI

use crate::cli::types::GameId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CourtsideError>;

#[derive(Error, Debug)]
pub enum CourtsideError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse numeric id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("Unknown action code: {code}")]
    UnknownAction { code: String },

    #[error("Unknown season type: {value}")]
    UnknownSeasonType { value: String },

    #[error("Unknown game status: {value}")]
    UnknownStatus { value: String },

    #[error("Game not found: {0}")]
    GameNotFound(GameId),

    #[error("Team not found: {name}")]
    TeamNotFound { name: String },

    #[error("Game {game_id} has no roster on one or both sides")]
    EmptyRoster { game_id: GameId },

    #[error("Game {game_id} metadata rejected: {reason}")]
    InvalidGameMeta { game_id: GameId, reason: String },

    #[error("Cannot specify both --team and --team-id at the same time")]
    AmbiguousTeamSelector,

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
