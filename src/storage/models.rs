//! Data models for the storage layer

use crate::cli::types::{GameId, PlayerId, SeasonType, TeamId};
use crate::engine::types::GameMeta;
use crate::error::{CourtsideError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Team stored in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub team_id: TeamId,
    pub name: String,
}

/// Player stored in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub name: String,
    pub number: u32,
}

/// Lifecycle state of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Pending,
    Live,
    Paused,
    Finished,
}

impl GameStatus {
    /// Stable string form used in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Pending => "pending",
            GameStatus::Live => "live",
            GameStatus::Paused => "paused",
            GameStatus::Finished => "finished",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GameStatus {
    type Err = CourtsideError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(GameStatus::Pending),
            "live" => Ok(GameStatus::Live),
            "paused" => Ok(GameStatus::Paused),
            "finished" => Ok(GameStatus::Finished),
            _ => Err(CourtsideError::UnknownStatus {
                value: s.to_string(),
            }),
        }
    }
}

/// Game stored in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub game_id: GameId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub date: DateTime<Utc>,
    /// Total game length in minutes, split evenly across quarters.
    pub duration_minutes: u32,
    pub quarters: u8,
    pub status: GameStatus,
    pub season_type: SeasonType,
}

impl Game {
    /// Length of one period in seconds.
    pub fn period_length_secs(&self) -> u32 {
        self.duration_minutes * 60 / u32::from(self.quarters.max(1))
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// Engine-facing metadata view of this game.
    pub fn meta(&self) -> GameMeta {
        GameMeta {
            game_id: self.game_id,
            period_length_secs: self.period_length_secs(),
            periods: self.quarters,
            game_start: self.date,
            is_finished: self.is_finished(),
        }
    }
}
