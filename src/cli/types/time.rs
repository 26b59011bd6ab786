//! Game-time types: period numbers and season phases.

use crate::error::{CourtsideError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for period (quarter) numbers, counted from 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period(pub u8);

impl Period {
    pub fn new(period: u8) -> Self {
        Self(period)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// The next period in sequence.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for Period {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Period {
    type Err = CourtsideError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

/// Season phase a game belongs to.
///
/// Stored on each game and usable as a filter when aggregating team
/// statistics across games.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, clap::ValueEnum,
)]
pub enum SeasonType {
    /// Regular-season game
    #[default]
    Regular,
    /// Playoff game
    Playoff,
}

impl SeasonType {
    /// Stable string form used in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonType::Regular => "regular",
            SeasonType::Playoff => "playoff",
        }
    }
}

impl fmt::Display for SeasonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SeasonType {
    type Err = CourtsideError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "regular" => Ok(SeasonType::Regular),
            "playoff" => Ok(SeasonType::Playoff),
            _ => Err(CourtsideError::UnknownSeasonType {
                value: s.to_string(),
            }),
        }
    }
}
