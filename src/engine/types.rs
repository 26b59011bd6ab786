//! Event model and game context types for the statistics engine.
//!
//! Everything the engine computes is a pure function of three inputs
//! defined here: the ordered event log ([`GameEvent`]), the roster
//! context ([`RosterContext`]) and the game metadata ([`GameMeta`]).
//! The engine itself performs no I/O; callers materialize these values
//! (normally from storage) and hand them in.

use crate::cli::types::{GameId, Period, PlayerId};
use crate::error::{CourtsideError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;


/// Closed set of recordable actions.
///
/// The wire codes (`2PM`, `OREB`, ...) are shared by the CSV importer and
/// the database. The `*A` codes record *missed* attempts: a made shot
/// emits only its `*M` event, and attempt totals are derived as
/// makes + misses when box scores are folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    TwoPtMade,
    TwoPtMiss,
    ThreePtMade,
    ThreePtMiss,
    FtMade,
    FtMiss,
    OffRebound,
    DefRebound,
    Assist,
    Steal,
    Block,
    Turnover,
    Foul,
    FoulDrawn,
    SubIn,
    SubOut,
}

impl ActionKind {
    /// Stable wire code used in CSV feeds and the events table.
    pub fn code(&self) -> &'static str {
        match self {
            ActionKind::TwoPtMade => "2PM",
            ActionKind::TwoPtMiss => "2PA",
            ActionKind::ThreePtMade => "3PM",
            ActionKind::ThreePtMiss => "3PA",
            ActionKind::FtMade => "FTM",
            ActionKind::FtMiss => "FTA",
            ActionKind::OffRebound => "OREB",
            ActionKind::DefRebound => "DREB",
            ActionKind::Assist => "AST",
            ActionKind::Steal => "STL",
            ActionKind::Block => "BLK",
            ActionKind::Turnover => "TOV",
            ActionKind::Foul => "PF",
            ActionKind::FoulDrawn => "PFD",
            ActionKind::SubIn => "SUB_IN",
            ActionKind::SubOut => "SUB_OUT",
        }
    }

    /// Points this action adds to the scoreboard (0 for everything that
    /// is not a made shot).
    pub fn points(&self) -> u32 {
        match self {
            ActionKind::TwoPtMade => 2,
            ActionKind::ThreePtMade => 3,
            ActionKind::FtMade => 1,
            _ => 0,
        }
    }

    /// Whether this is a substitution (enter/exit) event.
    pub fn is_substitution(&self) -> bool {
        matches!(self, ActionKind::SubIn | ActionKind::SubOut)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for ActionKind {
    type Err = CourtsideError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "2PM" => Ok(ActionKind::TwoPtMade),
            "2PA" => Ok(ActionKind::TwoPtMiss),
            "3PM" => Ok(ActionKind::ThreePtMade),
            "3PA" => Ok(ActionKind::ThreePtMiss),
            "FTM" => Ok(ActionKind::FtMade),
            "FTA" => Ok(ActionKind::FtMiss),
            "OREB" => Ok(ActionKind::OffRebound),
            "DREB" => Ok(ActionKind::DefRebound),
            "AST" => Ok(ActionKind::Assist),
            "STL" => Ok(ActionKind::Steal),
            "BLK" => Ok(ActionKind::Block),
            "TOV" => Ok(ActionKind::Turnover),
            "PF" => Ok(ActionKind::Foul),
            "PFD" => Ok(ActionKind::FoulDrawn),
            "SUB_IN" => Ok(ActionKind::SubIn),
            "SUB_OUT" => Ok(ActionKind::SubOut),
            _ => Err(CourtsideError::UnknownAction {
                code: s.to_string(),
            }),
        }
    }
}

/// One recorded game event.
///
/// `seq` is the arrival index (the events table rowid): events arrive in
/// no guaranteed clock order, so the canonical ordering key is
/// `(period, timestamp)` with `seq` as the stable tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameEvent {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub period: Period,
    pub timestamp: DateTime<Utc>,
    pub kind: ActionKind,
    pub seq: u32,
}

impl GameEvent {
    /// Canonical ordering key: `(period, timestamp)`, ties broken by
    /// arrival order.
    pub fn sort_key(&self) -> (Period, DateTime<Utc>, u32) {
        (self.period, self.timestamp, self.seq)
    }
}

/// Sort events into canonical game order in place.
pub fn sort_game_order(events: &mut [GameEvent]) {
    events.sort_by_key(|e| e.sort_key());
}

/// Which bench a player belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

/// Per-game roster context: the two player-id sets and the period-1
/// starter set.
#[derive(Debug, Clone, Default)]
pub struct RosterContext {
    home: BTreeSet<PlayerId>,
    away: BTreeSet<PlayerId>,
    starters: BTreeSet<PlayerId>,
}

impl RosterContext {
    pub fn new(
        home: BTreeSet<PlayerId>,
        away: BTreeSet<PlayerId>,
        starters: BTreeSet<PlayerId>,
    ) -> Self {
        Self {
            home,
            away,
            starters,
        }
    }

    /// Which side a player belongs to, if any.
    pub fn side_of(&self, player_id: PlayerId) -> Option<Side> {
        if self.home.contains(&player_id) {
            Some(Side::Home)
        } else if self.away.contains(&player_id) {
            Some(Side::Away)
        } else {
            None
        }
    }

    pub fn side_players(&self, side: Side) -> &BTreeSet<PlayerId> {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    /// All rostered players, home side first.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.home.iter().chain(self.away.iter()).copied()
    }

    pub fn is_starter(&self, player_id: PlayerId) -> bool {
        self.starters.contains(&player_id)
    }

    /// Contract check: both sides must have at least one player.
    pub fn validate(&self, game_id: GameId) -> Result<()> {
        if self.home.is_empty() || self.away.is_empty() {
            return Err(CourtsideError::EmptyRoster { game_id });
        }
        Ok(())
    }
}

/// Game metadata the engine needs to place events on the period grid.
#[derive(Debug, Clone, Copy)]
pub struct GameMeta {
    pub game_id: GameId,
    /// Length of one period in seconds, derived from the game's
    /// configured duration and quarter count. Always passed explicitly.
    pub period_length_secs: u32,
    /// Number of scheduled periods.
    pub periods: u8,
    pub game_start: DateTime<Utc>,
    /// Controls whether open intervals are closed at period boundaries
    /// or left open for the live tracker to resolve against "now".
    pub is_finished: bool,
}

impl GameMeta {
    /// Contract check: a zero period length makes the period grid
    /// degenerate and every downstream computation meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.period_length_secs == 0 {
            return Err(CourtsideError::InvalidGameMeta {
                game_id: self.game_id,
                reason: "period length is zero".to_string(),
            });
        }
        if self.periods == 0 {
            return Err(CourtsideError::InvalidGameMeta {
                game_id: self.game_id,
                reason: "period count is zero".to_string(),
            });
        }
        Ok(())
    }

    /// Absolute start of a period.
    pub fn period_start(&self, period: Period) -> DateTime<Utc> {
        let completed = i64::from(period.as_u8().saturating_sub(1));
        self.game_start + Duration::seconds(completed * i64::from(self.period_length_secs))
    }

    /// Absolute end of a period.
    pub fn period_end(&self, period: Period) -> DateTime<Utc> {
        self.period_start(period) + Duration::seconds(i64::from(self.period_length_secs))
    }
}

/// Running score derived from made-shot events only.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreState {
    pub home: u32,
    pub away: u32,
}

impl ScoreState {
    /// Advance the score by one event. Non-scoring kinds are no-ops.
    pub fn apply(&mut self, side: Side, kind: ActionKind) {
        let pts = kind.points();
        match side {
            Side::Home => self.home += pts,
            Side::Away => self.away += pts,
        }
    }

    /// Final score of an event log. Events whose player is on neither
    /// roster are ignored here; the plus-minus engine reports them.
    pub fn from_events(events: &[GameEvent], roster: &RosterContext) -> Self {
        let mut score = Self::default();
        for event in events {
            if let Some(side) = roster.side_of(event.player_id) {
                score.apply(side, event.kind);
            }
        }
        score
    }

    /// Home margin (positive when the home side leads).
    pub fn margin(&self) -> i32 {
        self.home as i32 - self.away as i32
    }
}
