//! Accumulated court time and live on-court status.
//!
//! Pure reads over an [`IntervalSet`]: "now" is an explicit input, never
//! sampled internally, so the same tracker value answers the same way
//! every time it is asked.

use crate::cli::types::PlayerId;
use crate::engine::intervals::IntervalSet;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;


/// Read-only view answering "how long has everyone played" and "who is
/// out there right now".
pub struct LiveDurationTracker<'a> {
    intervals: &'a IntervalSet,
    now: DateTime<Utc>,
}

/// Seconds on court for one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSeconds {
    pub player_id: PlayerId,
    pub seconds: f64,
}

/// Snapshot payload of the live status query.
#[derive(Debug, Clone, Serialize)]
pub struct LiveStatus {
    pub seconds: Vec<PlayerSeconds>,
    pub on_court: Vec<PlayerId>,
}

impl<'a> LiveDurationTracker<'a> {
    pub fn new(intervals: &'a IntervalSet, now: DateTime<Utc>) -> Self {
        Self { intervals, now }
    }

    /// Total seconds on court for a player: closed interval durations
    /// plus `now - enter_time` for a still-open interval.
    pub fn total_seconds(&self, player_id: PlayerId) -> f64 {
        self.intervals
            .for_player(player_id)
            .iter()
            .map(|iv| iv.duration_secs(self.now))
            .sum()
    }

    /// Players with an open interval.
    pub fn on_court_now(&self) -> BTreeSet<PlayerId> {
        self.intervals
            .players()
            .filter(|&p| self.intervals.for_player(p).iter().any(|iv| iv.is_open()))
            .collect()
    }

    /// Per-player seconds plus the on-court set, in one payload.
    pub fn snapshot(&self) -> LiveStatus {
        let on_court = self.on_court_now();
        LiveStatus {
            seconds: self
                .intervals
                .players()
                .map(|p| PlayerSeconds {
                    player_id: p,
                    seconds: self.total_seconds(p),
                })
                .collect(),
            on_court: on_court.into_iter().collect(),
        }
    }
}
