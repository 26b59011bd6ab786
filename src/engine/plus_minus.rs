//! Plus-minus: net score swing while a player is on court.
//!
//! The computation walks the game's scoring events in canonical order and
//! credits every roster player whose interval covers the event instant
//! with the signed score delta from their team's perspective. Attribution
//! problems never abort the walk: an event whose player belongs to
//! neither roster is skipped and recorded, and the final figure is
//! best-effort analytics rather than a ledger.

use crate::cli::types::PlayerId;
use crate::engine::intervals::IntervalSet;
use crate::engine::types::{sort_game_order, GameEvent, RosterContext, Side};
use serde::Serialize;
use std::collections::BTreeMap;

#[cfg(test)]
mod tests;

/// One scoring event that could not be attributed to either team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttributionSkipped {
    /// Arrival index of the skipped event.
    pub seq: u32,
    /// The player the event was recorded for.
    pub player_id: PlayerId,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// The scoring player is on neither roster, so the delta's side is
    /// unknowable.
    UnrosteredPlayer,
}

/// Outcome of a plus-minus pass: per-player values plus the events that
/// had to be skipped.
#[derive(Debug, Default, Clone)]
pub struct PlusMinusReport {
    pub values: BTreeMap<PlayerId, i32>,
    pub skipped: Vec<AttributionSkipped>,
}

impl PlusMinusReport {
    pub fn value(&self, player_id: PlayerId) -> i32 {
        self.values.get(&player_id).copied().unwrap_or(0)
    }

    fn merge(mut self, other: PlusMinusReport) -> PlusMinusReport {
        self.values.extend(other.values);
        self
    }
}

/// Compute plus-minus for one team's roster.
///
/// `events` is the full scoring-event stream of both teams; every roster
/// player whose interval covers a scoring instant (inclusive on both
/// ends, so a player substituted exactly at the scoring instant is
/// credited) receives `team_delta - opponent_delta`.
pub fn plus_minus(
    side: Side,
    roster: &RosterContext,
    intervals: &IntervalSet,
    events: &[GameEvent],
) -> PlusMinusReport {
    let mut report = PlusMinusReport::default();
    for player_id in roster.side_players(side) {
        report.values.insert(*player_id, 0);
    }

    let mut ordered: Vec<GameEvent> = events.to_vec();
    sort_game_order(&mut ordered);

    for event in &ordered {
        let pts = event.kind.points() as i32;
        if pts == 0 {
            continue;
        }

        let scoring_side = match roster.side_of(event.player_id) {
            Some(s) => s,
            None => {
                report.skipped.push(AttributionSkipped {
                    seq: event.seq,
                    player_id: event.player_id,
                    reason: SkipReason::UnrosteredPlayer,
                });
                continue;
            }
        };

        // team_delta - opponent_delta, from this roster's perspective.
        let signed = if scoring_side == side { pts } else { -pts };
        for player_id in roster.side_players(side) {
            if intervals.covers(*player_id, event.timestamp) {
                *report.values.entry(*player_id).or_insert(0) += signed;
            }
        }
    }

    if !report.skipped.is_empty() {
        log::debug!(
            "plus-minus: skipped {} unattributable scoring events",
            report.skipped.len()
        );
    }
    report
}

/// Both teams' plus-minus in one report.
///
/// Runs the home and away passes and merges the value maps; the skipped
/// list is identical between passes, so it is taken from the home pass.
pub fn game_plus_minus(
    roster: &RosterContext,
    intervals: &IntervalSet,
    events: &[GameEvent],
) -> PlusMinusReport {
    let home = plus_minus(Side::Home, roster, intervals, events);
    let away = plus_minus(Side::Away, roster, intervals, events);
    home.merge(away)
}
