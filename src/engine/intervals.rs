//! On-court interval reconstruction from substitution events.
//!
//! For every `(player, period)` a small OFF/ON state machine consumes the
//! chronologically sorted enter/exit events and emits closed intervals.
//! The data is allowed to be imperfect: duplicate enters and orphan exits
//! are tolerated as no-ops and counted, a player still on court when a
//! period ends is closed at the period boundary, and a closed interval
//! with non-positive duration is dropped. Only contract-level problems
//! (empty roster, degenerate period grid) are errors.

use crate::cli::types::{Period, PlayerId};
use crate::engine::types::{sort_game_order, ActionKind, GameEvent, GameMeta, RosterContext};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[cfg(test)]
mod tests;

/// A maximal continuous span a player spent on court within one period.
///
/// `exit_time = None` means the player is still on court; that state only
/// survives into output for the in-progress period of an unfinished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OnCourtInterval {
    pub player_id: PlayerId,
    pub period: Period,
    pub enter_time: DateTime<Utc>,
    pub exit_time: Option<DateTime<Utc>>,
}

impl OnCourtInterval {
    /// Whether the interval covers an instant, inclusive on both ends.
    /// An open interval covers everything from its enter time onward.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.enter_time <= t && self.exit_time.map_or(true, |exit| t <= exit)
    }

    /// Seconds spent on court, resolving an open interval against `now`.
    pub fn duration_secs(&self, now: DateTime<Utc>) -> f64 {
        let exit = self.exit_time.unwrap_or(now);
        (exit - self.enter_time).num_milliseconds() as f64 / 1000.0
    }

    pub fn is_open(&self) -> bool {
        self.exit_time.is_none()
    }
}

/// Data-quality counters accumulated while building intervals.
///
/// None of these is an error; they exist so imports and queries can
/// surface how much of the substitution log was noise.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntervalDiagnostics {
    /// Enter events received while already on court.
    pub duplicate_enters: u32,
    /// Exit events received while not on court.
    pub orphan_exits: u32,
    /// Closed intervals dropped because their duration was <= 0.
    pub dropped_nonpositive: u32,
}

impl IntervalDiagnostics {
    pub fn merge(&mut self, other: &IntervalDiagnostics) {
        self.duplicate_enters += other.duplicate_enters;
        self.orphan_exits += other.orphan_exits;
        self.dropped_nonpositive += other.dropped_nonpositive;
    }

    pub fn is_clean(&self) -> bool {
        *self == IntervalDiagnostics::default()
    }
}

#[derive(Debug, Clone, Copy)]
enum CourtState {
    Off,
    On { since: DateTime<Utc> },
}

/// Result of finishing one `(player, period)` state machine.
#[derive(Debug)]
pub struct FinishedPeriod {
    pub intervals: Vec<OnCourtInterval>,
    pub diagnostics: IntervalDiagnostics,
    /// True when the player was still on court when the period ended;
    /// drives the carry-over seeding of the next period.
    pub ended_on_court: bool,
}

/// OFF/ON state machine for one player within one period.
pub struct IntervalBuilder {
    player_id: PlayerId,
    period: Period,
    state: CourtState,
    intervals: Vec<OnCourtInterval>,
    diagnostics: IntervalDiagnostics,
}

impl IntervalBuilder {
    /// `on_court_since` seeds the machine ON from that instant: the
    /// period start for period-1 starters and for carry-over players.
    pub fn new(player_id: PlayerId, period: Period, on_court_since: Option<DateTime<Utc>>) -> Self {
        Self {
            player_id,
            period,
            state: match on_court_since {
                Some(since) => CourtState::On { since },
                None => CourtState::Off,
            },
            intervals: Vec::new(),
            diagnostics: IntervalDiagnostics::default(),
        }
    }

    /// Feed one substitution event. Non-substitution kinds are ignored.
    pub fn record(&mut self, kind: ActionKind, at: DateTime<Utc>) {
        match (kind, self.state) {
            (ActionKind::SubIn, CourtState::Off) => {
                self.state = CourtState::On { since: at };
            }
            (ActionKind::SubIn, CourtState::On { .. }) => {
                self.diagnostics.duplicate_enters += 1;
            }
            (ActionKind::SubOut, CourtState::On { since }) => {
                self.close(since, at);
                self.state = CourtState::Off;
            }
            (ActionKind::SubOut, CourtState::Off) => {
                self.diagnostics.orphan_exits += 1;
            }
            _ => {}
        }
    }

    /// Finalize the period. With `period_end = Some(t)` a player still on
    /// court is closed at `t`; with `None` (in-progress period) the
    /// interval is emitted open.
    pub fn finish(mut self, period_end: Option<DateTime<Utc>>) -> FinishedPeriod {
        let ended_on_court = matches!(self.state, CourtState::On { .. });
        if let CourtState::On { since } = self.state {
            match period_end {
                Some(end) => self.close(since, end),
                None => self.intervals.push(OnCourtInterval {
                    player_id: self.player_id,
                    period: self.period,
                    enter_time: since,
                    exit_time: None,
                }),
            }
        }
        FinishedPeriod {
            intervals: self.intervals,
            diagnostics: self.diagnostics,
            ended_on_court,
        }
    }

    fn close(&mut self, enter: DateTime<Utc>, exit: DateTime<Utc>) {
        if exit <= enter {
            self.diagnostics.dropped_nonpositive += 1;
            return;
        }
        self.intervals.push(OnCourtInterval {
            player_id: self.player_id,
            period: self.period,
            enter_time: enter,
            exit_time: Some(exit),
        });
    }
}

/// All intervals of one game, grouped per player, plus diagnostics.
#[derive(Debug, Default)]
pub struct IntervalSet {
    by_player: BTreeMap<PlayerId, Vec<OnCourtInterval>>,
    diagnostics: IntervalDiagnostics,
}

impl IntervalSet {
    /// Intervals of one player, ordered by period then enter time.
    pub fn for_player(&self, player_id: PlayerId) -> &[OnCourtInterval] {
        self.by_player
            .get(&player_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Players that have at least one interval.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.by_player.keys().copied()
    }

    /// All intervals in player order.
    pub fn iter(&self) -> impl Iterator<Item = &OnCourtInterval> {
        self.by_player.values().flatten()
    }

    /// Whether a player's interval covers the instant (inclusive).
    pub fn covers(&self, player_id: PlayerId, t: DateTime<Utc>) -> bool {
        self.for_player(player_id).iter().any(|iv| iv.contains(t))
    }

    pub fn diagnostics(&self) -> &IntervalDiagnostics {
        &self.diagnostics
    }
}

/// Build the full interval set of a game from its event log.
///
/// Periods are processed in order per player. Period 1 seeds starters ON
/// at the period start; a player force-closed at the end of period N
/// because they were still playing is seeded ON again at the start of
/// period N+1 (carry-over). For an unfinished game the latest period seen
/// in the event log stays open: players still ON there get an open
/// interval for the live tracker to resolve.
pub fn build_intervals(
    events: &[GameEvent],
    roster: &RosterContext,
    meta: &GameMeta,
) -> Result<IntervalSet> {
    meta.validate()?;
    roster.validate(meta.game_id)?;

    // Substitution events per (player, period), in canonical order.
    let mut subs: Vec<GameEvent> = events
        .iter()
        .filter(|e| e.kind.is_substitution())
        .copied()
        .collect();
    sort_game_order(&mut subs);

    let last_event_period = events
        .iter()
        .map(|e| e.period.as_u8())
        .max()
        .unwrap_or(1);
    // Finished games cover the whole schedule (plus overtime periods seen
    // in the log); unfinished games stop at the latest period reached.
    let last_period = if meta.is_finished {
        meta.periods.max(last_event_period)
    } else {
        last_event_period
    };

    let mut set = IntervalSet::default();
    for player_id in roster.players() {
        let mut on_since: Option<DateTime<Utc>> = roster
            .is_starter(player_id)
            .then(|| meta.period_start(Period::new(1)));
        let mut player_intervals = Vec::new();

        for p in 1..=last_period {
            let period = Period::new(p);
            let open_period = !meta.is_finished && p == last_period;

            let mut builder = IntervalBuilder::new(player_id, period, on_since);
            for event in subs
                .iter()
                .filter(|e| e.player_id == player_id && e.period == period)
            {
                builder.record(event.kind, event.timestamp);
            }

            let finished = builder.finish((!open_period).then(|| meta.period_end(period)));
            player_intervals.extend(finished.intervals);
            set.diagnostics.merge(&finished.diagnostics);

            on_since = (finished.ended_on_court && !open_period)
                .then(|| meta.period_start(period.next()));
        }

        if !player_intervals.is_empty() {
            set.by_player.insert(player_id, player_intervals);
        }
    }

    if !set.diagnostics.is_clean() {
        log::debug!(
            "game {}: substitution log noise: {:?}",
            meta.game_id,
            set.diagnostics
        );
    }

    Ok(set)
}
