//! Box-score folding and composite efficiency metrics.
//!
//! Raw per-player action counts fold into derived totals (points,
//! rebounds, shooting splits) and the EFF / PIR composite ratings.
//! Attempt totals are derived as makes + misses, matching the event
//! convention where the `*A` codes record missed attempts.

use crate::cli::types::PlayerId;
use crate::engine::types::{ActionKind, GameEvent};
use serde::Serialize;
use std::collections::BTreeMap;


/// Raw action counts for one player. Absent counts are zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BoxScore {
    pub two_made: u32,
    pub two_miss: u32,
    pub three_made: u32,
    pub three_miss: u32,
    pub ft_made: u32,
    pub ft_miss: u32,
    pub oreb: u32,
    pub dreb: u32,
    pub ast: u32,
    pub stl: u32,
    pub blk: u32,
    pub tov: u32,
    pub pf: u32,
    pub pfd: u32,
}

impl BoxScore {
    /// Fold one action into the counts. Substitutions are not box-score
    /// material and are ignored.
    pub fn record(&mut self, kind: ActionKind) {
        match kind {
            ActionKind::TwoPtMade => self.two_made += 1,
            ActionKind::TwoPtMiss => self.two_miss += 1,
            ActionKind::ThreePtMade => self.three_made += 1,
            ActionKind::ThreePtMiss => self.three_miss += 1,
            ActionKind::FtMade => self.ft_made += 1,
            ActionKind::FtMiss => self.ft_miss += 1,
            ActionKind::OffRebound => self.oreb += 1,
            ActionKind::DefRebound => self.dreb += 1,
            ActionKind::Assist => self.ast += 1,
            ActionKind::Steal => self.stl += 1,
            ActionKind::Block => self.blk += 1,
            ActionKind::Turnover => self.tov += 1,
            ActionKind::Foul => self.pf += 1,
            ActionKind::FoulDrawn => self.pfd += 1,
            ActionKind::SubIn | ActionKind::SubOut => {}
        }
    }

    /// Per-player box scores for a whole event log.
    pub fn tally(events: &[GameEvent]) -> BTreeMap<PlayerId, BoxScore> {
        let mut boxes: BTreeMap<PlayerId, BoxScore> = BTreeMap::new();
        for event in events {
            boxes.entry(event.player_id).or_default().record(event.kind);
        }
        boxes
    }

    pub fn points(&self) -> u32 {
        2 * self.two_made + 3 * self.three_made + self.ft_made
    }

    pub fn fgm(&self) -> u32 {
        self.two_made + self.three_made
    }

    pub fn fga(&self) -> u32 {
        self.fgm() + self.two_miss + self.three_miss
    }

    pub fn fg3m(&self) -> u32 {
        self.three_made
    }

    pub fn fg3a(&self) -> u32 {
        self.three_made + self.three_miss
    }

    pub fn ftm(&self) -> u32 {
        self.ft_made
    }

    pub fn fta(&self) -> u32 {
        self.ft_made + self.ft_miss
    }

    pub fn reb(&self) -> u32 {
        self.oreb + self.dreb
    }

    /// EFF = (PTS + REB + AST + STL + BLK) - ((FGA-FGM) + (FTA-FTM) + TOV)
    pub fn eff(&self) -> i32 {
        let positive = self.points() + self.reb() + self.ast + self.stl + self.blk;
        let negative = (self.fga() - self.fgm()) + (self.fta() - self.ftm()) + self.tov;
        positive as i32 - negative as i32
    }

    /// PIR = EFF with fouls drawn credited and fouls committed charged.
    pub fn pir(&self) -> i32 {
        self.eff() + self.pfd as i32 - self.pf as i32
    }

    pub fn is_empty(&self) -> bool {
        *self == BoxScore::default()
    }
}

/// One aggregated output row of the team-statistics query.
///
/// Derived on demand from box scores, interval durations and plus-minus;
/// never persisted. `merge` accumulates rows of the same player across
/// games.
#[derive(Debug, Clone, Serialize)]
pub struct StatLine {
    pub player_id: PlayerId,
    pub games_played: u32,
    pub seconds: f64,
    pub points: u32,
    pub fgm: u32,
    pub fga: u32,
    pub fg3m: u32,
    pub fg3a: u32,
    pub ftm: u32,
    pub fta: u32,
    pub reb: u32,
    pub ast: u32,
    pub stl: u32,
    pub blk: u32,
    pub tov: u32,
    pub pf: u32,
    pub pfd: u32,
    pub eff: i32,
    pub pir: i32,
    pub plus_minus: i32,
}

impl StatLine {
    /// Single-game row from the engine's per-player outputs.
    pub fn from_game(player_id: PlayerId, bx: &BoxScore, seconds: f64, plus_minus: i32) -> Self {
        Self {
            player_id,
            games_played: 1,
            seconds,
            points: bx.points(),
            fgm: bx.fgm(),
            fga: bx.fga(),
            fg3m: bx.fg3m(),
            fg3a: bx.fg3a(),
            ftm: bx.ftm(),
            fta: bx.fta(),
            reb: bx.reb(),
            ast: bx.ast,
            stl: bx.stl,
            blk: bx.blk,
            tov: bx.tov,
            pf: bx.pf,
            pfd: bx.pfd,
            eff: bx.eff(),
            pir: bx.pir(),
            plus_minus,
        }
    }

    /// Accumulate another game's row for the same player. EFF and PIR
    /// are linear in the counts, so summing them per game equals
    /// computing them over the summed counts.
    pub fn merge(&mut self, other: &StatLine) {
        debug_assert_eq!(self.player_id, other.player_id);
        self.games_played += other.games_played;
        self.seconds += other.seconds;
        self.points += other.points;
        self.fgm += other.fgm;
        self.fga += other.fga;
        self.fg3m += other.fg3m;
        self.fg3a += other.fg3a;
        self.ftm += other.ftm;
        self.fta += other.fta;
        self.reb += other.reb;
        self.ast += other.ast;
        self.stl += other.stl;
        self.blk += other.blk;
        self.tov += other.tov;
        self.pf += other.pf;
        self.pfd += other.pfd;
        self.eff += other.eff;
        self.pir += other.pir;
        self.plus_minus += other.plus_minus;
    }

    /// Minutes on court.
    pub fn minutes(&self) -> f64 {
        self.seconds / 60.0
    }
}
