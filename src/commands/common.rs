//! Common utilities and helper functions shared across commands.
//!
//! This module contains shared functionality that would otherwise be
//! duplicated across different command implementations: database setup,
//! loading a game's engine inputs, and turning one game's event log into
//! per-player stat rows.

use crate::cli::types::{GameId, PlayerId, TeamId};
use crate::engine::boxscore::{BoxScore, StatLine};
use crate::engine::intervals::build_intervals;
use crate::engine::live::LiveDurationTracker;
use crate::engine::plus_minus::game_plus_minus;
use crate::engine::types::{GameEvent, GameMeta, RosterContext};
use crate::error::{CourtsideError, Result};
use crate::storage::{Game, StatDatabase};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Context containing common resources needed by most commands
pub struct CommandContext {
    pub db: StatDatabase,
}

impl CommandContext {
    /// Initialize common command context with a database connection
    pub fn new(verbose: bool) -> Result<Self> {
        if verbose {
            println!("Connecting to database...");
        }
        let db = StatDatabase::new()?;
        Ok(Self { db })
    }
}

/// Everything the engine needs about one game, materialized from storage.
#[derive(Debug)]
pub struct GameContext {
    pub game: Game,
    pub meta: GameMeta,
    pub roster: RosterContext,
    pub events: Vec<GameEvent>,
}

/// Load a game's engine inputs, failing with a typed error when the game
/// does not exist.
pub fn load_game_context(db: &StatDatabase, game_id: GameId) -> Result<GameContext> {
    let game = db
        .get_game(game_id)?
        .ok_or(CourtsideError::GameNotFound(game_id))?;
    let roster = db.get_roster(game_id)?;
    let events = db.get_game_events(game_id)?;
    let meta = game.meta();
    Ok(GameContext {
        game,
        meta,
        roster,
        events,
    })
}

/// Compute one game's per-player stat rows: box score, seconds on court
/// and plus-minus, one row per roster player that actually appeared.
pub fn compute_game_lines(ctx: &GameContext, now: DateTime<Utc>) -> Result<Vec<StatLine>> {
    let intervals = build_intervals(&ctx.events, &ctx.roster, &ctx.meta)?;
    let tracker = LiveDurationTracker::new(&intervals, now);
    let report = game_plus_minus(&ctx.roster, &intervals, &ctx.events);
    let boxes = BoxScore::tally(&ctx.events);

    let mut lines = Vec::new();
    for player_id in ctx.roster.players() {
        let bx = boxes.get(&player_id).copied().unwrap_or_default();
        let seconds = tracker.total_seconds(player_id);
        if bx.is_empty() && seconds == 0.0 {
            continue;
        }
        lines.push(StatLine::from_game(
            player_id,
            &bx,
            seconds,
            report.value(player_id),
        ));
    }
    Ok(lines)
}

/// Resolve the `--team` / `--team-id` selector pair to a stored team.
pub fn resolve_team(
    db: &StatDatabase,
    team: Option<String>,
    team_id: Option<i64>,
) -> Result<crate::storage::Team> {
    match (team, team_id) {
        (Some(_), Some(_)) => Err(CourtsideError::AmbiguousTeamSelector),
        (Some(name), None) => db
            .get_team_by_name(&name)?
            .ok_or(CourtsideError::TeamNotFound { name }),
        (None, Some(id)) => {
            db.get_team(TeamId::new(id))?
                .ok_or(CourtsideError::TeamNotFound {
                    name: id.to_string(),
                })
        }
        (None, None) => Err(CourtsideError::TeamNotFound {
            name: "(no selector given)".to_string(),
        }),
    }
}

/// Player-id to display-name map for a game's participants.
pub fn game_name_map(db: &StatDatabase, game_id: GameId) -> Result<BTreeMap<PlayerId, String>> {
    Ok(db
        .get_game_players(game_id)?
        .into_iter()
        .map(|p| (p.player_id, p.name))
        .collect())
}

/// `MM:SS` rendering of a seconds total.
pub fn format_minutes(seconds: f64) -> String {
    let total = seconds.round() as i64;
    format!("{}:{:02}", total / 60, total % 60)
}
