//! Team statistics aggregation across finished games.

use super::common::{compute_game_lines, load_game_context, resolve_team, CommandContext};
use crate::cli::types::{PlayerId, SeasonType};
use crate::core::cache::GLOBAL_CACHE;
use crate::engine::boxscore::StatLine;
use crate::error::Result;
use chrono::Utc;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// One output row: a player's accumulated line plus their display name.
#[derive(Debug, Serialize)]
struct TeamStatsRow {
    name: String,
    #[serde(flatten)]
    line: StatLine,
}

/// Aggregate per-player statistics over a team's finished games.
///
/// Events are loaded game by game (storage is the caller's side of the
/// engine contract); the per-game computations are independent and run
/// in parallel. Finished games hit the metrics cache on repeat queries.
pub fn handle_team_stats(
    team: Option<String>,
    team_id: Option<i64>,
    season_type: Option<SeasonType>,
    as_json: bool,
) -> Result<()> {
    let ctx = CommandContext::new(false)?;
    let team = resolve_team(&ctx.db, team, team_id)?;
    let games = ctx.db.get_team_games(team.team_id, season_type)?;
    let now = Utc::now();

    // Cached rows first; everything else gets computed in parallel.
    let mut per_game: Vec<Vec<StatLine>> = Vec::new();
    let mut to_compute = Vec::new();
    for game in &games {
        match GLOBAL_CACHE.get(game.game_id) {
            Some(lines) => per_game.push(lines),
            None => to_compute.push(load_game_context(&ctx.db, game.game_id)?),
        }
    }

    let computed: Vec<Vec<StatLine>> = to_compute
        .par_iter()
        .map(|gc| compute_game_lines(gc, now))
        .collect::<Result<_>>()?;

    for (gc, lines) in to_compute.iter().zip(&computed) {
        GLOBAL_CACHE.put(gc.meta.game_id, lines.clone());
    }
    per_game.extend(computed);

    // Fold the team's own players across games; opponents fall out here.
    let team_players: BTreeMap<PlayerId, String> = ctx
        .db
        .get_team_players(team.team_id)?
        .into_iter()
        .map(|p| (p.player_id, p.name))
        .collect();

    let mut totals: BTreeMap<PlayerId, StatLine> = BTreeMap::new();
    for line in per_game.into_iter().flatten() {
        if !team_players.contains_key(&line.player_id) {
            continue;
        }
        totals
            .entry(line.player_id)
            .and_modify(|acc| acc.merge(&line))
            .or_insert(line);
    }

    let mut rows: Vec<TeamStatsRow> = totals
        .into_values()
        .map(|line| TeamStatsRow {
            name: team_players
                .get(&line.player_id)
                .cloned()
                .unwrap_or_else(|| line.player_id.to_string()),
            line,
        })
        .collect();
    rows.sort_by(|a, b| b.line.points.cmp(&a.line.points));

    if as_json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "Team {}: {} finished game(s){}",
        team.name,
        games.len(),
        season_type
            .map(|st| format!(", {}", st))
            .unwrap_or_default()
    );
    println!(
        "{:<20} {:>3} {:>6} {:>4} {:>7} {:>7} {:>7} {:>4} {:>4} {:>4} {:>4} {:>4} {:>3} {:>4} {:>4} {:>4} {:>4}",
        "Player", "GP", "MIN", "PTS", "FG", "3P", "FT", "REB", "AST", "STL", "BLK", "TOV", "PF", "PFD", "EFF", "PIR", "+/-"
    );
    for row in &rows {
        let l = &row.line;
        println!(
            "{:<20} {:>3} {:>6} {:>4} {:>7} {:>7} {:>7} {:>4} {:>4} {:>4} {:>4} {:>4} {:>3} {:>4} {:>4} {:>4} {:>+4}",
            row.name,
            l.games_played,
            super::common::format_minutes(l.seconds),
            l.points,
            format!("{}/{}", l.fgm, l.fga),
            format!("{}/{}", l.fg3m, l.fg3a),
            format!("{}/{}", l.ftm, l.fta),
            l.reb,
            l.ast,
            l.stl,
            l.blk,
            l.tov,
            l.pf,
            l.pfd,
            l.eff,
            l.pir,
            l.plus_minus
        );
    }
    Ok(())
}
