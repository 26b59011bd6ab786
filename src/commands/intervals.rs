//! On-court interval listing for one game.

use super::common::{format_minutes, game_name_map, load_game_context, CommandContext};
use crate::cli::types::{GameId, PlayerId};
use crate::engine::intervals::{build_intervals, OnCourtInterval};
use crate::error::Result;
use chrono::Utc;

/// Print the reconstructed on-court intervals of a game, optionally for
/// a single player.
pub fn handle_intervals(game_id: GameId, player_id: Option<PlayerId>, as_json: bool) -> Result<()> {
    let ctx = CommandContext::new(false)?;
    let gc = load_game_context(&ctx.db, game_id)?;

    let set = build_intervals(&gc.events, &gc.roster, &gc.meta)?;
    let intervals: Vec<OnCourtInterval> = set
        .iter()
        .filter(|iv| player_id.map_or(true, |p| iv.player_id == p))
        .copied()
        .collect();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&intervals)?);
        return Ok(());
    }

    let names = game_name_map(&ctx.db, game_id)?;
    let now = Utc::now();
    println!(
        "{:<20} {:>2} {:>25} {:>25} {:>8}",
        "Player", "Q", "Enter", "Exit", "Secs"
    );
    for iv in &intervals {
        let name = names
            .get(&iv.player_id)
            .cloned()
            .unwrap_or_else(|| format!("#{}", iv.player_id));
        println!(
            "{:<20} {:>2} {:>25} {:>25} {:>8}",
            name,
            iv.period,
            iv.enter_time.to_rfc3339(),
            iv.exit_time
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "(on court)".to_string()),
            format_minutes(iv.duration_secs(now))
        );
    }

    let diag = set.diagnostics();
    if !diag.is_clean() {
        println!(
            "Data quality: {} duplicate enters, {} orphan exits, {} dropped intervals",
            diag.duplicate_enters, diag.orphan_exits, diag.dropped_nonpositive
        );
    }
    Ok(())
}
