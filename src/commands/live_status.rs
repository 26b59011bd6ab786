//! Live on-court status for one game.

use super::common::{format_minutes, game_name_map, load_game_context, CommandContext};
use crate::cli::types::GameId;
use crate::engine::intervals::build_intervals;
use crate::engine::live::LiveDurationTracker;
use crate::engine::types::ScoreState;
use crate::error::Result;
use chrono::Utc;

/// Show accumulated seconds per player and who is on court right now.
///
/// For a finished game every interval is closed, so the result is the
/// final playing-time table and an empty on-court set.
pub fn handle_live_status(game_id: GameId, as_json: bool) -> Result<()> {
    let ctx = CommandContext::new(false)?;
    let gc = load_game_context(&ctx.db, game_id)?;

    let intervals = build_intervals(&gc.events, &gc.roster, &gc.meta)?;
    let tracker = LiveDurationTracker::new(&intervals, Utc::now());
    let status = tracker.snapshot();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let names = game_name_map(&ctx.db, game_id)?;
    let name_of = |player_id| {
        names
            .get(&player_id)
            .cloned()
            .unwrap_or_else(|| format!("#{}", player_id))
    };

    let score = ScoreState::from_events(&gc.events, &gc.roster);
    println!(
        "Game {} ({}), score {}:{}",
        game_id,
        if gc.game.is_finished() { "finished" } else { "in progress" },
        score.home,
        score.away
    );
    if status.on_court.is_empty() {
        println!("Nobody on court");
    } else {
        let on_court: Vec<String> = status.on_court.iter().map(|&p| name_of(p)).collect();
        println!("On court: {}", on_court.join(", "));
    }
    for entry in &status.seconds {
        println!(
            "{:<20} {:>6}",
            name_of(entry.player_id),
            format_minutes(entry.seconds)
        );
    }
    Ok(())
}
