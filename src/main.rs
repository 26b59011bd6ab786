//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use courtside::{
    cli::{Commands, Courtside},
    commands::{
        import_game::handle_import, intervals::handle_intervals, live_status::handle_live_status,
        team_stats::handle_team_stats,
    },
    Result,
};

/// Run the CLI.
fn main() -> Result<()> {
    let app = Courtside::parse();

    match app.command {
        Commands::Import {
            files,
            season_type,
            duration,
            quarters,
            verbose,
        } => handle_import(files, season_type, duration, quarters, verbose)?,

        Commands::TeamStats {
            team,
            team_id,
            season_type,
            json,
        } => handle_team_stats(team, team_id, season_type, json)?,

        Commands::Live { game_id, json } => handle_live_status(game_id, json)?,

        Commands::Intervals {
            game_id,
            player_id,
            json,
        } => handle_intervals(game_id, player_id, json)?,
    }

    Ok(())
}
