//! Batch play-by-play import command.

use super::common::CommandContext;
use crate::cli::types::SeasonType;
use crate::core::cache::GLOBAL_CACHE;
use crate::error::Result;
use crate::ingest::{import_game, ImportConfig, ImportOutcome};
use std::path::PathBuf;

/// Import each CSV file as one game, printing a per-file line and a
/// final summary.
pub fn handle_import(
    files: Vec<PathBuf>,
    season_type: SeasonType,
    duration: u32,
    quarters: u8,
    verbose: bool,
) -> Result<()> {
    let mut ctx = CommandContext::new(verbose)?;
    let cfg = ImportConfig {
        duration_minutes: duration,
        quarters,
        season_type,
    };

    let mut imported = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for path in &files {
        match import_game(&mut ctx.db, path, &cfg) {
            Ok(ImportOutcome::Imported(summary)) => {
                imported += 1;
                println!(
                    "  ok   {} -> game {} ({} vs {}, {} events)",
                    path.display(),
                    summary.game_id,
                    summary.home_team,
                    summary.away_team,
                    summary.events
                );
                if verbose && summary.synthetic_clock > 0 {
                    println!(
                        "       {} events fell back to synthetic timestamps",
                        summary.synthetic_clock
                    );
                }
                if verbose && summary.skipped_rows > 0 {
                    println!("       {} rows skipped", summary.skipped_rows);
                }
            }
            Ok(ImportOutcome::Duplicate(game_id)) => {
                skipped += 1;
                println!("  skip {} (already imported as game {})", path.display(), game_id);
            }
            Ok(ImportOutcome::Empty) => {
                skipped += 1;
                println!("  skip {} (empty file)", path.display());
            }
            Err(e) => {
                failed += 1;
                eprintln!("  fail {}: {:#}", path.display(), e);
            }
        }
    }

    // Imported games change what derived rows mean; start fresh.
    GLOBAL_CACHE.clear();

    println!(
        "Import finished: {} imported, {} skipped, {} failed",
        imported, skipped, failed
    );
    Ok(())
}
