//! Courtside: basketball game tracking and statistics
//!
//! A Rust library and CLI that stores basketball games as append-only
//! event logs (shots, rebounds, fouls, substitutions) and reconstructs
//! everything else on demand: who was on court at any instant, how long
//! each player stayed there, and how the score moved while they were
//! present.
//!
//! ## Features
//!
//! - **Timeline Reconstruction**: on-court intervals rebuilt from paired
//!   enter/exit events, tolerant of missing or duplicated substitutions
//! - **Clock Mapping**: countdown-clock readings mapped to absolute
//!   timestamps, with a synthetic ordering fallback for malformed clocks
//! - **Derived Metrics**: playing time, box-score totals, EFF, PIR and
//!   plus-minus, recomputed from the event log on every request
//! - **Play-by-play Import**: CSV feeds become games, teams, players and
//!   events with de-duplication on re-import
//! - **Local Storage**: SQLite database of teams, players, games and
//!   their event logs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use courtside::{GameId, commands::live_status::handle_live_status};
//!
//! # fn example() -> courtside::Result<()> {
//! // Print who is on court and everyone's minutes for game 17
//! handle_live_status(GameId::new(17), false)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Override the database location (defaults to the platform data dir):
//! ```bash
//! export COURTSIDE_DB=/tmp/courtside.db
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{GameId, Period, PlayerId, SeasonType, TeamId};
pub use engine::{ActionKind, GameEvent, OnCourtInterval, StatLine};
pub use error::{CourtsideError, Result};

pub const DB_PATH_ENV_VAR: &str = "COURTSIDE_DB";
