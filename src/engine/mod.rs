//! Timeline reconstruction and derived-statistics engine.
//!
//! The engine turns a game's append-only event log into derived,
//! recomputed-on-demand outputs, organized as a small pipeline:
//! - `clock`: countdown-clock readings to absolute timestamps
//! - `intervals`: substitution events to on-court intervals
//! - `live`: interval sets to accumulated seconds and on-court status
//! - `plus_minus`: scoring events + intervals to net score swings
//! - `boxscore`: raw action counts to box-score totals and EFF/PIR
//!
//! All computation is synchronous and side-effect free; callers hand in
//! already-materialized events, roster and metadata.

pub mod boxscore;
pub mod clock;
pub mod intervals;
pub mod live;
pub mod plus_minus;
pub mod types;

pub use boxscore::{BoxScore, StatLine};
pub use clock::{map_clock, ClockConfig, MappedInstant};
pub use intervals::{build_intervals, IntervalDiagnostics, IntervalSet, OnCourtInterval};
pub use live::{LiveDurationTracker, LiveStatus, PlayerSeconds};
pub use plus_minus::{game_plus_minus, plus_minus, AttributionSkipped, PlusMinusReport};
pub use types::{
    sort_game_order, ActionKind, GameEvent, GameMeta, RosterContext, ScoreState, Side,
};
