//! Countdown-clock to absolute-timestamp mapping.
//!
//! External feeds record when something happened as a period-relative
//! countdown ("07:43 left in Q2"). The engine works on absolute
//! timestamps, so ingestion maps every reading onto the period grid of
//! [`ClockConfig`]. Malformed readings never fail the import: they fall
//! back to a synthetic timestamp derived from the event's position in
//! ingestion order, which keeps the event log totally ordered.

use crate::cli::types::Period;
use chrono::{DateTime, Duration, Utc};


/// Clock parameters for one game, passed explicitly at every call site.
#[derive(Debug, Clone, Copy)]
pub struct ClockConfig {
    pub period_length_secs: u32,
    pub game_start: DateTime<Utc>,
}

impl ClockConfig {
    pub fn new(period_length_secs: u32, game_start: DateTime<Utc>) -> Self {
        Self {
            period_length_secs,
            game_start,
        }
    }
}

/// An absolute timestamp plus the provenance of its derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappedInstant {
    /// Derived from a well-formed countdown reading.
    Clock(DateTime<Utc>),
    /// Fallback: `game_start + position` seconds, from ingestion order.
    Synthetic(DateTime<Utc>),
}

impl MappedInstant {
    pub fn instant(&self) -> DateTime<Utc> {
        match self {
            MappedInstant::Clock(t) | MappedInstant::Synthetic(t) => *t,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, MappedInstant::Synthetic(_))
    }
}

/// Map a countdown reading to an absolute timestamp.
///
/// A well-formed `MM:SS` (or `HH:MM:SS`) reading resolves to
/// `game_start + (period - 1) * period_length + elapsed_in_period` where
/// `elapsed_in_period = period_length - remaining`. A reading that does
/// not parse, or that claims more time remaining than the period holds,
/// resolves to the synthetic `game_start + position` seconds instead.
pub fn map_clock(
    cfg: &ClockConfig,
    period: Period,
    remaining: &str,
    position: usize,
) -> MappedInstant {
    match parse_countdown(remaining) {
        Some(remaining_secs) if remaining_secs <= cfg.period_length_secs => {
            let elapsed = cfg.period_length_secs - remaining_secs;
            let offset = i64::from(period.as_u8().saturating_sub(1))
                * i64::from(cfg.period_length_secs)
                + i64::from(elapsed);
            MappedInstant::Clock(cfg.game_start + Duration::seconds(offset))
        }
        _ => MappedInstant::Synthetic(cfg.game_start + Duration::seconds(position as i64)),
    }
}

/// Parse `MM:SS` or `HH:MM:SS` into total seconds remaining.
fn parse_countdown(s: &str) -> Option<u32> {
    let parts: Vec<&str> = s.trim().split(':').collect();
    match parts.as_slice() {
        [mm, ss] => {
            let minutes: u32 = mm.parse().ok()?;
            let seconds: u32 = ss.parse().ok()?;
            (seconds < 60).then_some(minutes * 60 + seconds)
        }
        [hh, mm, ss] => {
            let hours: u32 = hh.parse().ok()?;
            let minutes: u32 = mm.parse().ok()?;
            let seconds: u32 = ss.parse().ok()?;
            (minutes < 60 && seconds < 60).then_some(hours * 3600 + minutes * 60 + seconds)
        }
        _ => None,
    }
}
