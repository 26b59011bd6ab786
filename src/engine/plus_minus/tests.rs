//! Unit tests for plus-minus attribution

use super::*;
use crate::cli::types::{GameId, Period};
use crate::engine::intervals::build_intervals;
use crate::engine::types::{ActionKind, GameMeta};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 19, 0, 0).unwrap()
}

fn ts(secs: i64) -> DateTime<Utc> {
    start() + Duration::seconds(secs)
}

fn event(player: i64, secs: i64, kind: ActionKind, seq: u32) -> GameEvent {
    GameEvent {
        game_id: GameId::new(1),
        player_id: PlayerId::new(player),
        period: Period::new(1),
        timestamp: ts(secs),
        kind,
        seq,
    }
}

fn meta() -> GameMeta {
    GameMeta {
        game_id: GameId::new(1),
        period_length_secs: 600,
        periods: 1,
        game_start: start(),
        is_finished: true,
    }
}

fn roster(home: &[i64], away: &[i64]) -> RosterContext {
    RosterContext::new(
        home.iter().copied().map(PlayerId::new).collect(),
        away.iter().copied().map(PlayerId::new).collect(),
        Default::default(),
    )
}

#[test]
fn test_cross_team_attribution() {
    // Home player A (1) scores a two while alone on court; away player
    // B (2) scores a three while B and home player C (3) are on court.
    let roster = roster(&[1, 3], &[2]);
    let events = vec![
        event(1, 10, ActionKind::SubIn, 1),
        event(1, 100, ActionKind::SubOut, 3),
        event(3, 150, ActionKind::SubIn, 4),
        event(2, 150, ActionKind::SubIn, 5),
        event(1, 50, ActionKind::TwoPtMade, 2),
        event(2, 200, ActionKind::ThreePtMade, 6),
        event(3, 300, ActionKind::SubOut, 7),
        event(2, 300, ActionKind::SubOut, 8),
    ];
    let intervals = build_intervals(&events, &roster, &meta()).unwrap();

    let home = plus_minus(Side::Home, &roster, &intervals, &events);
    assert_eq!(home.value(PlayerId::new(1)), 2);
    assert_eq!(home.value(PlayerId::new(3)), -3);

    let away = plus_minus(Side::Away, &roster, &intervals, &events);
    assert_eq!(away.value(PlayerId::new(2)), 3);

    let both = game_plus_minus(&roster, &intervals, &events);
    assert_eq!(both.value(PlayerId::new(1)), 2);
    assert_eq!(both.value(PlayerId::new(2)), 3);
    assert_eq!(both.value(PlayerId::new(3)), -3);
    assert!(both.skipped.is_empty());
}

#[test]
fn test_zero_sum_with_one_player_per_side() {
    // Exactly one player per team on court for the whole period: each
    // scoring event moves their values by equal and opposite amounts.
    let roster = roster(&[1], &[2]);
    let events = vec![
        event(1, 0, ActionKind::SubIn, 1),
        event(2, 0, ActionKind::SubIn, 2),
        event(1, 30, ActionKind::TwoPtMade, 3),
        event(2, 60, ActionKind::FtMade, 4),
        event(1, 90, ActionKind::ThreePtMade, 5),
    ];
    let intervals = build_intervals(&events, &roster, &meta()).unwrap();
    let report = game_plus_minus(&roster, &intervals, &events);

    assert_eq!(
        report.value(PlayerId::new(1)),
        -report.value(PlayerId::new(2))
    );
    assert_eq!(report.value(PlayerId::new(1)), 4); // +2 -1 +3
}

#[test]
fn test_player_substituted_at_scoring_instant_is_credited() {
    // Interval bounds are inclusive: an exit at exactly the scoring
    // instant still counts.
    let roster = roster(&[1, 3], &[2]);
    let events = vec![
        event(3, 0, ActionKind::SubIn, 1),
        event(3, 100, ActionKind::SubOut, 2),
        event(1, 100, ActionKind::TwoPtMade, 3),
    ];
    let intervals = build_intervals(&events, &roster, &meta()).unwrap();

    let report = plus_minus(Side::Home, &roster, &intervals, &events);
    assert_eq!(report.value(PlayerId::new(3)), 2);
}

#[test]
fn test_off_court_scorer_not_credited() {
    // A scoring event with no covering interval moves nobody; the score
    // delta simply has no on-court witnesses on this roster.
    let roster = roster(&[1], &[2]);
    let events = vec![event(1, 50, ActionKind::TwoPtMade, 1)];
    let intervals = build_intervals(&events, &roster, &meta()).unwrap();

    let report = plus_minus(Side::Home, &roster, &intervals, &events);
    assert_eq!(report.value(PlayerId::new(1)), 0);
}

#[test]
fn test_unrostered_scorer_is_skipped_not_fatal() {
    let roster = roster(&[1], &[2]);
    let events = vec![
        event(1, 0, ActionKind::SubIn, 1),
        event(99, 50, ActionKind::TwoPtMade, 2),
        event(1, 80, ActionKind::FtMade, 3),
    ];
    let intervals = build_intervals(&events, &roster, &meta()).unwrap();

    let report = plus_minus(Side::Home, &roster, &intervals, &events);
    // The unattributable event is recorded and the walk continues.
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].player_id, PlayerId::new(99));
    assert_eq!(report.skipped[0].reason, SkipReason::UnrosteredPlayer);
    assert_eq!(report.value(PlayerId::new(1)), 1);
}

#[test]
fn test_non_scoring_events_ignored() {
    let roster = roster(&[1], &[2]);
    let events = vec![
        event(1, 0, ActionKind::SubIn, 1),
        event(1, 10, ActionKind::TwoPtMiss, 2),
        event(1, 20, ActionKind::Steal, 3),
        event(1, 30, ActionKind::Turnover, 4),
    ];
    let intervals = build_intervals(&events, &roster, &meta()).unwrap();

    let report = plus_minus(Side::Home, &roster, &intervals, &events);
    assert_eq!(report.value(PlayerId::new(1)), 0);
    assert!(report.skipped.is_empty());
}

#[test]
fn test_every_roster_player_has_a_value() {
    let roster = roster(&[1, 3], &[2]);
    let events = vec![event(1, 0, ActionKind::SubIn, 1)];
    let intervals = build_intervals(&events, &roster, &meta()).unwrap();

    let report = game_plus_minus(&roster, &intervals, &events);
    assert_eq!(report.values.len(), 3);
    assert!(report.values.values().all(|&v| v == 0));
}
