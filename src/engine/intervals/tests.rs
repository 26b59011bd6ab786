//! Unit tests for interval reconstruction

use super::*;
use crate::cli::types::GameId;
use chrono::{Duration, TimeZone};
use std::collections::BTreeSet;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 19, 0, 0).unwrap()
}

fn ts(secs: i64) -> DateTime<Utc> {
    start() + Duration::seconds(secs)
}

fn meta(is_finished: bool) -> GameMeta {
    GameMeta {
        game_id: GameId::new(1),
        period_length_secs: 600,
        periods: 4,
        game_start: start(),
        is_finished,
    }
}

fn roster(home: &[i64], away: &[i64], starters: &[i64]) -> RosterContext {
    RosterContext::new(
        home.iter().copied().map(PlayerId::new).collect(),
        away.iter().copied().map(PlayerId::new).collect(),
        starters.iter().copied().map(PlayerId::new).collect(),
    )
}

fn sub(player: i64, period: u8, secs: i64, kind: ActionKind, seq: u32) -> GameEvent {
    GameEvent {
        game_id: GameId::new(1),
        player_id: PlayerId::new(player),
        period: Period::new(period),
        timestamp: ts(secs),
        kind,
        seq,
    }
}

#[test]
fn test_simple_enter_exit_pair() {
    let events = vec![
        sub(1, 1, 0, ActionKind::SubIn, 1),
        sub(1, 1, 300, ActionKind::SubOut, 2),
    ];
    let set = build_intervals(&events, &roster(&[1], &[2], &[]), &meta(true)).unwrap();

    let ivs = set.for_player(PlayerId::new(1));
    assert_eq!(ivs.len(), 1);
    assert_eq!(ivs[0].enter_time, ts(0));
    assert_eq!(ivs[0].exit_time, Some(ts(300)));
    assert!(ivs[0].contains(ts(150)));
    assert!(ivs[0].contains(ts(0)));
    assert!(ivs[0].contains(ts(300)));
    assert!(!ivs[0].contains(ts(301)));
    assert!((ivs[0].duration_secs(ts(9999)) - 300.0).abs() < f64::EPSILON);
}

#[test]
fn test_starter_seeded_at_period_start() {
    // Starter with no explicit enter: interval starts at period start.
    let events = vec![sub(1, 1, 200, ActionKind::SubOut, 1)];
    let set = build_intervals(&events, &roster(&[1], &[2], &[1]), &meta(true)).unwrap();

    let ivs = set.for_player(PlayerId::new(1));
    assert_eq!(ivs[0].enter_time, ts(0));
    assert_eq!(ivs[0].exit_time, Some(ts(200)));
}

#[test]
fn test_missing_exit_closed_at_period_end() {
    let events = vec![sub(1, 1, 100, ActionKind::SubIn, 1)];
    let set = build_intervals(&events, &roster(&[1], &[2], &[]), &meta(true)).unwrap();

    let ivs = set.for_player(PlayerId::new(1));
    // Closed at the end of period 1, then carried over through the
    // remaining periods of the finished game.
    assert_eq!(ivs[0].enter_time, ts(100));
    assert_eq!(ivs[0].exit_time, Some(ts(600)));
    assert_eq!(ivs.len(), 4);
    assert_eq!(ivs[3].enter_time, ts(1800));
    assert_eq!(ivs[3].exit_time, Some(ts(2400)));
    assert!(ivs.iter().all(|iv| !iv.is_open()));
}

#[test]
fn test_duplicate_enter_is_counted_noop() {
    let events = vec![
        sub(1, 1, 0, ActionKind::SubIn, 1),
        sub(1, 1, 50, ActionKind::SubIn, 2),
        sub(1, 1, 100, ActionKind::SubOut, 3),
    ];
    let set = build_intervals(&events, &roster(&[1], &[2], &[]), &meta(true)).unwrap();

    let ivs = set.for_player(PlayerId::new(1));
    assert_eq!(ivs.len(), 1);
    assert_eq!(ivs[0].enter_time, ts(0));
    assert_eq!(ivs[0].exit_time, Some(ts(100)));
    assert_eq!(set.diagnostics().duplicate_enters, 1);
}

#[test]
fn test_orphan_exit_is_counted_noop() {
    let events = vec![
        sub(1, 1, 10, ActionKind::SubOut, 1),
        sub(1, 1, 20, ActionKind::SubIn, 2),
        sub(1, 1, 120, ActionKind::SubOut, 3),
    ];
    let set = build_intervals(&events, &roster(&[1], &[2], &[]), &meta(true)).unwrap();

    let ivs = set.for_player(PlayerId::new(1));
    assert_eq!(ivs.len(), 1);
    assert_eq!(ivs[0].enter_time, ts(20));
    assert_eq!(set.diagnostics().orphan_exits, 1);
}

#[test]
fn test_nonpositive_interval_dropped() {
    // Out-of-order timestamps produce exit <= enter; such an interval is
    // dropped, not stored.
    let events = vec![
        sub(1, 1, 100, ActionKind::SubIn, 1),
        sub(1, 1, 100, ActionKind::SubOut, 2),
    ];
    let set = build_intervals(&events, &roster(&[1], &[2], &[]), &meta(true)).unwrap();

    assert!(set.for_player(PlayerId::new(1)).is_empty());
    assert_eq!(set.diagnostics().dropped_nonpositive, 1);
}

#[test]
fn test_intervals_nonoverlapping_and_sorted() {
    let events = vec![
        sub(1, 1, 0, ActionKind::SubIn, 1),
        sub(1, 1, 120, ActionKind::SubOut, 2),
        sub(1, 1, 240, ActionKind::SubIn, 3),
        sub(1, 1, 400, ActionKind::SubOut, 4),
        sub(1, 2, 700, ActionKind::SubIn, 5),
        sub(1, 2, 900, ActionKind::SubOut, 6),
    ];
    let set = build_intervals(&events, &roster(&[1], &[2], &[]), &meta(true)).unwrap();

    let ivs = set.for_player(PlayerId::new(1));
    assert_eq!(ivs.len(), 3);
    for pair in ivs.windows(2) {
        assert!(pair[0].enter_time <= pair[1].enter_time);
        if pair[0].period == pair[1].period {
            assert!(pair[0].exit_time.unwrap() <= pair[1].enter_time);
        }
    }
}

#[test]
fn test_unfinished_game_leaves_current_period_open() {
    let events = vec![sub(1, 1, 60, ActionKind::SubIn, 1)];
    let set = build_intervals(&events, &roster(&[1], &[2], &[]), &meta(false)).unwrap();

    let ivs = set.for_player(PlayerId::new(1));
    assert_eq!(ivs.len(), 1);
    assert!(ivs[0].is_open());
    assert_eq!(ivs[0].enter_time, ts(60));
    // Open intervals cover everything from the enter time onward.
    assert!(ivs[0].contains(ts(5000)));
}

#[test]
fn test_unfinished_game_closes_past_periods() {
    let events = vec![
        sub(1, 1, 60, ActionKind::SubIn, 1),
        sub(1, 2, 650, ActionKind::SubOut, 2),
    ];
    let set = build_intervals(&events, &roster(&[1], &[2], &[]), &meta(false)).unwrap();

    let ivs = set.for_player(PlayerId::new(1));
    // Period 1 closed at its boundary, carry-over into period 2 which is
    // then closed by the explicit exit.
    assert_eq!(ivs.len(), 2);
    assert_eq!(ivs[0].exit_time, Some(ts(600)));
    assert_eq!(ivs[1].enter_time, ts(600));
    assert_eq!(ivs[1].exit_time, Some(ts(650)));
}

#[test]
fn test_build_intervals_is_idempotent() {
    let events = vec![
        sub(1, 1, 0, ActionKind::SubIn, 1),
        sub(1, 1, 300, ActionKind::SubOut, 2),
        sub(2, 1, 30, ActionKind::SubIn, 3),
    ];
    let r = roster(&[1], &[2], &[]);
    let m = meta(true);

    let a = build_intervals(&events, &r, &m).unwrap();
    let b = build_intervals(&events, &r, &m).unwrap();

    let collect = |s: &IntervalSet| s.iter().copied().collect::<Vec<_>>();
    assert_eq!(collect(&a), collect(&b));
    assert_eq!(a.diagnostics(), b.diagnostics());
}

#[test]
fn test_empty_roster_rejected() {
    let events: Vec<GameEvent> = Vec::new();
    let r = RosterContext::new(BTreeSet::new(), BTreeSet::new(), BTreeSet::new());
    assert!(build_intervals(&events, &r, &meta(true)).is_err());
}

#[test]
fn test_covers_lookup() {
    let events = vec![
        sub(1, 1, 100, ActionKind::SubIn, 1),
        sub(1, 1, 200, ActionKind::SubOut, 2),
    ];
    let set = build_intervals(&events, &roster(&[1], &[2], &[]), &meta(true)).unwrap();

    assert!(set.covers(PlayerId::new(1), ts(100)));
    assert!(set.covers(PlayerId::new(1), ts(200)));
    assert!(!set.covers(PlayerId::new(1), ts(201)));
    assert!(!set.covers(PlayerId::new(2), ts(150)));
}
