//! Integration tests: storage feeding the engine through the public API

use chrono::{DateTime, Duration, TimeZone, Utc};
use courtside::commands::common::{compute_game_lines, load_game_context};
use courtside::engine::{build_intervals, ActionKind};
use courtside::storage::{GameStatus, StatDatabase};
use courtside::{GameId, Period, SeasonType};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 19, 0, 0).unwrap()
}

struct Fixture {
    db: StatDatabase,
    game_id: GameId,
    alice: courtside::PlayerId,
    bea: courtside::PlayerId,
    cora: courtside::PlayerId,
}

/// Two-team game: Alice and Cora at home, Bea away. Alice and Bea start.
fn fixture(status: GameStatus) -> Fixture {
    let mut db = StatDatabase::new_in_memory().unwrap();
    let home = db.get_or_create_team("Hawks").unwrap();
    let away = db.get_or_create_team("Wolves").unwrap();
    let alice = db.get_or_create_player(home.team_id, "Alice").unwrap();
    let cora = db.get_or_create_player(home.team_id, "Cora").unwrap();
    let bea = db.get_or_create_player(away.team_id, "Bea").unwrap();

    let game_id = db
        .insert_game(
            home.team_id,
            away.team_id,
            start(),
            40,
            4,
            status,
            SeasonType::Regular,
        )
        .unwrap();
    db.add_game_player(game_id, alice.player_id, true).unwrap();
    db.add_game_player(game_id, bea.player_id, true).unwrap();
    db.add_game_player(game_id, cora.player_id, false).unwrap();

    Fixture {
        db,
        game_id,
        alice: alice.player_id,
        bea: bea.player_id,
        cora: cora.player_id,
    }
}

fn insert(
    f: &mut Fixture,
    player: courtside::PlayerId,
    period: u8,
    secs: i64,
    kind: ActionKind,
) {
    f.db.insert_event(
        f.game_id,
        player,
        Period::new(period),
        start() + Duration::seconds(secs),
        kind,
    )
    .unwrap();
}

#[test]
fn full_pipeline_produces_stat_lines() {
    let mut f = fixture(GameStatus::Finished);
    let (alice, bea, cora) = (f.alice, f.bea, f.cora);

    // Alice plays the first 200s, scoring a two and drawing a foul.
    insert(&mut f, alice, 1, 30, ActionKind::TwoPtMade);
    insert(&mut f, alice, 1, 40, ActionKind::FoulDrawn);
    insert(&mut f, alice, 1, 200, ActionKind::SubOut);
    // Cora replaces her and misses a three.
    insert(&mut f, cora, 1, 200, ActionKind::SubIn);
    insert(&mut f, cora, 1, 260, ActionKind::ThreePtMiss);
    insert(&mut f, cora, 1, 300, ActionKind::SubOut);
    // Bea plays on alone and hits a three after Cora leaves.
    insert(&mut f, bea, 1, 400, ActionKind::ThreePtMade);

    let gc = load_game_context(&f.db, f.game_id).unwrap();
    let lines = compute_game_lines(&gc, Utc::now()).unwrap();
    assert_eq!(lines.len(), 3);

    let line_of = |p| lines.iter().find(|l| l.player_id == p).unwrap();

    let a = line_of(alice);
    assert_eq!(a.points, 2);
    assert_eq!(a.pfd, 1);
    assert!((a.seconds - 200.0).abs() < f64::EPSILON);
    // Alice saw her own two and nothing else.
    assert_eq!(a.plus_minus, 2);
    assert_eq!(a.pir, 2 + 1);

    let c = line_of(cora);
    assert_eq!(c.fga, 1);
    assert_eq!(c.fgm, 0);
    assert_eq!(c.eff, -1);
    assert!((c.seconds - 100.0).abs() < f64::EPSILON);
    // Nobody scored during Cora's shift.
    assert_eq!(c.plus_minus, 0);

    let b = line_of(bea);
    // Bea (starter, never subbed out) carries through all four periods.
    assert!((b.seconds - 2400.0).abs() < f64::EPSILON);
    // Bea was on court for Alice's two (-2) and her own three (+3).
    assert_eq!(b.plus_minus, 1);
    assert_eq!(b.points, 3);
}

#[test]
fn deleting_a_game_invalidates_everything_derived() {
    let mut f = fixture(GameStatus::Finished);
    let alice = f.alice;
    insert(&mut f, alice, 1, 30, ActionKind::TwoPtMade);

    f.db.delete_game(f.game_id).unwrap();
    assert!(load_game_context(&f.db, f.game_id).is_err());
    assert!(f.db.get_game_events(f.game_id).unwrap().is_empty());
}

#[test]
fn live_game_reports_open_intervals() {
    let mut f = fixture(GameStatus::Live);
    let alice = f.alice;
    insert(&mut f, alice, 1, 0, ActionKind::SubIn);

    let gc = load_game_context(&f.db, f.game_id).unwrap();
    let set = build_intervals(&gc.events, &gc.roster, &gc.meta).unwrap();

    // Starter Bea and re-entered Alice both open; the game is not
    // finished so nothing closes at the period boundary yet.
    let alice_ivs = set.for_player(alice);
    assert_eq!(alice_ivs.len(), 1);
    assert!(alice_ivs[0].is_open());
    let bea_ivs = set.for_player(f.bea);
    assert_eq!(bea_ivs.len(), 1);
    assert!(bea_ivs[0].is_open());
}

#[test]
fn event_log_is_append_only_and_stable() {
    let mut f = fixture(GameStatus::Finished);
    let (alice, bea) = (f.alice, f.bea);

    // Arrival order differs from clock order.
    insert(&mut f, alice, 1, 500, ActionKind::TwoPtMade);
    insert(&mut f, bea, 1, 100, ActionKind::Steal);
    insert(&mut f, alice, 1, 100, ActionKind::Turnover);

    let events = f.db.get_game_events(f.game_id).unwrap();
    assert_eq!(events.len(), 3);
    assert!(events.windows(2).all(|w| w[0].seq < w[1].seq));

    // Canonical order: the two t=100 events keep their arrival order.
    let mut ordered = events.clone();
    courtside::engine::sort_game_order(&mut ordered);
    assert_eq!(ordered[0].kind, ActionKind::Steal);
    assert_eq!(ordered[1].kind, ActionKind::Turnover);
    assert_eq!(ordered[2].kind, ActionKind::TwoPtMade);
}
