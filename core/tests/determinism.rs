//! THE MOST IMPORTANT TEST IN THE PROJECT.
//!
//! Two engines, same seed, same operations.
//! They must produce byte-identical event logs and state documents.
//! Any divergence is a blocker — do not merge until fixed.

use lifesim_core::{config::GameConfig, engine::GameEngine, store::GameStore};

fn build_engine(seed: u64) -> GameEngine {
    let store = GameStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    let run_id = format!("det-test-{seed}");
    GameEngine::build(run_id, seed, GameConfig::default_test(), store).expect("engine")
}

fn collect_event_log(engine: &GameEngine) -> Vec<String> {
    // Collect all event payloads in day+id order.
    // Reading the store directly is acceptable in tests — production
    // code goes through the engine API.
    (0..=engine.state.calendar.day_count)
        .flat_map(|day| {
            engine
                .store_events_for_day(day)
                .expect("read events")
                .into_iter()
                .map(|e| e.payload)
        })
        .collect()
}

#[test]
fn same_seed_produces_identical_event_logs() {
    const SEED: u64 = 0xDEAD_BEEF_CAFE_1234;
    const DAYS: u64 = 336; // one in-game year

    let mut engine_a = build_engine(SEED);
    let mut engine_b = build_engine(SEED);

    engine_a.advance_days(DAYS).expect("engine_a run");
    engine_b.advance_days(DAYS).expect("engine_b run");

    let log_a = collect_event_log(&engine_a);
    let log_b = collect_event_log(&engine_b);

    assert_eq!(
        log_a.len(),
        log_b.len(),
        "Event log lengths differ: {} vs {}",
        log_a.len(),
        log_b.len()
    );

    for (i, (a, b)) in log_a.iter().zip(log_b.iter()).enumerate() {
        assert_eq!(a, b, "Event log diverged at entry {i}:\n  A: {a}\n  B: {b}");
    }

    let doc_a = serde_json::to_string(&engine_a.state).expect("doc a");
    let doc_b = serde_json::to_string(&engine_b.state).expect("doc b");
    assert_eq!(doc_a, doc_b, "Final state documents diverged");
}

#[test]
fn different_seeds_produce_different_logs() {
    let mut engine_a = build_engine(42);
    let mut engine_b = build_engine(99);

    engine_a.advance_days(90).expect("run a");
    engine_b.advance_days(90).expect("run b");

    // Different seeds must be observable — the weather stream alone
    // should diverge within 90 days.
    let log_a = collect_event_log(&engine_a);
    let log_b = collect_event_log(&engine_b);

    let any_different = log_a.iter().zip(log_b.iter()).any(|(a, b)| a != b);
    assert!(
        any_different,
        "Different seeds produced identical logs — seed is not being used"
    );
}

#[test]
fn player_actions_do_not_disturb_daily_streams() {
    use lifesim_core::action::PlayerAction;

    const SEED: u64 = 7;

    let mut engine_a = build_engine(SEED);
    let mut engine_b = build_engine(SEED);

    engine_a.advance_days(10).expect("run a");

    // Engine B takes a rejected action every day; daily randomness must
    // be unaffected because actions never roll dice.
    for _ in 0..10 {
        engine_b.advance_day().expect("day b");
        engine_b
            .dispatch(&PlayerAction::Travel {
                destination: "Atlantis".to_string(),
            })
            .expect("dispatch");
    }

    assert_eq!(
        serde_json::to_string(&engine_a.state.calendar).unwrap(),
        serde_json::to_string(&engine_b.state.calendar).unwrap(),
        "calendar streams diverged"
    );
    assert_eq!(
        serde_json::to_string(&engine_a.state.trade.market).unwrap(),
        serde_json::to_string(&engine_b.state.trade.market).unwrap(),
        "market streams diverged"
    );
}
