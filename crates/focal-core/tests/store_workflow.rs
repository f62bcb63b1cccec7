//! Integration tests for the full store workflow.

use chrono::{Duration, Utc};
use focal_core::{
    Config, Database, EnergyLevel, Event, FocusStore, Phase, SessionOutcome, TaskType, TimeOfDay,
};

#[test]
fn recommendation_to_session_workflow() {
    let mut store = FocusStore::default();

    // No card until both context inputs are set.
    assert!(store.recommendation_card_at(TimeOfDay::Morning).is_none());
    store.set_energy(EnergyLevel::High);
    assert!(store.recommendation_card_at(TimeOfDay::Morning).is_none());
    store.set_task_type(TaskType::DeepWork);

    let card = store.recommendation_card_at(TimeOfDay::Morning).unwrap();
    assert_eq!(card.focus_secs, 60 * 60);

    // Accepting commits the suggestion and hides the card for good.
    store.accept_recommendation().unwrap();
    assert_eq!(store.initial_secs(), card.focus_secs);
    assert!(store.recommendation_card_at(TimeOfDay::Morning).is_none());

    // Run the session to completion; the cycle flips to the break phase.
    store.start_timer().unwrap();
    let started = store.session().started_at.unwrap();
    let event = store
        .tick_at(started + Duration::seconds(card.focus_secs as i64))
        .unwrap();
    match event {
        Event::SessionCompleted { phase, next_phase, next_secs, .. } => {
            assert_eq!(phase, Phase::Focus);
            assert_eq!(next_phase, Phase::Break);
            assert_eq!(next_secs, card.break_secs);
        }
        other => panic!("expected SessionCompleted, got {other:?}"),
    }
    assert_eq!(store.phase(), Phase::Break);
    assert_eq!(store.initial_secs(), card.break_secs);
}

#[test]
fn rejected_card_stays_away_across_sessions() {
    let mut store = FocusStore::default();
    store.set_energy(EnergyLevel::Medium);
    store.set_task_type(TaskType::Creative);
    store.reject_recommendation().unwrap();

    store.start_timer().unwrap();
    store.cancel_timer().unwrap();
    store.start_timer().unwrap();
    store.skip_timer().unwrap();

    assert!(store.recommendation_card_at(TimeOfDay::Afternoon).is_none());
    assert!(store.flags().show_time_adjust);
}

#[test]
fn store_survives_a_kv_roundtrip() {
    let db = Database::open_memory().unwrap();

    let mut store = FocusStore::from_config(&Config::default());
    store.set_energy(EnergyLevel::Low);
    store.set_task_type(TaskType::Admin);
    store.reject_recommendation().unwrap();
    store.start_timer().unwrap();

    let json = serde_json::to_string(&store).unwrap();
    db.kv_set("focus_store", &json).unwrap();

    let raw = db.kv_get("focus_store").unwrap().unwrap();
    let restored: FocusStore = serde_json::from_str(&raw).unwrap();
    assert_eq!(restored, store);
    assert!(restored.is_active());
    assert!(restored.has_dismissed_recommendation_card());
}

#[test]
fn corrupt_kv_payload_fails_loudly_enough_to_fall_back() {
    let db = Database::open_memory().unwrap();
    db.kv_set("focus_store", "{not json").unwrap();

    let raw = db.kv_get("focus_store").unwrap().unwrap();
    assert!(serde_json::from_str::<FocusStore>(&raw).is_err());
}

#[test]
fn finished_sessions_land_in_the_history() {
    let db = Database::open_memory().unwrap();
    let mut store = FocusStore::default();

    store.start_timer().unwrap();
    if let Some(Event::SessionCancelled { session_id, phase, initial_secs, started_at, at }) =
        store.cancel_timer()
    {
        db.record_session(
            &session_id,
            phase,
            SessionOutcome::Cancelled,
            initial_secs,
            store.session().user_accepted_recommendation,
            started_at,
            at,
        )
        .unwrap();
    } else {
        panic!("expected SessionCancelled");
    }

    let stats = db.stats_all().unwrap();
    assert_eq!(stats.total_sessions, 1);
    assert_eq!(stats.cancelled_sessions, 1);

    let records = db.list_recent(5).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].outcome, "cancelled");
    assert!(records[0].ended_at >= records[0].started_at);
    assert!(records[0].ended_at <= Utc::now());
}
