//! Board Scenario Tests
//!
//! End-to-end flows through the synchronizer with an in-memory store.

use kanban_core::{
    decode, ActionOutcome, BoardConfig, BoardSynchronizer, CardId, Direction, MemoryStore, MoveTriggers,
    SiblingBox, UserAction,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn load(store: MemoryStore, seed: u64) -> BoardSynchronizer<MemoryStore> {
    BoardSynchronizer::load(BoardConfig::default(), store, StdRng::seed_from_u64(seed)).expect("Failed to load board")
}

fn order(sync: &BoardSynchronizer<MemoryStore>, column: &str) -> Vec<CardId> {
    sync.column(column).unwrap().card_ids()
}

#[test]
fn test_add_move_delete_scenario() {
    let mut sync = load(MemoryStore::new(), 1);

    let outcome = sync.dispatch(UserAction::Add { column: "todo".to_string() }).unwrap();
    assert_eq!(outcome, ActionOutcome::Persisted);
    let card_id = order(&sync, "todo")[0].clone();
    let card = sync.card(&card_id).unwrap();
    assert_eq!(card.content, "New card");
    assert_eq!(card.move_triggers, Some(MoveTriggers { left: false, right: true }));

    sync.dispatch(UserAction::Move { card: card_id.clone(), direction: Direction::Right }).unwrap();
    assert_eq!(sync.count("todo"), Some(0));
    assert_eq!(sync.count("inprogress"), Some(1));
    assert_eq!(
        sync.card(&card_id).unwrap().move_triggers,
        Some(MoveTriggers { left: true, right: true })
    );

    sync.dispatch(UserAction::Delete { card: card_id }).unwrap();
    assert_eq!(sync.count("todo"), Some(0));
    assert_eq!(sync.count("inprogress"), Some(0));

    let raw = sync.store().inner().peek("kanban_board_v1").unwrap().to_string();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value["columns"],
        serde_json::json!({"todo": [], "inprogress": [], "done": []})
    );
}

#[test]
fn test_reload_restores_board() {
    let mut sync = load(MemoryStore::new(), 2);
    let a = sync.add("todo").unwrap();
    let b = sync.add("todo").unwrap();
    let c = sync.add("done").unwrap();
    sync.recolor_card(&a).unwrap();
    let ticket = sync.edit_content(&b, "Review PR".to_string(), 0).unwrap();
    assert!(sync.flush_edit(ticket));
    let before = sync.snapshot();

    let reloaded = load(sync.into_store(), 3);
    assert_eq!(reloaded.snapshot(), before);
    assert_eq!(order(&reloaded, "todo"), vec![b.clone(), a]);
    assert_eq!(reloaded.card(&b).unwrap().content, "Review PR");
    assert_eq!(
        reloaded.card(&c).unwrap().move_triggers,
        Some(MoveTriggers { left: true, right: false })
    );
    assert_eq!(reloaded.count("todo"), Some(2));
}

#[test]
fn test_ids_stay_unique_across_reload() {
    let mut sync = load(MemoryStore::new(), 4);
    let first: Vec<CardId> = (0..3).map(|_| sync.add("todo").unwrap()).collect();

    let mut reloaded = load(sync.into_store(), 5);
    let second = reloaded.add("todo").unwrap();
    assert!(!first.contains(&second));
    assert_eq!(second.as_str(), "c4");
}

#[test]
fn test_ids_unique_when_counter_is_lost() {
    let mut sync = load(MemoryStore::new(), 6);
    let a = sync.add("todo").unwrap();
    let b = sync.add("todo").unwrap();

    let board = sync.into_store().peek("kanban_board_v1").unwrap().to_string();
    let store = MemoryStore::new().with_entry("kanban_board_v1", &board);

    let mut reloaded = load(store, 7);
    let c = reloaded.add("todo").unwrap();
    assert_ne!(c, a);
    assert_ne!(c, b);
}

#[test]
fn test_failing_storage_keeps_session_working() {
    let mut sync = load(MemoryStore::failing(), 8);
    let ids: Vec<CardId> = (0..4).map(|_| sync.add("todo").unwrap()).collect();
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
    assert_eq!(sync.count("todo"), Some(4));
    assert!(sync.persisted().is_none());
}

#[test]
fn test_corrupt_snapshot_loads_empty() {
    let store = MemoryStore::new().with_entry("kanban_board_v1", "{\"columns\": [oops");
    let mut sync = load(store, 9);
    assert!(sync.snapshot().is_empty());
    assert_eq!(sync.count("todo"), Some(0));

    sync.add("done").unwrap();
    assert_eq!(sync.persisted().unwrap().card_count(), 1);
}

#[test]
fn test_snapshot_with_missing_fields() {
    let raw = r#"{"columns": {
        "todo": [{"id": "c1"}, {"id": "c1", "content": "dup"}],
        "archive": [{"id": "c9", "content": "lost"}],
        "done": [{"id": "c2", "content": "Done thing", "color": "hsl(100 80% 90%)"}]
    }}"#;
    let sync = load(MemoryStore::new().with_entry("kanban_board_v1", raw), 10);

    let c1 = sync.card(&CardId::from("c1")).unwrap();
    assert_eq!(c1.content, "New card");
    assert!(c1.color.starts_with("hsl("));
    assert_eq!(sync.count("todo"), Some(1));
    assert_eq!(sync.count("inprogress"), Some(0));
    assert!(sync.card(&CardId::from("c9")).is_none());
    assert_eq!(sync.card(&CardId::from("c2")).unwrap().color, "hsl(100 80% 90%)");
}

#[test]
fn test_drag_between_two_siblings() {
    let mut sync = load(MemoryStore::new(), 11);
    let c = sync.add("todo").unwrap();
    let b = sync.add("todo").unwrap();
    let a = sync.add("todo").unwrap();
    assert_eq!(order(&sync, "todo"), vec![a.clone(), b.clone(), c.clone()]);

    // a, b, c stacked at 0, 50, 100 (midpoints 20, 70, 120); pointer between b and c
    let siblings = vec![
        SiblingBox::new(a.clone(), 0.0, 40.0),
        SiblingBox::new(b.clone(), 50.0, 40.0),
        SiblingBox::new(c.clone(), 100.0, 40.0),
    ];
    sync.begin_drag(&a).unwrap();
    sync.drag_over("todo", 95.0, &siblings).unwrap();
    sync.end_drag();

    assert_eq!(order(&sync, "todo"), vec![b, a, c]);
    assert_eq!(sync.persisted().unwrap(), sync.snapshot());
}

#[test]
fn test_drop_without_hover_keeps_order() {
    let mut sync = load(MemoryStore::new(), 12);
    sync.add("todo").unwrap();
    let b = sync.add("todo").unwrap();
    let before = sync.snapshot();

    sync.begin_drag(&b).unwrap();
    assert!(sync.end_drag());
    assert_eq!(sync.snapshot(), before);
    assert_eq!(decode(sync.store().inner().peek("kanban_board_v1").unwrap()), before);
}

#[test]
fn test_abandoned_cross_column_drag_keeps_store_in_step() {
    let mut sync = load(MemoryStore::new(), 13);
    let a = sync.add("todo").unwrap();
    let b = sync.add("todo").unwrap();

    // source node detached mid-gesture: no drop, no dragend
    sync.begin_drag(&a).unwrap();
    sync.drag_over("done", 10.0, &[]).unwrap();
    sync.dispatch(UserAction::Add { column: "inprogress".to_string() }).unwrap();

    sync.begin_drag(&b).unwrap();
    assert!(sync.cancel_drag());

    assert_eq!(sync.column_of(&a), Some("todo"));
    assert_eq!(sync.persisted().unwrap(), sync.snapshot());

    let snapshot = sync.snapshot();
    let reloaded = load(sync.into_store(), 14);
    assert_eq!(reloaded.snapshot(), snapshot);
    assert_eq!(reloaded.count("done"), Some(0));
}
