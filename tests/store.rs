use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use td::clock::{Clock, FixedClock};
use td::state::State;
use td::task::{sort_tasks, ListFilter};
use td::{init_project, slugify, Error, Task, TaskStore};

fn setup() -> (TempDir, TaskStore) {
    let dir = TempDir::new().expect("tempdir");
    let root = init_project(dir.path()).expect("init");
    let store = TaskStore::open(root).expect("open");
    (dir, store)
}

fn create(store: &TaskStore, clock: &dyn Clock, title: &str, state: State) -> Task {
    let id = store
        .resolve_unique_id(&slugify(title))
        .expect("unique id");
    let task = Task::new(id, title, state, clock.now());
    store.create(&task).expect("create");
    task
}

#[test]
fn filter_done_then_sort_matches_listing_rules() {
    let (_dir, store) = setup();
    let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap());
    create(&store, &clock, "A", State::Active);
    create(&store, &clock, "B", State::Done);
    create(&store, &clock, "C", State::Focus);
    create(&store, &clock, "D", State::Later);

    let mut tasks = store.load_all().expect("load_all");
    ListFilter::default().apply(&mut tasks);
    sort_tasks(&mut tasks);

    let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "a", "d"]);
}

#[test]
fn state_transition_round_trips_with_injected_clock() {
    let (_dir, store) = setup();
    let created = FixedClock(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    let later = FixedClock(Utc.with_ymd_and_hms(2026, 2, 1, 12, 30, 0).unwrap());

    let mut task = create(&store, &created, "Ship it", State::Active);
    task.set_state(State::Done, later.now());
    store.save(&task).expect("save");

    let loaded = store.load("ship-it").expect("load");
    assert_eq!(loaded, task);
    assert_eq!(loaded.created, created.now());
    assert_eq!(loaded.updated, later.now());
}

#[test]
fn record_is_human_editable_yaml() {
    let (_dir, store) = setup();
    let clock = FixedClock(Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap());
    let mut task = create(&store, &clock, "Edit me", State::Later);
    task.notes = Some(String::new());
    store.save(&task).expect("save");

    let text = std::fs::read_to_string(store.record_path("edit-me")).expect("read");
    assert!(text.contains("id: edit-me"), "{text}");
    assert!(text.contains("state: later"), "{text}");
    assert!(text.contains("notes: ''"), "{text}");
    assert!(text.contains("2026-03-04T05:06:07Z"), "{text}");

    let edited = text.replace("state: later", "state: focus");
    std::fs::write(store.record_path("edit-me"), edited).expect("write");
    assert_eq!(store.load("edit-me").expect("load").state, State::Focus);
}

#[test]
fn hand_edited_invalid_state_is_corrupt() {
    let (_dir, store) = setup();
    let clock = FixedClock(Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap());
    create(&store, &clock, "Oops", State::Active);

    let path = store.record_path("oops");
    let text = std::fs::read_to_string(&path).expect("read");
    std::fs::write(&path, text.replace("state: active", "state: Active")).expect("write");

    match store.load("oops") {
        Err(Error::Corrupt { id, .. }) => assert_eq!(id, "oops"),
        other => panic!("unexpected result: {other:?}"),
    }
}
