use std::fs;

use chrono::NaiveDate;
use dday::{
    load_or_empty, Category, Event, EventDraft, EventStore, FixedClock, JsonFileStorage,
    MemoryStorage, Persistence, COLORS,
};

fn sample_events() -> Vec<Event> {
    vec![
        Event {
            id: "1760745600000".to_string(),
            title: "Anniversary".to_string(),
            date: NaiveDate::from_ymd_opt(2027, 2, 14).unwrap(),
            category: Category::Anniversary,
            color: COLORS[0].to_string(),
            is_repeat: true,
            memo: "dinner at 7".to_string(),
            created_at: "2026-10-18T09:30:12.345Z".parse().unwrap(),
        },
        Event {
            id: "1760745600001".to_string(),
            title: "시험".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 11, 19).unwrap(),
            category: Category::Exam,
            color: "#123ABC".to_string(),
            is_repeat: false,
            memo: String::new(),
            created_at: "2026-10-18T09:30:12.346Z".parse().unwrap(),
        },
    ]
}

#[test]
fn file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path());

    let events = sample_events();
    storage.save(&events).unwrap();
    assert_eq!(storage.load().unwrap(), events);

    storage.save(&[]).unwrap();
    assert!(storage.load().unwrap().is_empty());
}

#[test]
fn memory_round_trip() {
    let storage = MemoryStorage::new();
    let events = sample_events();
    storage.save(&events).unwrap();
    assert_eq!(storage.load().unwrap(), events);
}

#[test]
fn slot_is_a_json_array_with_camel_case_fields() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path());
    storage.save(&sample_events()).unwrap();

    let raw = fs::read_to_string(dir.path().join("dday_events.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value.as_array().unwrap()[0];
    for key in [
        "id",
        "title",
        "date",
        "category",
        "color",
        "isRepeat",
        "memo",
        "createdAt",
    ] {
        assert!(first.get(key).is_some(), "missing {key}");
    }
    assert_eq!(first["date"], "2027-02-14");
}

#[test]
fn store_reopens_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

    let id = {
        let mut store =
            EventStore::with_clock(JsonFileStorage::new(dir.path()), FixedClock::new(today));
        store.add(EventDraft::new("Trip", today.succ_opt().unwrap()))
    };

    let reopened = EventStore::with_clock(JsonFileStorage::new(dir.path()), FixedClock::new(today));
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.get(&id).unwrap().title, "Trip");
}

#[test]
fn corrupt_slot_opens_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("dday_events.json"), "[{\"id\": 1}").unwrap();

    let storage = JsonFileStorage::new(dir.path());
    assert!(load_or_empty(&storage).is_empty());

    let store = EventStore::open(storage);
    assert!(store.is_empty());
}

#[test]
fn legacy_blob_without_memo_loads() {
    let blob = r##"[{"id":"1700000000000","title":"Birthday","date":"2026-12-03",
        "isRepeat":true,"category":"birthday","color":"#DDA0DD",
        "createdAt":"2023-11-14T22:13:20.000Z"}]"##;
    let store = EventStore::open(MemoryStorage::with_blob(blob));
    assert_eq!(store.len(), 1);
    assert_eq!(store.events()[0].memo, "");
}
