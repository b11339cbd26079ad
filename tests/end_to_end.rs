use chrono::{Duration, NaiveDate};
use dday::{
    format_offset, Category, DisplayLocale, EventDraft, EventStore, FixedClock, HomeView,
    MemoryStorage, COLORS,
};

#[test]
fn create_trip_tomorrow_becomes_nearest() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let mut store = EventStore::with_clock(MemoryStorage::new(), FixedClock::new(today));
    store.add(EventDraft::new("Conference", today + Duration::days(30)));
    store.add(EventDraft::new("Old exam", today - Duration::days(3)));

    let id = store.add(EventDraft {
        title: "Trip".to_string(),
        date: today + Duration::days(1),
        category: Category::Trip,
        color: COLORS[2].to_string(),
        is_repeat: false,
        memo: String::new(),
    });

    let trip = store.get(&id).unwrap();
    assert_eq!(store.offset_of(trip), 1);
    assert!(store.upcoming().iter().any(|e| e.id == id));
    assert_eq!(store.nearest().unwrap().id, id);
    assert_eq!(format_offset(store.offset_of(trip)), "D-1");

    let view = HomeView::build(&store, DisplayLocale::En, false);
    let featured = view.featured.unwrap();
    assert_eq!(featured.title, "Trip");
    assert_eq!(featured.color, "#45B7D1");
    assert_eq!(view.upcoming.len(), 2);
    assert_eq!(view.past.len(), 1);
    assert_eq!(view.past[0].marker, "D+3");
}

#[test]
fn event_today_beats_tomorrow() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let mut store = EventStore::with_clock(MemoryStorage::new(), FixedClock::new(today));
    store.add(EventDraft::new("Tomorrow", today + Duration::days(1)));
    let id = store.add(EventDraft::new("Today", today));

    assert_eq!(store.nearest().unwrap().id, id);
    assert_eq!(format_offset(store.offset_of(store.nearest().unwrap())), "D-Day");
}
