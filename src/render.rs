//! View models for the list screen.
//!
//! These are plain data built from the store's derived views; the CLI only
//! decides how to print them.

use crate::{
    format_offset, long_date, short_date, Clock, DateStatus, DisplayLocale, Event, EventStore,
    Persistence,
};

/// One row in the upcoming or past section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: String,
    pub icon: &'static str,
    pub title: String,
    pub repeat: bool,
    pub short_date: String,
    pub marker: String,
    pub status: DateStatus,
    pub color: String,
}

impl CardView {
    pub fn build(event: &Event, offset: i64, locale: DisplayLocale) -> Self {
        CardView {
            id: event.id.clone(),
            icon: event.category.icon(),
            title: event.title.clone(),
            repeat: event.is_repeat,
            short_date: short_date(event.date, locale),
            marker: format_offset(offset),
            status: DateStatus::from_offset(offset),
            color: event.color.clone(),
        }
    }
}

/// The highlighted nearest upcoming event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturedView {
    pub id: String,
    pub title: String,
    pub marker: String,
    pub long_date: String,
    pub color: String,
}

/// Everything the list screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub featured: Option<FeaturedView>,
    pub upcoming: Vec<CardView>,
    pub past: Vec<CardView>,
    /// Past section is listed only when expanded; its count is always shown
    pub past_expanded: bool,
}

impl HomeView {
    pub fn build<P: Persistence, C: Clock>(
        store: &EventStore<P, C>,
        locale: DisplayLocale,
        past_expanded: bool,
    ) -> Self {
        let card = |e: &Event| CardView::build(e, store.offset_of(e), locale);

        let featured = store.nearest().map(|e| FeaturedView {
            id: e.id.clone(),
            title: e.title.clone(),
            marker: format_offset(store.offset_of(e)),
            long_date: long_date(e.date, locale),
            color: e.color.clone(),
        });

        HomeView {
            featured,
            upcoming: store.upcoming().into_iter().map(card).collect(),
            past: store.past().into_iter().map(card).collect(),
            past_expanded,
        }
    }
}

/// Fixed strings of the list screen.
pub struct Labels {
    pub nearest: &'static str,
    pub upcoming: &'static str,
    pub past: &'static str,
    pub today: &'static str,
    pub empty: &'static str,
    pub empty_hint: &'static str,
    pub repeat: &'static str,
}

impl Labels {
    pub fn for_locale(locale: DisplayLocale) -> Self {
        match locale {
            DisplayLocale::En => Labels {
                nearest: "Nearest",
                upcoming: "Upcoming",
                past: "Past",
                today: "Today!",
                empty: "No D-Days yet",
                empty_hint: "Add one with `dday add --title ...`",
                repeat: "yearly",
            },
            DisplayLocale::Ko => Labels {
                nearest: "가장 가까운 날",
                upcoming: "다가오는 날",
                past: "지난 날",
                today: "오늘!",
                empty: "등록된 D-Day가 없습니다",
                empty_hint: "새로운 기념일을 추가해보세요!",
                repeat: "매년",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{Category, EventDraft, FixedClock, MemoryStorage};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn card_fields() {
        let mut draft = EventDraft::new("Mom's birthday", ymd(2026, 10, 18));
        draft.category = Category::Birthday;
        draft.is_repeat = true;
        let event = crate::Event::from_draft(draft, "1".into(), "2026-01-01T00:00:00Z".parse().unwrap());

        let card = CardView::build(&event, 0, DisplayLocale::En);
        assert_eq!(card.icon, "🎂");
        assert_eq!(card.marker, "D-Day");
        assert_eq!(card.status, DateStatus::Today);
        assert_eq!(card.short_date, "10/18 (Sun)");
        assert!(card.repeat);
    }

    #[test]
    fn home_view_partitions_and_features_nearest() {
        let clock = FixedClock::new(ymd(2026, 10, 18));
        let mut store = crate::EventStore::with_clock(MemoryStorage::new(), clock);
        store.add(EventDraft::new("Exam", ymd(2026, 10, 25)));
        store.add(EventDraft::new("Graduation", ymd(2026, 2, 20)));
        store.add(EventDraft::new("Trip", ymd(2026, 10, 19)));

        let view = HomeView::build(&store, DisplayLocale::En, false);
        let featured = view.featured.unwrap();
        assert_eq!(featured.title, "Trip");
        assert_eq!(featured.marker, "D-1");
        assert_eq!(featured.long_date, "Monday, October 19, 2026");

        let upcoming: Vec<_> = view.upcoming.iter().map(|c| c.marker.as_str()).collect();
        assert_eq!(upcoming, ["D-1", "D-7"]);
        assert_eq!(view.past.len(), 1);
        assert_eq!(view.past[0].status, DateStatus::Past);
        assert!(!view.past_expanded);
    }

    #[test]
    fn empty_store_has_no_featured() {
        let store = crate::EventStore::with_clock(
            MemoryStorage::new(),
            FixedClock::new(ymd(2026, 10, 18)),
        );
        let view = HomeView::build(&store, DisplayLocale::Ko, true);
        assert!(view.featured.is_none());
        assert!(view.upcoming.is_empty() && view.past.is_empty());
        assert_eq!(Labels::for_locale(DisplayLocale::Ko).upcoming, "다가오는 날");
    }
}
