//! Core data structures for the dday application.
//!
//! An [`Event`] is one user-recorded target date. Its persisted JSON shape
//! uses camelCase keys (`isRepeat`, `createdAt`) and plain `YYYY-MM-DD` dates.
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{DisplayLocale, EventDraft};

/// Preset colour palette offered when creating an event.
pub const COLORS: [&str; 8] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
];

/// Represents a single D-Day event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier, never changes after creation
    pub id: String,
    /// Display title
    pub title: String,
    /// Target calendar date
    pub date: NaiveDate,
    pub category: Category,
    /// Colour value, usually one of [`COLORS`]
    pub color: String,
    /// Stored and shown, but does not affect the day offset
    pub is_repeat: bool,
    /// Free-text note; older records may not carry one
    #[serde(default)]
    pub memo: String,
    /// When the event was created
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Builds an event from a draft with an already-assigned id and timestamp.
    pub fn from_draft(draft: EventDraft, id: String, created_at: DateTime<Utc>) -> Self {
        Event {
            id,
            title: draft.title,
            date: draft.date,
            category: draft.category,
            color: draft.color,
            is_repeat: draft.is_repeat,
            memo: draft.memo,
            created_at,
        }
    }
}

/// Fixed set of event categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Anniversary,
    Birthday,
    Trip,
    Exam,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Anniversary,
        Category::Birthday,
        Category::Trip,
        Category::Exam,
        Category::Other,
    ];

    pub fn icon(self) -> &'static str {
        match self {
            Category::Anniversary => "💕",
            Category::Birthday => "🎂",
            Category::Trip => "✈️",
            Category::Exam => "📚",
            Category::Other => "📌",
        }
    }

    pub fn label(self, locale: DisplayLocale) -> &'static str {
        match (self, locale) {
            (Category::Anniversary, DisplayLocale::En) => "Anniversary",
            (Category::Birthday, DisplayLocale::En) => "Birthday",
            (Category::Trip, DisplayLocale::En) => "Trip",
            (Category::Exam, DisplayLocale::En) => "Exam",
            (Category::Other, DisplayLocale::En) => "Other",
            (Category::Anniversary, DisplayLocale::Ko) => "기념일",
            (Category::Birthday, DisplayLocale::Ko) => "생일",
            (Category::Trip, DisplayLocale::Ko) => "여행",
            (Category::Exam, DisplayLocale::Ko) => "시험",
            (Category::Other, DisplayLocale::Ko) => "기타",
        }
    }

    /// The key used in persisted data and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Category::Anniversary => "anniversary",
            Category::Birthday => "birthday",
            Category::Trip => "trip",
            Category::Exam => "exam",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Event {
        Event {
            id: "1760745600000".to_string(),
            title: "Trip".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            category: Category::Trip,
            color: COLORS[2].to_string(),
            is_repeat: false,
            memo: String::new(),
            created_at: "2026-10-18T09:30:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn serializes_with_persisted_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["date"], "2026-10-19");
        assert_eq!(value["category"], "trip");
        assert_eq!(value["isRepeat"], false);
        assert_eq!(value["color"], "#45B7D1");
        assert!(value["createdAt"].as_str().unwrap().starts_with("2026-10-18T09:30:00"));
        assert!(value.get("is_repeat").is_none());
    }

    #[test]
    fn memo_defaults_when_missing() {
        let json = r##"{
            "id": "1700000000000",
            "title": "Exam",
            "date": "2026-12-01",
            "isRepeat": true,
            "category": "exam",
            "color": "#FF6B6B",
            "createdAt": "2026-10-01T12:00:00.000Z"
        }"##;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.memo, "");
        assert!(event.is_repeat);
        assert_eq!(event.category, Category::Exam);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let json = r##"{"id":"1","title":"x","date":"2026-12-01","isRepeat":false,
            "category":"general","color":"#FF6B6B","createdAt":"2026-10-01T12:00:00Z"}"##;
        assert!(serde_json::from_str::<Event>(json).is_err());
    }

    #[test]
    fn category_metadata() {
        assert_eq!(Category::ALL.len(), 5);
        assert_eq!(Category::Birthday.icon(), "🎂");
        assert_eq!(Category::Trip.label(DisplayLocale::Ko), "여행");
        assert_eq!(Category::default(), Category::Other);
        assert_eq!(Category::Anniversary.to_string(), "anniversary");
    }
}
