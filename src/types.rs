//! Shared types for the dday application.
//!
//! This module holds the `Result` alias, the input shapes accepted by the
//! event store, and the command-line subcommands.
use chrono::NaiveDate;
use clap::Subcommand;

use crate::{Category, DdayError, Event, COLORS};

/// A specialized Result type for dday operations.
pub type Result<T> = std::result::Result<T, DdayError>;

/// Everything needed to create an event except its id and creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub date: NaiveDate,
    pub category: Category,
    pub color: String,
    pub is_repeat: bool,
    pub memo: String,
}

impl EventDraft {
    /// A draft with default category, first palette colour and no memo.
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        EventDraft {
            title: title.into(),
            date,
            category: Category::default(),
            color: COLORS[0].to_string(),
            is_repeat: false,
            memo: String::new(),
        }
    }
}

/// Partial update for an existing event. `None` fields are left untouched;
/// id and creation time cannot be expressed here at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub category: Option<Category>,
    pub color: Option<String>,
    pub is_repeat: Option<bool>,
    pub memo: Option<String>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        *self == EventPatch::default()
    }

    /// Merges the supplied fields into `event`.
    pub fn apply_to(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(category) = self.category {
            event.category = category;
        }
        if let Some(color) = self.color {
            event.color = color;
        }
        if let Some(is_repeat) = self.is_repeat {
            event.is_repeat = is_repeat;
        }
        if let Some(memo) = self.memo {
            event.memo = memo;
        }
    }
}

/// Available subcommands for the dday application
#[derive(Subcommand)]
pub enum Commands {
    /// Show upcoming and past events, nearest first
    List {
        /// Expand the past events section
        #[clap(short, long)]
        past: bool,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Create a new event
    Add {
        /// Title of the event
        #[clap(short = 'T', long)]
        title: String,

        /// Target date as YYYY-MM-DD (defaults to today)
        #[clap(short, long)]
        date: Option<String>,

        /// Category of the event
        #[clap(short, long, value_enum, default_value_t = Category::Other)]
        category: Category,

        /// Palette index (1-8) or a #RRGGBB colour
        #[clap(long)]
        color: Option<String>,

        /// Mark the event as repeating every year
        #[clap(short, long)]
        repeat: bool,

        /// Free-text memo
        #[clap(short, long)]
        memo: Option<String>,

        /// Write the memo in an editor before saving
        #[clap(short, long)]
        edit_memo: bool,
    },

    /// View a single event
    View {
        /// ID of the event to view
        id: String,

        /// Format output as raw JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Edit an existing event
    Edit {
        /// ID of the event to edit
        id: String,

        /// New title
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New target date as YYYY-MM-DD
        #[clap(short, long)]
        date: Option<String>,

        /// New category
        #[clap(short, long, value_enum)]
        category: Option<Category>,

        /// Palette index (1-8) or a #RRGGBB colour
        #[clap(long)]
        color: Option<String>,

        /// Turn yearly repeat on or off
        #[clap(short, long)]
        repeat: Option<bool>,

        /// New memo
        #[clap(short, long)]
        memo: Option<String>,

        /// Edit the memo in an editor
        #[clap(short, long)]
        edit_memo: bool,
    },

    /// Delete an event by ID
    Delete {
        /// ID of the event to delete
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// List categories and preset colours
    Palette,

    /// Configuration management
    Config {
        /// Show current configuration
        #[clap(short = 'S', long)]
        show: bool,

        /// Update a configuration setting (key=value)
        #[clap(short, long)]
        set: Option<String>,

        /// Reset configuration to defaults
        #[clap(short, long)]
        reset: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_only_touches_supplied_fields() {
        let date = NaiveDate::from_ymd_opt(2026, 12, 24).unwrap();
        let mut event = Event::from_draft(
            EventDraft::new("Party", date),
            "42".to_string(),
            "2026-10-18T00:00:00Z".parse().unwrap(),
        );
        let before = event.clone();

        EventPatch {
            title: Some("X".to_string()),
            ..Default::default()
        }
        .apply_to(&mut event);

        assert_eq!(event.title, "X");
        assert_eq!(
            Event {
                title: before.title.clone(),
                ..event
            },
            before
        );
    }

    #[test]
    fn empty_patch() {
        assert!(EventPatch::default().is_empty());
        assert!(!EventPatch {
            is_repeat: Some(false),
            ..Default::default()
        }
        .is_empty());
    }
}
