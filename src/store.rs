//! The in-memory event collection and its derived views.
//!
//! Every mutation writes the full collection through the injected
//! [`Persistence`]; write failures are logged and otherwise ignored. Views
//! (`sorted`, `upcoming`, `past`, `nearest`) are rebuilt from the clock's
//! current date on each call.

use log::{debug, info, warn};

use crate::{
    days_between, load_or_empty, save_or_log, Clock, DdayError, Event, EventDraft, EventPatch,
    Persistence, Result, SystemClock,
};

/// Owns the event collection for the lifetime of the process.
pub struct EventStore<P: Persistence, C: Clock = SystemClock> {
    /// Events in insertion order; ties in the sorted view keep this order
    events: Vec<Event>,

    /// Where the whole collection is written after each mutation
    persistence: P,

    clock: C,

    /// Last numeric id handed out, so ids stay unique within one millisecond
    last_issued: i64,
}

impl<P: Persistence> EventStore<P, SystemClock> {
    /// Opens the store against the system clock.
    pub fn open(persistence: P) -> Self {
        Self::with_clock(persistence, SystemClock)
    }
}

impl<P: Persistence, C: Clock> EventStore<P, C> {
    /// Loads the collection once; an unreadable slot yields an empty store.
    pub fn with_clock(persistence: P, clock: C) -> Self {
        let events = load_or_empty(&persistence);
        info!("Event store opened with {} events", events.len());

        let last_issued = events
            .iter()
            .filter_map(|e| e.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);

        Self {
            events,
            persistence,
            clock,
            last_issued,
        }
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// All events in collection order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Signed days from today to the event's date.
    pub fn offset_of(&self, event: &Event) -> i64 {
        days_between(event.date, self.clock.today())
    }

    /// Creates an event from the draft, persists, and returns the new id.
    pub fn add(&mut self, draft: EventDraft) -> String {
        let id = self.next_id();
        let event = Event::from_draft(draft, id.clone(), self.clock.now());
        info!("Adding event {} ({})", event.id, event.title);

        self.events.push(event);
        self.persist();
        id
    }

    /// Merges the patch into the event with this id and persists.
    pub fn update(&mut self, id: &str, patch: EventPatch) -> Result<()> {
        let Some(event) = self.events.iter_mut().find(|e| e.id == id) else {
            warn!("Cannot update event {}: not found", id);
            return Err(DdayError::EventNotFound { id: id.to_string() });
        };

        patch.apply_to(event);
        debug!("Updated event {}", id);
        self.persist();
        Ok(())
    }

    /// Removes the event with this id if present, then persists.
    /// Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        let removed = self.events.len() != before;

        if removed {
            info!("Deleted event {}", id);
        } else {
            debug!("Delete of unknown event {} is a no-op", id);
        }
        self.persist();
        removed
    }

    /// All events ordered by offset, oldest past first. Stable for equal dates.
    pub fn sorted(&self) -> Vec<&Event> {
        let today = self.clock.today();
        let mut sorted: Vec<&Event> = self.events.iter().collect();
        sorted.sort_by_key(|e| days_between(e.date, today));
        sorted
    }

    /// Events dated today or later, nearest first.
    pub fn upcoming(&self) -> Vec<&Event> {
        let today = self.clock.today();
        self.sorted()
            .into_iter()
            .filter(|e| days_between(e.date, today) >= 0)
            .collect()
    }

    /// Events dated before today, oldest first.
    pub fn past(&self) -> Vec<&Event> {
        let today = self.clock.today();
        self.sorted()
            .into_iter()
            .filter(|e| days_between(e.date, today) < 0)
            .collect()
    }

    /// The upcoming event with the smallest offset.
    pub fn nearest(&self) -> Option<&Event> {
        self.upcoming().into_iter().next()
    }

    fn persist(&self) {
        save_or_log(&self.persistence, &self.events);
    }

    /// Millisecond timestamp ids, bumped past the last issued id and any
    /// id already in the collection.
    fn next_id(&mut self) -> String {
        let mut candidate = self.clock.now().timestamp_millis().max(self.last_issued + 1);
        while self.get(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        self.last_issued = candidate;
        candidate.to_string()
    }
}
