//! Events grouped by the day they start on.
//!
//! Each day's list keeps insertion order. The store itself does not check
//! that an event sits under the key of its own start date; the reducer is the
//! only writer and keeps that true (up to the target-day-only edit policy).

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::day_key::{DayKey, day_key};
use crate::event::Event;
use crate::id::EventId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventStore {
    days: HashMap<DayKey, Vec<Event>>,
}

impl EventStore {
    pub fn new() -> Self {
        EventStore::default()
    }

    /// Events filed under `key`, empty when there are none.
    pub fn events_on(&self, key: &DayKey) -> &[Event] {
        self.days.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn events_on_day(&self, date: NaiveDate) -> &[Event] {
        self.events_on(&day_key(date))
    }

    /// Append `event` to the end of its start day's list.
    pub fn append(&mut self, event: Event) {
        self.days.entry(event.day_key()).or_default().push(event);
    }

    pub fn find(&self, key: &DayKey, id: &EventId) -> Option<&Event> {
        self.events_on(key).iter().find(|event| &event.id == id)
    }

    /// First event with `id` under any key.
    pub fn find_anywhere(&self, id: &EventId) -> Option<&Event> {
        self.days
            .values()
            .flat_map(|events| events.iter())
            .find(|event| &event.id == id)
    }

    pub fn contains(&self, id: &EventId) -> bool {
        self.find_anywhere(id).is_some()
    }

    /// Remove every event with `id` from the list at `key`. Returns how many
    /// went. Lists left empty are dropped.
    pub fn remove(&mut self, key: &DayKey, id: &EventId) -> usize {
        let Some(events) = self.days.get_mut(key) else {
            return 0;
        };

        let before = events.len();
        events.retain(|event| &event.id != id);
        let removed = before - events.len();

        if events.is_empty() {
            self.days.remove(key);
        }
        removed
    }

    /// Remove every event with `id` from every day.
    pub fn remove_everywhere(&mut self, id: &EventId) -> usize {
        let mut removed = 0;
        for events in self.days.values_mut() {
            let before = events.len();
            events.retain(|event| &event.id != id);
            removed += before - events.len();
        }
        self.days.retain(|_, events| !events.is_empty());
        removed
    }

    /// Total number of events across all days.
    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of days holding at least one event.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }
}
