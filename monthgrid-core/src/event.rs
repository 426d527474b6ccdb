//! Timed calendar events.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::day_key::DayKey;
use crate::id::EventId;

/// A named event with a local wall-clock time range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

impl Event {
    pub fn new(
        id: EventId,
        name: impl Into<String>,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
    ) -> Self {
        Event {
            id,
            name: name.into(),
            start_date,
            end_date,
        }
    }

    pub fn day_key(&self) -> DayKey {
        DayKey::from(self.start_date)
    }

    /// Whether the event ends no earlier than it starts. Nothing in the store
    /// or reducer enforces this.
    pub fn has_valid_range(&self) -> bool {
        self.start_date <= self.end_date
    }
}
