//! The single application state value.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::date_grid::{DisplayGrid, compute_display_grid};
use crate::error::CalendarResult;
use crate::event::Event;
use crate::store::EventStore;

/// Everything the presentation layer renders from.
///
/// A new value is produced for every transition, so comparing two snapshots
/// tells whether anything changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    /// Any date inside the displayed month.
    pub month: NaiveDate,
    pub dates_to_display: DisplayGrid,
    pub events_per_date: EventStore,
    pub display_add_event_form: bool,
    pub default_date_add_event_form: NaiveDateTime,
    pub editing_event: Option<Event>,
}

impl Calendar {
    /// Initial state: the month of `now`, no events, form hidden.
    pub fn new(now: NaiveDateTime) -> CalendarResult<Self> {
        let month = now.date();
        Ok(Calendar {
            month,
            dates_to_display: compute_display_grid(month)?,
            events_per_date: EventStore::new(),
            display_add_event_form: false,
            default_date_add_event_form: now,
            editing_event: None,
        })
    }

    pub fn events_on_day(&self, date: NaiveDate) -> &[Event] {
        self.events_per_date.events_on_day(date)
    }
}

/// Events starting on `date`, in insertion order.
pub fn events_on_day(state: &Calendar, date: NaiveDate) -> &[Event] {
    state.events_on_day(date)
}
