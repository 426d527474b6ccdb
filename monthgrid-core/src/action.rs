//! Requests for state changes, built by the presentation layer.

use chrono::{NaiveDate, NaiveDateTime};

use crate::id::EventId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// File a new event under its start day with a freshly minted id.
    AddEvent {
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
        name: String,
    },
    /// Replace the event with `id`.
    EditEvent {
        id: EventId,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
        name: String,
    },
    /// Remove the event with `id` from the list of `date`. No-op when absent.
    DeleteEvent { date: NaiveDate, id: EventId },
    IncrementMonth,
    DecrementMonth,
    GoToday,
    /// Open the event form on `date`, in edit mode when `id` names an event
    /// of that day.
    DisplayAddEventForm {
        date: NaiveDateTime,
        id: Option<EventId>,
    },
    HideAddEventForm,
}
