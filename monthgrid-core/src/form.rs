//! Values shown in the add/edit event form.
//!
//! The form is a scratch copy. Nothing reaches the calendar until
//! [`EventForm::into_action`] is dispatched, so closing the form without
//! submitting discards the edit.

use chrono::NaiveDateTime;

use crate::action::Action;
use crate::calendar::Calendar;
use crate::date_grid::add_hours;
use crate::error::CalendarResult;
use crate::id::EventId;

/// Length given to new events when no end is chosen.
pub const DEFAULT_EVENT_DURATION_HOURS: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventForm {
    /// Set when editing an existing event.
    pub id: Option<EventId>,
    pub name: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

impl EventForm {
    /// Pre-fill from the event being edited, or start a blank event at the
    /// form's default date lasting `duration_hours`.
    pub fn from_state(state: &Calendar, duration_hours: i64) -> CalendarResult<Self> {
        if let Some(event) = &state.editing_event {
            return Ok(EventForm {
                id: Some(event.id.clone()),
                name: event.name.clone(),
                start_date: event.start_date,
                end_date: event.end_date,
            });
        }

        let start_date = state.default_date_add_event_form;
        Ok(EventForm {
            id: None,
            name: String::new(),
            start_date,
            end_date: add_hours(start_date, duration_hours)?,
        })
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    pub fn into_action(self) -> Action {
        match self.id {
            Some(id) => Action::EditEvent {
                id,
                start_date: self.start_date,
                end_date: self.end_date,
                name: self.name,
            },
            None => Action::AddEvent {
                start_date: self.start_date,
                end_date: self.end_date,
                name: self.name,
            },
        }
    }
}
