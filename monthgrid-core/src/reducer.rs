//! State transitions: `(Calendar, Action) -> Calendar`.

use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::calendar::Calendar;
use crate::clock::{Clock, SystemClock};
use crate::date_grid::{compute_display_grid, decrement_month, increment_month};
use crate::day_key::day_key;
use crate::error::CalendarResult;
use crate::event::Event;
use crate::id::{IdGenerator, UuidGenerator};
use crate::store::EventStore;

/// How `EditEvent` finds the copy it replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditPolicy {
    /// Only the list of the new start day is searched. Moving an event to
    /// another day leaves the old entry behind.
    #[default]
    TargetDayOnly,
    /// The id is removed from every day before the edited event is filed
    /// under its new start day.
    Relocate,
}

/// Applies actions to calendar states.
///
/// Holds the injected clock and id source; carries no calendar data itself.
pub struct Reducer<C = SystemClock, G = UuidGenerator> {
    clock: C,
    ids: G,
    edit_policy: EditPolicy,
}

impl Reducer {
    /// Real clock, random ids, default edit policy.
    pub fn system() -> Self {
        Reducer::new(SystemClock, UuidGenerator)
    }
}

impl<C: Clock, G: IdGenerator> Reducer<C, G> {
    pub fn new(clock: C, ids: G) -> Self {
        Reducer {
            clock,
            ids,
            edit_policy: EditPolicy::default(),
        }
    }

    pub fn with_edit_policy(mut self, edit_policy: EditPolicy) -> Self {
        self.edit_policy = edit_policy;
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Initial state as of the reducer's clock.
    pub fn initial_state(&self) -> CalendarResult<Calendar> {
        Calendar::new(self.clock.now())
    }

    /// Compute the state following `action`. Never fails: lookups that miss
    /// and arithmetic that overflows leave the affected part of the state as
    /// it was.
    pub fn reduce(&mut self, state: &Calendar, action: Action) -> Calendar {
        let mut next = state.clone();

        match action {
            Action::AddEvent {
                start_date,
                end_date,
                name,
            } => {
                let event = Event::new(self.ids.next_id(), name, start_date, end_date);
                debug!("event=add_event id={} day={}", event.id, event.day_key());
                next.events_per_date.append(event);
            }
            Action::EditEvent {
                id,
                start_date,
                end_date,
                name,
            } => {
                let edited = Event::new(id, name, start_date, end_date);
                self.edit_event(&mut next.events_per_date, edited);
            }
            Action::DeleteEvent { date, id } => {
                let removed = next.events_per_date.remove(&day_key(date), &id);
                if removed == 0 {
                    debug!("event=delete_event status=not_found id={} day={}", id, date);
                }
            }
            Action::IncrementMonth => {
                Self::show_month(&mut next, increment_month(state.month));
            }
            Action::DecrementMonth => {
                Self::show_month(&mut next, decrement_month(state.month));
            }
            Action::GoToday => {
                Self::show_month(&mut next, Ok(self.clock.today()));
            }
            Action::DisplayAddEventForm { date, id } => {
                next.display_add_event_form = true;
                next.default_date_add_event_form = date;
                next.editing_event = id.and_then(|id| {
                    let found = state.events_per_date.find(&day_key(date.date()), &id).cloned();
                    if found.is_none() {
                        debug!(
                            "event=display_form status=not_found id={} day={}; opening in create mode",
                            id,
                            date.date()
                        );
                    }
                    found
                });
            }
            Action::HideAddEventForm => {
                next.display_add_event_form = false;
                next.editing_event = None;
            }
        }

        next
    }

    fn edit_event(&self, store: &mut EventStore, edited: Event) {
        let target = edited.day_key();

        if !store.contains(&edited.id) {
            debug!("event=edit_event status=not_found id={}; filing as new", edited.id);
        }

        match self.edit_policy {
            EditPolicy::TargetDayOnly => {
                store.remove(&target, &edited.id);
            }
            EditPolicy::Relocate => {
                store.remove_everywhere(&edited.id);
            }
        }

        debug!("event=edit_event id={} day={}", edited.id, target);
        store.append(edited);
    }

    fn show_month(next: &mut Calendar, month: CalendarResult<NaiveDate>) {
        let shown = month.and_then(|month| Ok((month, compute_display_grid(month)?)));
        match shown {
            Ok((month, grid)) => {
                next.month = month;
                next.dates_to_display = grid;
            }
            Err(e) => {
                warn!("event=change_month status=error month={} error={}", next.month, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::events_on_day;
    use crate::clock::FixedClock;
    use crate::id::{EventId, SequentialIds};
    use chrono::NaiveDateTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, 0, 0).unwrap()
    }

    fn reducer() -> Reducer<FixedClock, SequentialIds> {
        Reducer::new(FixedClock::new(at(2024, 5, 17, 14)), SequentialIds::default())
    }

    fn add(name: &str, start: NaiveDateTime) -> Action {
        Action::AddEvent {
            start_date: start,
            end_date: start + chrono::TimeDelta::hours(1),
            name: name.to_string(),
        }
    }

    fn edit(id: &EventId, name: &str, start: NaiveDateTime) -> Action {
        Action::EditEvent {
            id: id.clone(),
            start_date: start,
            end_date: start + chrono::TimeDelta::hours(1),
            name: name.to_string(),
        }
    }

    fn with_month(month: NaiveDate) -> Calendar {
        let mut state = Calendar::new(at(2024, 5, 17, 14)).unwrap();
        state.month = month;
        state.dates_to_display = compute_display_grid(month).unwrap();
        state
    }

    #[test]
    fn add_then_delete_meeting() {
        let mut reducer = reducer();
        let initial = reducer.initial_state().unwrap();

        let state = reducer.reduce(
            &initial,
            Action::AddEvent {
                start_date: at(2020, 3, 6, 10),
                end_date: at(2020, 3, 6, 11),
                name: "Meeting".to_string(),
            },
        );
        let events = events_on_day(&state, date(2020, 3, 6));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "Meeting");
        assert_eq!(events[0].start_date, at(2020, 3, 6, 10));
        assert_eq!(events[0].end_date, at(2020, 3, 6, 11));

        let id = events[0].id.clone();
        let state = reducer.reduce(
            &state,
            Action::DeleteEvent {
                date: date(2020, 3, 6),
                id,
            },
        );
        assert!(events_on_day(&state, date(2020, 3, 6)).is_empty());
    }

    #[test]
    fn add_appends_after_existing_events_and_leaves_other_days() {
        let mut reducer = reducer();
        let mut state = reducer.initial_state().unwrap();
        state = reducer.reduce(&state, add("first", at(2020, 3, 6, 15)));
        state = reducer.reduce(&state, add("elsewhere", at(2020, 3, 7, 9)));
        state = reducer.reduce(&state, add("second", at(2020, 3, 6, 8)));

        let names: Vec<_> = events_on_day(&state, date(2020, 3, 6))
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, ["first", "second"]);
        assert_eq!(events_on_day(&state, date(2020, 3, 7)).len(), 1);
    }

    #[test]
    fn add_mints_unique_ids() {
        let mut reducer = reducer();
        let mut state = reducer.initial_state().unwrap();
        state = reducer.reduce(&state, add("a", at(2020, 3, 6, 10)));
        state = reducer.reduce(&state, add("b", at(2020, 3, 6, 10)));

        let events = events_on_day(&state, date(2020, 3, 6));
        assert_ne!(events[0].id, events[1].id);
    }

    #[test]
    fn add_does_not_touch_the_previous_state() {
        let mut reducer = reducer();
        let initial = reducer.initial_state().unwrap();
        let next = reducer.reduce(&initial, add("a", at(2020, 3, 6, 10)));

        assert!(initial.events_per_date.is_empty());
        assert_ne!(initial, next);
    }

    #[test]
    fn delete_unknown_id_keeps_the_day() {
        let mut reducer = reducer();
        let mut state = reducer.initial_state().unwrap();
        state = reducer.reduce(&state, add("a", at(2020, 3, 6, 10)));
        state = reducer.reduce(&state, add("b", at(2020, 3, 6, 12)));
        let before = events_on_day(&state, date(2020, 3, 6)).to_vec();

        let state = reducer.reduce(
            &state,
            Action::DeleteEvent {
                date: date(2020, 3, 6),
                id: "missing".into(),
            },
        );
        assert_eq!(events_on_day(&state, date(2020, 3, 6)), before.as_slice());
    }

    #[test]
    fn delete_only_looks_at_the_given_day() {
        let mut reducer = reducer();
        let mut state = reducer.initial_state().unwrap();
        state = reducer.reduce(&state, add("a", at(2020, 3, 6, 10)));
        let id = events_on_day(&state, date(2020, 3, 6))[0].id.clone();

        let state = reducer.reduce(
            &state,
            Action::DeleteEvent {
                date: date(2020, 3, 7),
                id,
            },
        );
        assert_eq!(events_on_day(&state, date(2020, 3, 6)).len(), 1);
    }

    #[test]
    fn edit_on_same_day_replaces_and_moves_to_end() {
        let mut reducer = reducer();
        let mut state = reducer.initial_state().unwrap();
        state = reducer.reduce(&state, add("test", at(2020, 3, 6, 10)));
        state = reducer.reduce(&state, add("other", at(2020, 3, 6, 12)));
        let id = events_on_day(&state, date(2020, 3, 6))[0].id.clone();

        let state = reducer.reduce(&state, edit(&id, "event1", at(2020, 3, 6, 9)));
        let events = events_on_day(&state, date(2020, 3, 6));
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "other");
        assert_eq!(events[1].name, "event1");
        assert_eq!(events[1].id, id);
        assert_eq!(events[1].start_date, at(2020, 3, 6, 9));
    }

    #[test]
    fn edit_across_days_leaves_a_stale_copy_by_default() {
        let mut reducer = reducer();
        let mut state = reducer.initial_state().unwrap();
        state = reducer.reduce(&state, add("before", at(2020, 3, 6, 10)));
        let id = events_on_day(&state, date(2020, 3, 6))[0].id.clone();

        let state = reducer.reduce(&state, edit(&id, "after", at(2020, 3, 9, 10)));

        let old_day = events_on_day(&state, date(2020, 3, 6));
        let new_day = events_on_day(&state, date(2020, 3, 9));
        assert_eq!(old_day.len(), 1);
        assert_eq!(old_day[0].name, "before");
        assert_eq!(new_day.len(), 1);
        assert_eq!(new_day[0].name, "after");
        assert_eq!(old_day[0].id, new_day[0].id);
    }

    #[test]
    fn edit_across_days_moves_the_event_when_relocating() {
        let mut reducer = reducer().with_edit_policy(EditPolicy::Relocate);
        let mut state = reducer.initial_state().unwrap();
        state = reducer.reduce(&state, add("before", at(2020, 3, 6, 10)));
        let id = events_on_day(&state, date(2020, 3, 6))[0].id.clone();

        let state = reducer.reduce(&state, edit(&id, "after", at(2020, 3, 9, 10)));

        assert!(events_on_day(&state, date(2020, 3, 6)).is_empty());
        let new_day = events_on_day(&state, date(2020, 3, 9));
        assert_eq!(new_day.len(), 1);
        assert_eq!(new_day[0].name, "after");
        assert_eq!(state.events_per_date.len(), 1);
    }

    #[test]
    fn edit_of_unknown_id_files_a_new_event() {
        let mut reducer = reducer();
        let state = reducer.initial_state().unwrap();
        let ghost = EventId::new("ghost");

        let state = reducer.reduce(&state, edit(&ghost, "found", at(2020, 3, 6, 10)));
        let events = events_on_day(&state, date(2020, 3, 6));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, ghost);
    }

    #[test]
    fn month_navigation() {
        let mut reducer = reducer();

        let state = reducer.reduce(&with_month(date(2020, 3, 6)), Action::DecrementMonth);
        assert_eq!(state.month, date(2020, 2, 6));
        assert_eq!(state.dates_to_display, compute_display_grid(date(2020, 2, 6)).unwrap());

        let state = reducer.reduce(&with_month(date(2020, 3, 6)), Action::IncrementMonth);
        assert_eq!(state.month, date(2020, 4, 6));

        let state = reducer.reduce(&with_month(date(2020, 1, 1)), Action::DecrementMonth);
        assert_eq!(state.month, date(2019, 12, 1));
        assert_eq!(state.dates_to_display.first(), date(2019, 11, 25));
    }

    #[test]
    fn month_navigation_past_the_calendar_is_ignored() {
        let mut reducer = reducer();
        let mut state = with_month(date(2020, 3, 6));
        state.month = NaiveDate::MAX;

        let next = reducer.reduce(&state, Action::IncrementMonth);
        assert_eq!(next, state);
    }

    #[test]
    fn go_today_uses_the_clock() {
        let mut reducer = reducer();
        let state = reducer.reduce(&with_month(date(2020, 3, 6)), Action::GoToday);
        assert_eq!(state.month, date(2024, 5, 17));
        assert_eq!(state.dates_to_display, compute_display_grid(date(2024, 5, 17)).unwrap());

        reducer.clock().set(at(2031, 11, 2, 8));
        let state = reducer.reduce(&state, Action::GoToday);
        assert_eq!(state.month, date(2031, 11, 2));
    }

    #[test]
    fn display_form_in_create_mode() {
        let mut reducer = reducer();
        let state = reducer.initial_state().unwrap();

        let state = reducer.reduce(
            &state,
            Action::DisplayAddEventForm {
                date: at(2020, 3, 6, 14),
                id: None,
            },
        );
        assert!(state.display_add_event_form);
        assert_eq!(state.default_date_add_event_form, at(2020, 3, 6, 14));
        assert!(state.editing_event.is_none());
    }

    #[test]
    fn display_form_in_edit_mode() {
        let mut reducer = reducer();
        let mut state = reducer.initial_state().unwrap();
        state = reducer.reduce(&state, add("Meeting", at(2020, 3, 6, 10)));
        let event = events_on_day(&state, date(2020, 3, 6))[0].clone();

        let state = reducer.reduce(
            &state,
            Action::DisplayAddEventForm {
                date: at(2020, 3, 6, 0),
                id: Some(event.id.clone()),
            },
        );
        assert_eq!(state.editing_event, Some(event));
    }

    #[test]
    fn display_form_for_missing_id_falls_back_to_create_mode() {
        let mut reducer = reducer();
        let mut state = reducer.initial_state().unwrap();
        state = reducer.reduce(&state, add("Meeting", at(2020, 3, 6, 10)));
        let id = events_on_day(&state, date(2020, 3, 6))[0].id.clone();

        // Right id, wrong day.
        let state = reducer.reduce(
            &state,
            Action::DisplayAddEventForm {
                date: at(2020, 3, 7, 0),
                id: Some(id),
            },
        );
        assert!(state.display_add_event_form);
        assert!(state.editing_event.is_none());

        // Day with no list at all.
        let state = reducer.reduce(
            &state,
            Action::DisplayAddEventForm {
                date: at(2021, 1, 1, 0),
                id: Some("nope".into()),
            },
        );
        assert!(state.editing_event.is_none());
    }

    #[test]
    fn hide_form_clears_the_editing_event() {
        let mut reducer = reducer();
        let mut state = reducer.initial_state().unwrap();
        state = reducer.reduce(&state, add("Meeting", at(2020, 3, 6, 10)));
        let id = events_on_day(&state, date(2020, 3, 6))[0].id.clone();
        state = reducer.reduce(
            &state,
            Action::DisplayAddEventForm {
                date: at(2020, 3, 6, 10),
                id: Some(id),
            },
        );
        assert!(state.editing_event.is_some());

        let state = reducer.reduce(&state, Action::HideAddEventForm);
        assert!(!state.display_add_event_form);
        assert!(state.editing_event.is_none());
        assert_eq!(state.events_per_date.len(), 1);
    }
}
