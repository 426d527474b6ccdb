//! Core state for a month-view calendar.
//!
//! This crate holds everything a month calendar UI needs apart from drawing:
//! - `date_grid`: month arithmetic and the 5x7 grid of displayed dates
//! - `store`: events grouped by start day, keyed by `DayKey`
//! - `reducer`: pure `(Calendar, Action) -> Calendar` transitions
//! - `session`: dispatch/subscribe wrapper a front end drives

pub mod action;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod date_grid;
pub mod day_key;
pub mod error;
pub mod event;
pub mod form;
pub mod format;
pub mod id;
pub mod reducer;
pub mod session;
pub mod store;
pub mod view;

pub use action::Action;
pub use calendar::{Calendar, events_on_day};
pub use clock::{Clock, FixedClock, SystemClock};
pub use day_key::{DayKey, day_key};
pub use error::{CalendarError, CalendarResult};
pub use event::Event;
pub use id::{EventId, IdGenerator, SequentialIds, UuidGenerator};
pub use reducer::{EditPolicy, Reducer};
pub use session::CalendarSession;
pub use store::EventStore;
