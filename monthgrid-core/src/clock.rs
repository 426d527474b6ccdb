//! Wall-clock source.
//!
//! Everything that depends on "now" (`is_today`, `GoToday`, the default start
//! hour of a new event) reads it through a [`Clock`] so tests can pin it.

use std::cell::Cell;

use chrono::{Local, NaiveDate, NaiveDateTime};

pub trait Clock {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// The real local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a given instant, movable by hand.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        FixedClock {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}
