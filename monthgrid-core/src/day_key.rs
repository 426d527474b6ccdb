//! Grouping key for the per-day event store.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// chrono pattern for day keys: zero-padded day-month-year.
pub const DAY_KEY_PATTERN: &str = "%d-%m-%Y";

/// Calendar day an event is filed under, e.g. `06-03-2020`.
///
/// Derived from the date alone, so every time on the same day maps to the
/// same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(String);

impl DayKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn day_key(date: NaiveDate) -> DayKey {
    DayKey(date.format(DAY_KEY_PATTERN).to_string())
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        day_key(date)
    }
}

impl From<NaiveDateTime> for DayKey {
    fn from(datetime: NaiveDateTime) -> Self {
        day_key(datetime.date())
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
