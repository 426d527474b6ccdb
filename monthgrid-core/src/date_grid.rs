//! Month arithmetic and the fixed 5x7 display grid.
//!
//! The grid always starts on the Monday of the week holding the first of the
//! month and runs for 35 consecutive days. Months that would need a sixth row
//! (e.g. March 2020, which starts on a Sunday) lose their last days; the
//! widget has always shown five weeks.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::{CalendarError, CalendarResult};

pub const DAYS_PER_WEEK: usize = 7;
pub const WEEKS_PER_GRID: usize = 5;
pub const GRID_CELLS: usize = DAYS_PER_WEEK * WEEKS_PER_GRID;

/// The dates shown for one month, row by row (Monday first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayGrid {
    weeks: [[NaiveDate; DAYS_PER_WEEK]; WEEKS_PER_GRID],
}

impl DisplayGrid {
    pub fn cell(&self, row: usize, col: usize) -> Option<NaiveDate> {
        self.weeks.get(row).and_then(|week| week.get(col)).copied()
    }

    /// All cells in display order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.weeks.iter().flat_map(|week| week.iter().copied())
    }

    pub fn first(&self) -> NaiveDate {
        self.weeks[0][0]
    }

    pub fn last(&self) -> NaiveDate {
        self.weeks[WEEKS_PER_GRID - 1][DAYS_PER_WEEK - 1]
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first() && date <= self.last()
    }
}

/// Compute the 35-cell grid for the month containing `month`.
///
/// Only the year and month of the input matter.
pub fn compute_display_grid(month: NaiveDate) -> CalendarResult<DisplayGrid> {
    let start = first_day_of_week(first_day_of_month(month))?;

    let mut weeks = [[start; DAYS_PER_WEEK]; WEEKS_PER_GRID];
    for (row, week) in weeks.iter_mut().enumerate() {
        for (col, cell) in week.iter_mut().enumerate() {
            let offset = (row * DAYS_PER_WEEK + col) as u64;
            *cell = start.checked_add_days(Days::new(offset)).ok_or_else(|| {
                CalendarError::DateOutOfRange(format!("grid for {} runs past the calendar", month))
            })?;
        }
    }

    Ok(DisplayGrid { weeks })
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Monday of the ISO week containing `date`.
pub fn first_day_of_week(date: NaiveDate) -> CalendarResult<NaiveDate> {
    let back = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(back))
        .ok_or_else(|| CalendarError::DateOutOfRange(format!("no Monday before {}", date)))
}

/// One calendar month later. A day-of-month missing from the target month
/// clamps to its last day (Jan 31 -> Feb 29 in 2020).
pub fn increment_month(month: NaiveDate) -> CalendarResult<NaiveDate> {
    month
        .checked_add_months(Months::new(1))
        .ok_or_else(|| CalendarError::DateOutOfRange(format!("no month after {}", month)))
}

/// One calendar month earlier, clamping like [`increment_month`].
pub fn decrement_month(month: NaiveDate) -> CalendarResult<NaiveDate> {
    month
        .checked_sub_months(Months::new(1))
        .ok_or_else(|| CalendarError::DateOutOfRange(format!("no month before {}", month)))
}

/// Compares the 1-based month number only; the year is ignored.
pub fn is_same_month(date: NaiveDate, month_number: u32) -> bool {
    date.month() == month_number
}

pub fn is_today<C: Clock + ?Sized>(date: NaiveDate, clock: &C) -> bool {
    date == clock.today()
}

/// `day` at the clock's current hour plus `offset_hours`, on the hour.
/// Hours past 23 spill over into the following days.
pub fn set_to_current_hour<C: Clock + ?Sized>(
    day: NaiveDate,
    offset_hours: i64,
    clock: &C,
) -> CalendarResult<NaiveDateTime> {
    let hours = i64::from(clock.now().hour()) + offset_hours;
    add_hours(day.and_time(NaiveTime::MIN), hours)
}

pub fn add_hours(date: NaiveDateTime, hours: i64) -> CalendarResult<NaiveDateTime> {
    TimeDelta::try_hours(hours)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| {
            CalendarError::DateOutOfRange(format!("{} shifted by {}h", date, hours))
        })
}
