//! Per-cell view model of the month grid.

use chrono::{Datelike, NaiveDate};

use crate::calendar::Calendar;
use crate::clock::Clock;
use crate::date_grid::{DAYS_PER_WEEK, is_same_month, is_today};
use crate::event::Event;
use crate::format::{format_day, format_day_name};

/// What one grid cell shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DayView<'a> {
    pub date: NaiveDate,
    /// Zero-padded day of month.
    pub label: String,
    /// Weekday name; only set on the first row.
    pub day_name: Option<String>,
    pub in_month: bool,
    pub is_today: bool,
    pub events: &'a [Event],
}

/// The 35 cells of the displayed month, row by row.
pub fn month_view<'a, C: Clock + ?Sized>(state: &'a Calendar, clock: &C) -> Vec<DayView<'a>> {
    let month_number = state.month.month();

    state
        .dates_to_display
        .iter()
        .enumerate()
        .map(|(index, date)| DayView {
            date,
            label: format_day(date),
            day_name: (index < DAYS_PER_WEEK).then(|| format_day_name(date)),
            in_month: is_same_month(date, month_number),
            is_today: is_today(date, clock),
            events: state.events_on_day(date),
        })
        .collect()
}
