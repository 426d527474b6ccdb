//! Display strings. French is the only supported locale.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::event::Event;

const MONTH_NAMES: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

// Monday first.
const DAY_NAMES: [&str; 7] = [
    "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
];

const HOUR_PATTERN: &str = "%H:%M";

/// Month name, e.g. "mars".
pub fn format_month_label(date: NaiveDate) -> String {
    MONTH_NAMES[date.month0() as usize].to_string()
}

/// Month name and year, e.g. "mars 2020".
pub fn format_month_year_label(date: NaiveDate) -> String {
    format!("{} {}", format_month_label(date), date.year())
}

/// Weekday name, e.g. "vendredi".
pub fn format_day_name(date: NaiveDate) -> String {
    DAY_NAMES[date.weekday().num_days_from_monday() as usize].to_string()
}

/// Zero-padded day of month, e.g. "06".
pub fn format_day(date: NaiveDate) -> String {
    format!("{:02}", date.day())
}

pub fn format_hour(datetime: NaiveDateTime) -> String {
    datetime.format(HOUR_PATTERN).to_string()
}

/// Chip label for an event: "10:00-11:00 Meeting".
pub fn format_event_label(event: &Event) -> String {
    format!(
        "{}-{} {}",
        format_hour(event.start_date),
        format_hour(event.end_date),
        event.name
    )
}
