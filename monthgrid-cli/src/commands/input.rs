//! Parsing of dates, times and durations typed by the user.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};
use monthgrid_core::format::format_month_year_label;

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%d/%m/%Y %H:%M"];

/// Format used to pre-fill date/time prompts.
pub const PROMPT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A month given as `YYYY-MM`, returned as its first day.
pub fn parse_month(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid month '{}'. Expected YYYY-MM", input))
}

/// A day of the displayed month (`6`) or a full date (`2020-03-06`).
pub fn parse_day(input: &str, month: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();

    if let Ok(day) = input.parse::<u32>() {
        return NaiveDate::from_ymd_opt(month.year(), month.month(), day).with_context(|| {
            format!("There is no day {} in {}", day, format_month_year_label(month))
        });
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid day '{}'. Expected a day number or YYYY-MM-DD", input))
}

/// Exact formats first, then natural language ("tomorrow 3pm").
pub fn parse_datetime(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(datetime);
        }
    }

    fuzzydate::parse(input).map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))
}

/// An end given as a duration after `start` ("90m", "2h") or as a date/time,
/// optionally prefixed by "until"/"to".
pub fn parse_end(input: &str, start: NaiveDateTime) -> Result<NaiveDateTime> {
    let input = input.trim();

    if let Ok(end) = apply_duration(start, input) {
        return Ok(end);
    }

    let cleaned = input
        .strip_prefix("until ")
        .or_else(|| input.strip_prefix("to "))
        .unwrap_or(input);

    parse_datetime(cleaned)
}

fn apply_duration(start: NaiveDateTime, input: &str) -> Result<NaiveDateTime> {
    let std_dur = humantime::parse_duration(input).map_err(|e| anyhow::anyhow!("{}", e))?;
    let delta = TimeDelta::from_std(std_dur).context("Duration too large")?;
    start
        .checked_add_signed(delta)
        .context("End falls outside the calendar")
}
