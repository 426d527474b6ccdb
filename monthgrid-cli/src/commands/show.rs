use anyhow::{Context, Result};
use chrono::NaiveTime;
use monthgrid_core::{Calendar, Clock, SystemClock};

use crate::commands::input::parse_month;
use crate::render::render_month;

/// Print one month, either drawn or as the JSON state snapshot.
pub fn run(month: Option<String>, json: bool) -> Result<()> {
    let clock = SystemClock;

    let now = match month {
        Some(m) => parse_month(&m)?.and_time(NaiveTime::MIN),
        None => clock.now(),
    };
    let state = Calendar::new(now)?;

    if json {
        let snapshot =
            serde_json::to_string_pretty(&state).context("Could not serialize calendar state")?;
        println!("{}", snapshot);
    } else {
        println!("{}", render_month(&state, &clock));
    }

    Ok(())
}
