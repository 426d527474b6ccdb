//! TUI rendering for monthgrid-core types.
//!
//! Extension traits that add colored terminal output using owo_colors.

use monthgrid_core::clock::Clock;
use monthgrid_core::date_grid::DAYS_PER_WEEK;
use monthgrid_core::format::{format_event_label, format_month_year_label};
use monthgrid_core::view::{DayView, month_view};
use monthgrid_core::{Calendar, Event};
use owo_colors::OwoColorize;

/// Width of one grid column, including spacing.
const CELL_WIDTH: usize = 6;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for DayView<'_> {
    fn render(&self) -> String {
        let marker = if self.events.is_empty() { " " } else { "•" };
        let text = pad(&format!("{}{}", self.label, marker));

        if !self.in_month {
            text.dimmed().to_string()
        } else if self.is_today {
            text.blue().bold().to_string()
        } else {
            text
        }
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let label = format_event_label(self);
        if self.has_valid_range() {
            label
        } else {
            format!("{} {}", label, "(ends before it starts)".yellow())
        }
    }
}

/// Render the header, the 5x7 grid and the events of the displayed days.
pub fn render_month<C: Clock + ?Sized>(state: &Calendar, clock: &C) -> String {
    let cells = month_view(state, clock);
    let mut lines = Vec::new();

    lines.push(format_month_year_label(state.month).bold().to_string());

    let header: String = cells
        .iter()
        .take(DAYS_PER_WEEK)
        .map(|cell| {
            let name = cell.day_name.as_deref().unwrap_or_default();
            pad(&name.chars().take(3).collect::<String>())
        })
        .collect();
    lines.push(header.dimmed().to_string());

    for week in cells.chunks(DAYS_PER_WEEK) {
        lines.push(week.iter().map(Render::render).collect());
    }

    let busy: Vec<_> = cells.iter().filter(|cell| !cell.events.is_empty()).collect();
    if !busy.is_empty() {
        lines.push(String::new());
    }
    for cell in busy {
        lines.extend(render_day_events(cell));
    }

    lines.join("\n")
}

/// One line per event of a day, numbered from 1.
pub fn render_day_events(cell: &DayView<'_>) -> Vec<String> {
    let mut lines = vec![format!("{}", cell.date.format("%d/%m/%Y")).bold().to_string()];
    if cell.events.is_empty() {
        lines.push(format!("   {}", "No events".dimmed()));
    }
    for (index, event) in cell.events.iter().enumerate() {
        lines.push(format!("   {}. {}", index + 1, event.render()));
    }
    lines
}

fn pad(text: &str) -> String {
    format!("{:<width$}", text, width = CELL_WIDTH)
}
