use std::cell::Cell;
use std::rc::Rc;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use dialoguer::Input;
use monthgrid_core::config::MonthgridConfig;
use monthgrid_core::date_grid::{is_today, set_to_current_hour};
use monthgrid_core::form::EventForm;
use monthgrid_core::format::format_day;
use monthgrid_core::view::DayView;
use monthgrid_core::{Action, CalendarSession, Clock, EventId, IdGenerator, Reducer};
use owo_colors::OwoColorize;

use crate::commands::input::{PROMPT_DATETIME_FORMAT, parse_datetime, parse_day, parse_end};
use crate::render::{render_day_events, render_month};

const HELP: &str = "\
  next | n              show the next month
  prev | p              show the previous month
  today | t             jump back to the current month
  add | a <day>         add an event on <day>
  edit | e <day> <n>    edit the n-th event of <day>
  delete | d <day> <n>  delete the n-th event of <day>
  list | l <day>        list the events of <day>
  json                  print the calendar state as JSON
  help | h              show this help
  quit | q              leave

  <day> is a day of the displayed month (6) or a date (2020-03-06).";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Today,
    Add(NaiveDate),
    Edit(NaiveDate, usize),
    Delete(NaiveDate, usize),
    List(NaiveDate),
    Json,
    Help,
    Quit,
    Nothing,
}

/// Run the prompt loop until the user quits. Events live only as long as the
/// loop does.
pub fn run(config: &MonthgridConfig) -> Result<()> {
    let reducer = Reducer::system().with_edit_policy(config.edit_policy);
    let mut session = CalendarSession::new(reducer)?;

    let dirty = Rc::new(Cell::new(true));
    let flag = Rc::clone(&dirty);
    session.subscribe(move |_| flag.set(true));

    println!("{}", "Type 'help' for commands.".dimmed());

    loop {
        if dirty.replace(false) {
            println!();
            println!("{}", render_month(session.state(), session.clock()));
            println!();
        }

        let line: String = Input::new()
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()?;

        let command = match parse_command(&line, session.state().month) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
                continue;
            }
        };

        let outcome = match command {
            Command::Next => navigate(&mut session, Action::IncrementMonth),
            Command::Prev => navigate(&mut session, Action::DecrementMonth),
            Command::Today => navigate(&mut session, Action::GoToday),
            Command::Add(day) => add_event(&mut session, day, config),
            Command::Edit(day, n) => edit_event(&mut session, day, n, config),
            Command::Delete(day, n) => delete_event(&mut session, day, n),
            Command::List(day) => {
                list_events(&session, day);
                Ok(())
            }
            Command::Json => serde_json::to_string_pretty(session.state())
                .map(|json| println!("{}", json))
                .context("Could not serialize calendar state"),
            Command::Help => {
                println!("{}", HELP);
                Ok(())
            }
            Command::Quit => break,
            Command::Nothing => Ok(()),
        };

        if let Err(e) = outcome {
            eprintln!("  {}", e.to_string().red());
        }
    }

    Ok(())
}

pub fn parse_command(line: &str, month: NaiveDate) -> Result<Command> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, args)) = words.split_first() else {
        return Ok(Command::Nothing);
    };

    let command = match (name.to_lowercase().as_str(), args) {
        ("next" | "n", []) => Command::Next,
        ("prev" | "p", []) => Command::Prev,
        ("today" | "t", []) => Command::Today,
        ("add" | "a", [day]) => Command::Add(parse_day(day, month)?),
        ("edit" | "e", [day, n]) => Command::Edit(parse_day(day, month)?, parse_position(n)?),
        ("delete" | "d", [day, n]) => Command::Delete(parse_day(day, month)?, parse_position(n)?),
        ("list" | "l", [day]) => Command::List(parse_day(day, month)?),
        ("json", []) => Command::Json,
        ("help" | "h", []) => Command::Help,
        ("quit" | "q", []) => Command::Quit,
        _ => anyhow::bail!("Unknown command '{}'. Type 'help' for commands.", line.trim()),
    };

    Ok(command)
}

fn parse_position(input: &str) -> Result<usize> {
    match input.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => anyhow::bail!("Invalid event number '{}'", input),
    }
}

fn navigate<C: Clock, G: IdGenerator>(
    session: &mut CalendarSession<C, G>,
    action: Action,
) -> Result<()> {
    session.dispatch(action);
    Ok(())
}

fn add_event<C: Clock, G: IdGenerator>(
    session: &mut CalendarSession<C, G>,
    day: NaiveDate,
    config: &MonthgridConfig,
) -> Result<()> {
    let start = set_to_current_hour(day, 0, session.clock())?;
    session.dispatch(Action::DisplayAddEventForm {
        date: start,
        id: None,
    });
    submit_form(session, config)
}

fn edit_event<C: Clock, G: IdGenerator>(
    session: &mut CalendarSession<C, G>,
    day: NaiveDate,
    n: usize,
    config: &MonthgridConfig,
) -> Result<()> {
    let id = nth_event_id(session, day, n)?;
    session.dispatch(Action::DisplayAddEventForm {
        date: day.and_time(NaiveTime::MIN),
        id: Some(id),
    });
    submit_form(session, config)
}

fn delete_event<C: Clock, G: IdGenerator>(
    session: &mut CalendarSession<C, G>,
    day: NaiveDate,
    n: usize,
) -> Result<()> {
    let id = nth_event_id(session, day, n)?;
    session.dispatch(Action::DeleteEvent { date: day, id });
    println!("{}", "  Deleted".red());
    Ok(())
}

fn nth_event_id<C: Clock, G: IdGenerator>(
    session: &CalendarSession<C, G>,
    day: NaiveDate,
    n: usize,
) -> Result<EventId> {
    session
        .state()
        .events_on_day(day)
        .get(n - 1)
        .map(|event| event.id.clone())
        .with_context(|| format!("No event #{} on {}", n, day))
}

fn list_events<C: Clock, G: IdGenerator>(session: &CalendarSession<C, G>, day: NaiveDate) {
    let cell = DayView {
        date: day,
        label: format_day(day),
        day_name: None,
        in_month: true,
        is_today: is_today(day, session.clock()),
        events: session.state().events_on_day(day),
    };
    for line in render_day_events(&cell) {
        println!("{}", line);
    }
}

/// Prompt for the form fields, then dispatch the add/edit and close the form.
/// An empty name or a failed prompt closes the form without saving.
fn submit_form<C: Clock, G: IdGenerator>(
    session: &mut CalendarSession<C, G>,
    config: &MonthgridConfig,
) -> Result<()> {
    let filled = EventForm::from_state(session.state(), config.default_event_duration_hours)
        .map_err(anyhow::Error::from)
        .and_then(prompt_form);

    session.dispatch(Action::HideAddEventForm);

    let Some(form) = filled? else {
        println!("{}", "  Cancelled".dimmed());
        return Ok(());
    };

    let verb = if form.is_editing() { "Updated" } else { "Created" };
    let name = form.name.clone();
    if form.end_date < form.start_date {
        eprintln!("  {}", "Warning: the event ends before it starts".yellow());
    }

    session.dispatch(form.into_action());
    println!("{}", format!("  {}: {}", verb, name).green());
    Ok(())
}

fn prompt_form(mut form: EventForm) -> Result<Option<EventForm>> {
    let name: String = Input::new()
        .with_prompt("  Name (empty to cancel)")
        .with_initial_text(form.name.clone())
        .allow_empty(true)
        .interact_text()?;
    if name.trim().is_empty() {
        return Ok(None);
    }
    form.name = name.trim().to_string();

    form.start_date = loop {
        let input: String = Input::new()
            .with_prompt("  Starts")
            .default(form.start_date.format(PROMPT_DATETIME_FORMAT).to_string())
            .interact_text()?;
        match parse_datetime(&input) {
            Ok(start) => break start,
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    };

    form.end_date = loop {
        let input: String = Input::new()
            .with_prompt("  Ends (time or duration)")
            .default(form.end_date.format(PROMPT_DATETIME_FORMAT).to_string())
            .interact_text()?;
        match parse_end(&input, form.start_date) {
            Ok(end) => break end,
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    };

    Ok(Some(form))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, 6).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, d).unwrap()
    }

    #[test]
    fn navigation_commands() {
        assert_eq!(parse_command("next", march()).unwrap(), Command::Next);
        assert_eq!(parse_command("p", march()).unwrap(), Command::Prev);
        assert_eq!(parse_command("  TODAY ", march()).unwrap(), Command::Today);
        assert_eq!(parse_command("q", march()).unwrap(), Command::Quit);
    }

    #[test]
    fn blank_line_does_nothing() {
        assert_eq!(parse_command("", march()).unwrap(), Command::Nothing);
        assert_eq!(parse_command("   ", march()).unwrap(), Command::Nothing);
    }

    #[test]
    fn day_commands() {
        assert_eq!(parse_command("add 6", march()).unwrap(), Command::Add(day(6)));
        assert_eq!(parse_command("e 12 2", march()).unwrap(), Command::Edit(day(12), 2));
        assert_eq!(
            parse_command("delete 2020-03-31 1", march()).unwrap(),
            Command::Delete(day(31), 1)
        );
        assert_eq!(parse_command("l 1", march()).unwrap(), Command::List(day(1)));
    }

    #[test]
    fn bad_commands_are_errors() {
        assert!(parse_command("jump", march()).is_err());
        assert!(parse_command("next 3", march()).is_err());
        assert!(parse_command("add", march()).is_err());
        assert!(parse_command("add 32", march()).is_err());
        assert!(parse_command("edit 6 0", march()).is_err());
        assert!(parse_command("delete 6 x", march()).is_err());
    }
}
