//! Interactive prompts used when arguments are left out.

use anyhow::Result;
use calrem_core::reminder::{Meridiem, Reminder, ReminderTime};
use chrono::NaiveDate;
use dialoguer::{Confirm, Input, Select};
use owo_colors::OwoColorize;

use crate::dates::parse_date_arg;

pub fn text(prompt: &str) -> Result<String> {
    Ok(Input::<String>::new().with_prompt(prompt).interact_text()?)
}

/// Free text that may be left blank; `current` is offered as the default.
pub fn optional_text(prompt: &str, current: &str) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(prompt)
        .default(current.to_string())
        .show_default(!current.is_empty())
        .allow_empty(true)
        .interact_text()?)
}

pub fn username() -> Result<String> {
    text("  Username")
}

pub fn password(prompt: &str) -> Result<String> {
    Ok(rpassword::prompt_password(format!("{}: ", prompt))?)
}

pub fn date(prompt: &str, default: NaiveDate) -> Result<NaiveDate> {
    loop {
        let input: String = Input::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .interact_text()?;
        match parse_date_arg(&input) {
            Ok(date) => return Ok(date),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

/// Hour, minute and AM/PM pickers.
pub fn time(current: Option<ReminderTime>) -> Result<ReminderTime> {
    let hours: Vec<String> = (1..=12).map(|h| h.to_string()).collect();
    let minutes: Vec<String> = (0..60).map(|m| format!("{:02}", m)).collect();
    let meridiems = [Meridiem::Am, Meridiem::Pm];

    let hour = Select::new()
        .with_prompt("  Hour")
        .items(&hours)
        .default(current.map_or(8, |t| usize::from(t.hour()) - 1))
        .interact()?;
    let minute = Select::new()
        .with_prompt("  Min")
        .items(&minutes)
        .default(current.map_or(0, |t| usize::from(t.minute())))
        .interact()?;
    let meridiem = Select::new()
        .with_prompt("  AM/PM")
        .items(&meridiems.map(|m| m.as_str()))
        .default(current.map_or(0, |t| usize::from(t.meridiem() == Meridiem::Pm)))
        .interact()?;

    // indices come from the lists above, so they are in range
    Ok(ReminderTime::from_parts(
        hour as u8 + 1,
        minute as u8,
        meridiems[meridiem],
    )?)
}

/// Let the user pick one reminder from a list.
pub fn pick_reminder<'a>(prompt: &str, reminders: &'a [Reminder]) -> Result<&'a Reminder> {
    let items: Vec<String> = reminders
        .iter()
        .map(|r| format!("{}  {} — {}", r.date, r.time, r.title))
        .collect();
    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;
    Ok(&reminders[selection])
}

pub fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}
