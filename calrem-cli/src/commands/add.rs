use anyhow::Result;
use calrem_core::reminder::{ReminderDraft, ReminderTime};
use owo_colors::OwoColorize;

use crate::app::App;
use crate::dates::today;
use crate::utils::prompt;
use crate::utils::tui::create_spinner;

use super::parse_optional_date;

pub async fn run(
    app: &App,
    title: Option<String>,
    date: Option<String>,
    time: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let session = app.current_user()?;
    let interactive = title.is_none() || time.is_none();

    let title = match title {
        Some(t) => t,
        None => prompt::text("  Title")?,
    };

    let date = match parse_optional_date(date)? {
        Some(d) => d,
        None if interactive => prompt::date("  Date", today())?,
        None => today(),
    };

    let time = match time {
        Some(t) => ReminderTime::parse(&t)?,
        None => prompt::time(None)?,
    };

    let description = match description {
        Some(d) => d,
        None if interactive => prompt::optional_text("  Description (skip)", "")?,
        None => String::new(),
    };

    let draft = ReminderDraft::new(date, time, &title, &description)?;

    let spinner = create_spinner("Saving...");
    let result = app.store.add_reminder(&session.username, draft).await;
    spinner.finish_and_clear();
    let saved = result?;

    if interactive {
        println!();
    }
    println!(
        "{}",
        format!("  Added: {}  {}", saved.date, saved).green()
    );
    Ok(())
}
