use anyhow::Result;
use chrono::{Datelike, NaiveDate};

use crate::app::App;
use crate::dates::today;
use crate::render::{grouped_by_date, reminder_list};
use crate::utils::tui::create_spinner;

#[derive(Debug, Clone, Copy)]
pub enum ListScope {
    Day(NaiveDate),
    /// Any date inside the month.
    Month(NaiveDate),
}

pub async fn run(app: &App, scope: ListScope) -> Result<()> {
    let session = app.current_user()?;
    let username = session.username.as_str();

    let spinner = create_spinner("Loading reminders...");
    let result = match scope {
        ListScope::Day(date) => app.store.reminders_for_date(username, date).await,
        ListScope::Month(date) => {
            app.store
                .reminders_for_month(username, date.year(), date.month())
                .await
        }
    };
    spinner.finish_and_clear();
    let reminders = result?;

    match scope {
        ListScope::Day(_) => println!("{}", reminder_list(&reminders)),
        ListScope::Month(_) => println!("{}", grouped_by_date(&reminders, today())),
    }
    Ok(())
}
