use anyhow::Result;

use crate::app::App;
use crate::dates::today;
use crate::render::grouped_by_date;
use crate::utils::tui::create_spinner;

pub async fn run(app: &App, all: bool) -> Result<()> {
    let session = app.current_user()?;
    let today = today();
    let from = if all { None } else { Some(today) };

    let spinner = create_spinner("Loading reminders...");
    let result = app.store.upcoming_reminders(&session.username, from).await;
    spinner.finish_and_clear();

    println!("{}", grouped_by_date(&result?, today));
    Ok(())
}
