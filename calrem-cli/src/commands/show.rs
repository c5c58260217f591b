use anyhow::Result;
use calrem_core::grid::ViewMode;
use calrem_core::view::CalendarView;
use chrono::NaiveDate;

use crate::app::App;
use crate::dates::today;
use crate::render::{Frame, index_by_day};
use crate::utils::tui::create_spinner;

pub async fn run(
    app: &App,
    view: Option<ViewMode>,
    date: Option<NaiveDate>,
    steps: i32,
) -> Result<()> {
    let session = app.current_user()?;
    let today = today();

    let mut calendar = CalendarView::new(view.unwrap_or(app.config.default_view), date.unwrap_or(today));
    calendar.step(steps);

    let (from, to) = calendar.visible_range();
    let spinner = create_spinner("Loading reminders...");
    let result = app
        .store
        .reminders_in_range(&session.username, from, to)
        .await;
    spinner.finish_and_clear();

    let reminders = index_by_day(result?);
    let frame = Frame {
        view: &calendar,
        reminders: &reminders,
        today,
    };
    println!("{}", frame.render());
    Ok(())
}
