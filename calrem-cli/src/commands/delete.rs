use anyhow::Result;
use owo_colors::OwoColorize;

use super::Target;
use crate::app::App;
use crate::dates::today;
use crate::utils::prompt;
use crate::utils::tui::create_spinner;

pub async fn run(app: &App, target: Target, yes: bool) -> Result<()> {
    let session = app.current_user()?;
    let username = session.username.as_str();

    let target = match target {
        Target::Pick => {
            let spinner = create_spinner("Loading reminders...");
            let result = app.store.upcoming_reminders(username, Some(today())).await;
            spinner.finish_and_clear();
            let candidates = result?;
            if candidates.is_empty() {
                anyhow::bail!("No upcoming reminders to delete");
            }
            let picked = prompt::pick_reminder("  Delete which reminder?", &candidates)?;
            match &picked.id {
                Some(id) => Target::Id(id.clone()),
                None => Target::Key(picked.key()),
            }
        }
        target => target,
    };

    if !yes && !prompt::confirm("  Delete this reminder?")? {
        println!("{}", "Cancelled".dimmed());
        return Ok(());
    }

    let spinner = create_spinner("Deleting...");
    let result = match &target {
        Target::Id(id) => app.store.delete_reminder(id).await.map(|_| 1),
        Target::Key(key) => app.store.delete_by_key(key).await,
        Target::Pick => Ok(0),
    };
    spinner.finish_and_clear();

    match result? {
        0 => println!("{}", "No matching reminder".yellow()),
        1 => println!("{}", "  Deleted".green()),
        n => println!("{}", format!("  Deleted {} reminders", n).green()),
    }
    Ok(())
}
