use anyhow::Result;
use calrem_core::reminder::{Reminder, ReminderDraft, ReminderTime};
use owo_colors::OwoColorize;

use super::{Target, by_id, first_key_match, parse_optional_date};
use crate::app::App;
use crate::dates::today;
use crate::utils::prompt;
use crate::utils::tui::create_spinner;

/// Replacement values given on the command line.
#[derive(Debug, Default)]
pub struct Changes {
    pub date: Option<String>,
    pub time: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Changes {
    fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.time.is_none()
            && self.title.is_none()
            && self.description.is_none()
    }

    /// Fill in whatever was not given from the existing reminder.
    fn into_draft(self, existing: &Reminder) -> Result<ReminderDraft> {
        let date = parse_optional_date(self.date)?.unwrap_or(existing.date);
        let time = match self.time {
            Some(t) => ReminderTime::parse(&t)?,
            None => existing.time,
        };
        Ok(ReminderDraft::new(
            date,
            time,
            self.title.as_deref().unwrap_or(&existing.title),
            self.description.as_deref().unwrap_or(&existing.description),
        )?)
    }
}

pub async fn run(app: &App, target: Target, changes: Changes) -> Result<()> {
    let session = app.current_user()?;
    let username = session.username.as_str();

    let spinner = create_spinner("Loading reminders...");
    let result = match &target {
        Target::Key(key) => app.store.reminders_for_date(username, key.date).await,
        Target::Id(_) => app.store.upcoming_reminders(username, None).await,
        Target::Pick => app.store.upcoming_reminders(username, Some(today())).await,
    };
    spinner.finish_and_clear();
    let candidates = result?;

    let existing = match &target {
        Target::Key(key) => first_key_match(&candidates, key)
            .ok_or_else(|| anyhow::anyhow!("No reminder \"{}\" at {} on {}", key.title, key.time, key.date))?,
        Target::Id(id) => by_id(&candidates, id)?,
        Target::Pick => {
            if candidates.is_empty() {
                anyhow::bail!("No upcoming reminders to edit");
            }
            prompt::pick_reminder("  Edit which reminder?", &candidates)?
        }
    };

    let draft = if changes.is_empty() {
        prompt_draft(existing)?
    } else {
        changes.into_draft(existing)?
    };

    let spinner = create_spinner("Saving...");
    let result = match (&target, existing.id.as_deref()) {
        (Target::Key(key), _) => app.store.update_by_key(key, &draft).await,
        (_, Some(id)) => app.store.update_reminder(id, &draft).await.map(|_| 1),
        (_, None) => Ok(0),
    };
    spinner.finish_and_clear();
    let updated = result?;

    let message = match updated {
        0 => "  Nothing updated".to_string(),
        1 => format!("  Updated: {}  {} — {}", draft.date, draft.time, draft.title),
        n => format!("  Updated {} reminders: {}  {} — {}", n, draft.date, draft.time, draft.title),
    };
    println!("{}", message.green());
    Ok(())
}

/// The edit form: every field pre-filled with the current value.
fn prompt_draft(existing: &Reminder) -> Result<ReminderDraft> {
    let title = prompt::optional_text("  Title", &existing.title)?;
    let date = prompt::date("  Date", existing.date)?;
    let time = prompt::time(Some(existing.time))?;
    let description = prompt::optional_text("  Description", &existing.description)?;
    Ok(ReminderDraft::new(date, time, &title, &description)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn existing() -> Reminder {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let time = ReminderTime::parse("9:30 AM").unwrap();
        Reminder::new(
            "alice",
            ReminderDraft::new(date, time, "Dentist", "bring card").unwrap(),
        )
    }

    #[test]
    fn unchanged_fields_keep_current_values() {
        let changes = Changes {
            time: Some("10:15 am".into()),
            ..Default::default()
        };
        let draft = changes.into_draft(&existing()).unwrap();
        assert_eq!(draft.time.to_string(), "10:15 AM");
        assert_eq!(draft.date, existing().date);
        assert_eq!(draft.title, "Dentist");
        assert_eq!(draft.description, "bring card");
    }

    #[test]
    fn blank_title_is_rejected() {
        let changes = Changes {
            title: Some("   ".into()),
            ..Default::default()
        };
        assert!(changes.into_draft(&existing()).is_err());
    }
}
