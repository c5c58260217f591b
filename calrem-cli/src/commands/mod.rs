pub mod add;
pub mod auth;
pub mod delete;
pub mod edit;
pub mod list;
pub mod show;
pub mod upcoming;

use anyhow::Result;
use calrem_core::reminder::{Reminder, ReminderKey, ReminderTime};
use chrono::NaiveDate;

use crate::dates::parse_date_arg;

/// Which reminder(s) a command should act on.
pub enum Target {
    Id(String),
    Key(ReminderKey),
    /// Nothing given: pick interactively.
    Pick,
}

impl Target {
    pub fn from_args(
        username: &str,
        id: Option<String>,
        date: Option<String>,
        time: Option<String>,
        title: Option<String>,
    ) -> Result<Self> {
        if let Some(id) = id {
            return Ok(Target::Id(id));
        }
        match (date, time, title) {
            (None, None, None) => Ok(Target::Pick),
            (Some(date), Some(time), Some(title)) => Ok(Target::Key(ReminderKey {
                username: username.to_string(),
                date: parse_date_arg(&date)?,
                time: ReminderTime::parse(&time)?,
                title: title.trim().to_string(),
            })),
            _ => anyhow::bail!(
                "Identify the reminder with --id, or with all of --date, --time and --title"
            ),
        }
    }
}

/// The reminder behind an id, looked up among the user's reminders.
pub fn by_id<'a>(reminders: &'a [Reminder], id: &str) -> Result<&'a Reminder> {
    reminders
        .iter()
        .find(|r| r.id.as_deref() == Some(id))
        .ok_or_else(|| anyhow::anyhow!("Reminder '{}' not found", id))
}

pub fn first_key_match<'a>(reminders: &'a [Reminder], key: &ReminderKey) -> Option<&'a Reminder> {
    reminders.iter().find(|r| key.matches(r))
}

pub fn parse_optional_date(date: Option<String>) -> Result<Option<NaiveDate>> {
    date.as_deref().map(parse_date_arg).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use calrem_core::reminder::ReminderDraft;

    fn reminder(id: &str) -> Reminder {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let time = ReminderTime::parse("9:30 AM").unwrap();
        let mut r = Reminder::new("alice", ReminderDraft::new(date, time, "Dentist", "").unwrap());
        r.id = Some(id.to_string());
        r
    }

    #[test]
    fn id_wins_over_key_fields() {
        let target = Target::from_args("alice", Some("abc".into()), Some("2026-10-18".into()), None, None)
            .unwrap();
        assert!(matches!(target, Target::Id(id) if id == "abc"));
    }

    #[test]
    fn key_needs_every_field() {
        assert!(Target::from_args("alice", None, Some("2026-10-18".into()), None, None).is_err());
        assert!(matches!(
            Target::from_args("alice", None, None, None, None).unwrap(),
            Target::Pick
        ));

        let target = Target::from_args(
            "alice",
            None,
            Some("2026-10-18".into()),
            Some("9:30 am".into()),
            Some(" Dentist ".into()),
        )
        .unwrap();
        match target {
            Target::Key(key) => {
                assert_eq!(key.title, "Dentist");
                assert!(key.matches(&reminder("x")));
            }
            _ => panic!("expected a key target"),
        }
    }

    #[test]
    fn finds_by_id() {
        let reminders = vec![reminder("a"), reminder("b")];
        assert_eq!(by_id(&reminders, "b").unwrap().id.as_deref(), Some("b"));
        assert!(by_id(&reminders, "c").is_err());
    }
}
