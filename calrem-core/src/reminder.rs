//! Reminder types.
//!
//! A reminder is a titled note pinned to a date and a wall-clock time. Dates
//! are stored as `yyyy-MM-dd` and times as `h:mm AM|PM`, which is also the
//! shape they have in the backing document store.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CalRemError, CalRemResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Meridiem {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

impl Meridiem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

impl FromStr for Meridiem {
    type Err = CalRemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AM" => Ok(Meridiem::Am),
            "PM" => Ok(Meridiem::Pm),
            _ => Err(CalRemError::InvalidTime(s.to_string())),
        }
    }
}

/// A 12-hour clock time such as `9:05 AM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReminderTime {
    hour: u8,
    minute: u8,
    meridiem: Meridiem,
}

impl ReminderTime {
    /// Build a time from the three pickers of the reminder form.
    pub fn from_parts(hour: u8, minute: u8, meridiem: Meridiem) -> CalRemResult<Self> {
        if !(1..=12).contains(&hour) || minute > 59 {
            return Err(CalRemError::InvalidTime(format!(
                "{}:{:02} {}",
                hour,
                minute,
                meridiem.as_str()
            )));
        }
        Ok(ReminderTime {
            hour,
            minute,
            meridiem,
        })
    }

    /// Parse `h:mm AM`, tolerating extra whitespace and a lowercase meridiem.
    pub fn parse(s: &str) -> CalRemResult<Self> {
        let invalid = || CalRemError::InvalidTime(s.to_string());
        let trimmed = s.trim();

        let (clock, meridiem) = match trimmed.rsplit_once(char::is_whitespace) {
            Some((clock, meridiem)) => (clock.trim(), meridiem),
            None => {
                // "9:30am"
                let split = trimmed.len().checked_sub(2).ok_or_else(invalid)?;
                if !trimmed.is_char_boundary(split) {
                    return Err(invalid());
                }
                trimmed.split_at(split)
            }
        };
        let meridiem: Meridiem = meridiem.parse().map_err(|_| invalid())?;

        let (hour, minute) = clock.split_once(':').ok_or_else(invalid)?;
        if minute.len() != 2 {
            return Err(invalid());
        }
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;

        Self::from_parts(hour, minute, meridiem).map_err(|_| invalid())
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn meridiem(&self) -> Meridiem {
        self.meridiem
    }

    /// Minutes since midnight, 12 AM being 0.
    pub fn minutes_since_midnight(&self) -> u16 {
        let hour24 = match (self.meridiem, self.hour) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Am, h) => h,
            (Meridiem::Pm, 12) => 12,
            (Meridiem::Pm, h) => h + 12,
        };
        u16::from(hour24) * 60 + u16::from(self.minute)
    }
}

impl Ord for ReminderTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.minutes_since_midnight()
            .cmp(&other.minutes_since_midnight())
    }
}

impl PartialOrd for ReminderTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{:02} {}", self.hour, self.minute, self.meridiem.as_str())
    }
}

impl FromStr for ReminderTime {
    type Err = CalRemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ReminderTime {
    type Error = CalRemError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ReminderTime> for String {
    fn from(value: ReminderTime) -> Self {
        value.to_string()
    }
}

/// Parse an ISO `yyyy-MM-dd` date.
pub fn parse_date(s: &str) -> CalRemResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| CalRemError::InvalidDate(s.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Assigned by the store; `None` until the reminder has been saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub username: String,
    pub date: NaiveDate,
    pub time: ReminderTime,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Reminder {
    pub fn new(username: &str, draft: ReminderDraft) -> Self {
        Reminder {
            id: None,
            username: username.to_string(),
            date: draft.date,
            time: draft.time,
            title: draft.title,
            description: draft.description,
        }
    }

    pub fn key(&self) -> ReminderKey {
        ReminderKey {
            username: self.username.clone(),
            date: self.date,
            time: self.time,
            title: self.title.clone(),
        }
    }

    /// Overwrite the editable fields, keeping id and owner.
    pub fn apply(&mut self, draft: &ReminderDraft) {
        self.date = draft.date;
        self.time = draft.time;
        self.title = draft.title.clone();
        self.description = draft.description.clone();
    }

    /// `9:30 AM — Dentist`, description on the following line.
    pub fn day_label(&self) -> String {
        with_description(format!("{} — {}", self.time, self.title), &self.description)
    }

    /// `2026-10-18  9:30 AM — Dentist`, description on the following line.
    pub fn upcoming_label(&self) -> String {
        with_description(
            format!("{}  {} — {}", self.date, self.time, self.title),
            &self.description,
        )
    }
}

fn with_description(base: String, description: &str) -> String {
    if description.trim().is_empty() {
        base
    } else {
        format!("{}\n{}", base, description)
    }
}

impl fmt::Display for Reminder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} — {}", self.time, self.title)
    }
}

/// Sort by date, then chronologically by time.
pub fn sort_reminders(reminders: &mut [Reminder]) {
    reminders.sort_by(|a, b| a.date.cmp(&b.date).then(a.time.cmp(&b.time)));
}

/// The (username, date, time, title) tuple used to look reminders up when no
/// id is at hand. Several reminders can share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReminderKey {
    pub username: String,
    pub date: NaiveDate,
    pub time: ReminderTime,
    pub title: String,
}

impl ReminderKey {
    pub fn matches(&self, reminder: &Reminder) -> bool {
        reminder.username == self.username
            && reminder.date == self.date
            && reminder.time == self.time
            && reminder.title == self.title
    }
}

/// Validated content of the reminder form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderDraft {
    pub date: NaiveDate,
    pub time: ReminderTime,
    pub title: String,
    pub description: String,
}

impl ReminderDraft {
    pub fn new(
        date: NaiveDate,
        time: ReminderTime,
        title: &str,
        description: &str,
    ) -> CalRemResult<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CalRemError::Validation("title must not be empty".into()));
        }
        Ok(ReminderDraft {
            date,
            time,
            title: title.to_string(),
            description: description.trim().to_string(),
        })
    }

    /// Draft pre-filled from an existing reminder, as the edit form does.
    pub fn from_reminder(reminder: &Reminder) -> Self {
        ReminderDraft {
            date: reminder.date,
            time: reminder.time,
            title: reminder.title.clone(),
            description: reminder.description.clone(),
        }
    }
}
