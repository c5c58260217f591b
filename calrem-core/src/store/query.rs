//! Equality and date-range filters over the reminders collection.

use chrono::NaiveDate;

use crate::reminder::{Reminder, ReminderKey, ReminderTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFilter {
    #[default]
    Any,
    On(NaiveDate),
    /// Inclusive on both ends.
    Between(NaiveDate, NaiveDate),
    Since(NaiveDate),
}

impl DateFilter {
    pub fn matches(&self, date: NaiveDate) -> bool {
        match *self {
            DateFilter::Any => true,
            DateFilter::On(d) => date == d,
            DateFilter::Between(from, to) => from <= date && date <= to,
            DateFilter::Since(from) => from <= date,
        }
    }
}

/// A query scoped to one user, ANDing every filter that is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderQuery {
    pub username: String,
    pub date: DateFilter,
    pub time: Option<ReminderTime>,
    pub title: Option<String>,
}

impl ReminderQuery {
    pub fn for_user(username: &str) -> Self {
        ReminderQuery {
            username: username.to_string(),
            date: DateFilter::Any,
            time: None,
            title: None,
        }
    }

    pub fn from_key(key: &ReminderKey) -> Self {
        ReminderQuery::for_user(&key.username)
            .on(key.date)
            .at(key.time)
            .titled(&key.title)
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = DateFilter::On(date);
        self
    }

    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date = DateFilter::Between(from, to);
        self
    }

    pub fn since(mut self, from: NaiveDate) -> Self {
        self.date = DateFilter::Since(from);
        self
    }

    pub fn at(mut self, time: ReminderTime) -> Self {
        self.time = Some(time);
        self
    }

    pub fn titled(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn matches(&self, reminder: &Reminder) -> bool {
        reminder.username == self.username
            && self.date.matches(reminder.date)
            && self.time.is_none_or(|t| t == reminder.time)
            && self.title.as_deref().is_none_or(|t| t == reminder.title)
    }
}
