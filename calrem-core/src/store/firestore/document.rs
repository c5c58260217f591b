//! Firestore document encoding.
//!
//! Only string fields are written; every field of a reminder or user is a
//! `stringValue` in the stored document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{CalRemError, CalRemResult};
use crate::reminder::{Reminder, ReminderDraft, ReminderTime, parse_date};
use crate::user::User;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Full resource name, `projects/…/documents/reminders/{id}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

/// One element of a `documents:runQuery` response stream. Elements without a
/// document only carry read metadata.
#[derive(Debug, Deserialize)]
pub struct RunQueryItem {
    pub document: Option<Document>,
}

pub fn string_value(s: &str) -> Value {
    json!({ "stringValue": s })
}

impl Document {
    /// Last path segment of the resource name.
    pub fn id(&self) -> Option<&str> {
        self.name.as_deref().and_then(|n| n.rsplit('/').next())
    }

    fn with_strings<'a>(fields: impl IntoIterator<Item = (&'a str, String)>) -> Self {
        Document {
            name: None,
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), string_value(&v)))
                .collect(),
        }
    }

    fn string(&self, field: &str) -> CalRemResult<&str> {
        self.fields
            .get(field)
            .and_then(|v| v.get("stringValue"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                CalRemError::Serialization(format!(
                    "document {} has no string field '{}'",
                    self.name.as_deref().unwrap_or("<unnamed>"),
                    field
                ))
            })
    }

    fn optional_string(&self, field: &str) -> String {
        self.string(field).map(str::to_string).unwrap_or_default()
    }

    pub fn from_reminder(reminder: &Reminder) -> Self {
        Self::with_strings([
            ("username", reminder.username.clone()),
            ("date", reminder.date.to_string()),
            ("time", reminder.time.to_string()),
            ("title", reminder.title.clone()),
            ("description", reminder.description.clone()),
        ])
    }

    /// The fields an edit replaces; pairs with [`REMINDER_UPDATE_MASK`].
    pub fn from_draft(draft: &ReminderDraft) -> Self {
        Self::with_strings([
            ("date", draft.date.to_string()),
            ("time", draft.time.to_string()),
            ("title", draft.title.clone()),
            ("description", draft.description.clone()),
        ])
    }

    pub fn from_user(user: &User) -> Self {
        Self::with_strings([
            ("username", user.username.clone()),
            ("password", user.password.clone()),
        ])
    }

    pub fn to_reminder(&self) -> CalRemResult<Reminder> {
        Ok(Reminder {
            id: self.id().map(str::to_string),
            username: self.string("username")?.to_string(),
            date: parse_date(self.string("date")?)?,
            time: ReminderTime::parse(self.string("time")?)?,
            title: self.string("title")?.to_string(),
            description: self.optional_string("description"),
        })
    }

    pub fn to_user(&self) -> CalRemResult<User> {
        // older user documents only carry the password; the id is the username
        let username = match self.string("username") {
            Ok(username) => username.to_string(),
            Err(e) => self.id().map(str::to_string).ok_or(e)?,
        };
        Ok(User {
            username,
            password: self.string("password")?.to_string(),
        })
    }
}

pub const REMINDER_UPDATE_MASK: [&str; 4] = ["date", "time", "title", "description"];
