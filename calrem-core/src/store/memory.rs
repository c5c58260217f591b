//! In-process store, mostly for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ReminderQuery, ReminderStore, UserStore};
use crate::error::{CalRemError, CalRemResult};
use crate::reminder::{Reminder, ReminderDraft};
use crate::user::User;

#[derive(Default)]
pub struct MemoryStore {
    reminders: Mutex<Vec<Reminder>>,
    users: Mutex<HashMap<String, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> CalRemError {
    CalRemError::Store("memory store lock poisoned".into())
}

#[async_trait]
impl ReminderStore for MemoryStore {
    async fn insert(&self, reminder: &Reminder) -> CalRemResult<Reminder> {
        let mut saved = reminder.clone();
        saved.id = Some(uuid::Uuid::new_v4().to_string());
        self.reminders.lock().map_err(poisoned)?.push(saved.clone());
        Ok(saved)
    }

    async fn find(&self, query: &ReminderQuery) -> CalRemResult<Vec<Reminder>> {
        let reminders = self.reminders.lock().map_err(poisoned)?;
        Ok(reminders
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .collect())
    }

    async fn update(&self, id: &str, draft: &ReminderDraft) -> CalRemResult<()> {
        let mut reminders = self.reminders.lock().map_err(poisoned)?;
        let reminder = reminders
            .iter_mut()
            .find(|r| r.id.as_deref() == Some(id))
            .ok_or_else(|| CalRemError::ReminderNotFound(id.to_string()))?;
        reminder.apply(draft);
        Ok(())
    }

    async fn delete(&self, id: &str) -> CalRemResult<()> {
        let mut reminders = self.reminders.lock().map_err(poisoned)?;
        let before = reminders.len();
        reminders.retain(|r| r.id.as_deref() != Some(id));
        if reminders.len() == before {
            return Err(CalRemError::ReminderNotFound(id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get_user(&self, username: &str) -> CalRemResult<Option<User>> {
        Ok(self.users.lock().map_err(poisoned)?.get(username).cloned())
    }

    async fn put_user(&self, user: &User) -> CalRemResult<()> {
        self.users
            .lock()
            .map_err(poisoned)?
            .insert(user.username.clone(), user.clone());
        Ok(())
    }
}
