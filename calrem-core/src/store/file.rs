//! Local JSON document collections.
//!
//! Each collection is a single JSON array in the data directory
//! (`reminders.json`, `users.json`). Every write rewrites the whole file.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{ReminderQuery, ReminderStore, UserStore};
use crate::error::{CalRemError, CalRemResult};
use crate::reminder::{Reminder, ReminderDraft};
use crate::user::User;

const REMINDERS_FILE: &str = "reminders.json";
const USERS_FILE: &str = "users.json";

pub struct FileStore {
    dir: PathBuf,
    // serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>) -> CalRemResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(FileStore {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_collection<T: DeserializeOwned>(&self, name: &str) -> CalRemResult<Vec<T>> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            CalRemError::Serialization(format!("{}: {}", path.display(), e))
        })
    }

    fn write_collection<T: Serialize>(&self, name: &str, items: &[T]) -> CalRemResult<()> {
        let path = self.dir.join(name);
        let content = serde_json::to_string_pretty(items)
            .map_err(|e| CalRemError::Serialization(e.to_string()))?;

        // write beside the target, then rename over it
        let tmp = self.dir.join(format!(".{}.tmp", name));
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn modify_reminders<R>(
        &self,
        f: impl FnOnce(&mut Vec<Reminder>) -> CalRemResult<R>,
    ) -> CalRemResult<R> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| CalRemError::Store("file store lock poisoned".into()))?;
        let mut reminders = self.read_collection(REMINDERS_FILE)?;
        let result = f(&mut reminders)?;
        self.write_collection(REMINDERS_FILE, &reminders)?;
        Ok(result)
    }
}

#[async_trait]
impl ReminderStore for FileStore {
    async fn insert(&self, reminder: &Reminder) -> CalRemResult<Reminder> {
        let mut saved = reminder.clone();
        saved.id = Some(uuid::Uuid::new_v4().to_string());
        self.modify_reminders(|reminders| {
            reminders.push(saved.clone());
            Ok(())
        })?;
        Ok(saved)
    }

    async fn find(&self, query: &ReminderQuery) -> CalRemResult<Vec<Reminder>> {
        let reminders: Vec<Reminder> = self.read_collection(REMINDERS_FILE)?;
        Ok(reminders.into_iter().filter(|r| query.matches(r)).collect())
    }

    async fn update(&self, id: &str, draft: &ReminderDraft) -> CalRemResult<()> {
        self.modify_reminders(|reminders| {
            let reminder = reminders
                .iter_mut()
                .find(|r| r.id.as_deref() == Some(id))
                .ok_or_else(|| CalRemError::ReminderNotFound(id.to_string()))?;
            reminder.apply(draft);
            Ok(())
        })
    }

    async fn delete(&self, id: &str) -> CalRemResult<()> {
        self.modify_reminders(|reminders| {
            let before = reminders.len();
            reminders.retain(|r| r.id.as_deref() != Some(id));
            if reminders.len() == before {
                return Err(CalRemError::ReminderNotFound(id.to_string()));
            }
            Ok(())
        })
    }
}

#[async_trait]
impl UserStore for FileStore {
    async fn get_user(&self, username: &str) -> CalRemResult<Option<User>> {
        let users: Vec<User> = self.read_collection(USERS_FILE)?;
        Ok(users.into_iter().find(|u| u.username == username))
    }

    async fn put_user(&self, user: &User) -> CalRemResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| CalRemError::Store("file store lock poisoned".into()))?;
        let mut users: Vec<User> = self.read_collection(USERS_FILE)?;
        match users.iter_mut().find(|u| u.username == user.username) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        self.write_collection(USERS_FILE, &users)
    }
}
