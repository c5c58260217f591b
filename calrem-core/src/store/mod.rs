//! Reminder and user storage.
//!
//! Backends only implement a handful of document primitives (insert, query,
//! update, delete). The reminder operations the application uses are built on
//! top of them as provided methods, so every backend filters and sorts the
//! same way.

mod file;
mod firestore;
mod memory;
mod query;

pub use file::FileStore;
pub use firestore::{FirestoreConfig, FirestoreStore};
pub use memory::MemoryStore;
pub use query::{DateFilter, ReminderQuery};

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::config::StoreConfig;
use crate::error::CalRemResult;
use crate::grid::{first_of_month, last_of_month};
use crate::reminder::{Reminder, ReminderDraft, ReminderKey, sort_reminders};
use crate::user::User;

#[async_trait]
pub trait ReminderStore: Send + Sync {
    /// Store a new reminder and return it with its assigned id.
    async fn insert(&self, reminder: &Reminder) -> CalRemResult<Reminder>;

    /// All reminders matching `query`, in no particular order.
    async fn find(&self, query: &ReminderQuery) -> CalRemResult<Vec<Reminder>>;

    /// Replace the editable fields of one reminder.
    async fn update(&self, id: &str, draft: &ReminderDraft) -> CalRemResult<()>;

    async fn delete(&self, id: &str) -> CalRemResult<()>;

    async fn add_reminder(&self, username: &str, draft: ReminderDraft) -> CalRemResult<Reminder> {
        let saved = self.insert(&Reminder::new(username, draft)).await?;
        tracing::debug!(id = ?saved.id, date = %saved.date, "reminder added");
        Ok(saved)
    }

    /// Reminders of one day, ordered by time.
    async fn reminders_for_date(
        &self,
        username: &str,
        date: NaiveDate,
    ) -> CalRemResult<Vec<Reminder>> {
        self.sorted(&ReminderQuery::for_user(username).on(date))
            .await
    }

    /// Reminders of a calendar month, ordered by date and time.
    async fn reminders_for_month(
        &self,
        username: &str,
        year: i32,
        month: u32,
    ) -> CalRemResult<Vec<Reminder>> {
        let from = first_of_month(year, month)?;
        let to = last_of_month(year, month)?;
        self.reminders_in_range(username, from, to).await
    }

    /// Reminders between two dates, both inclusive.
    async fn reminders_in_range(
        &self,
        username: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> CalRemResult<Vec<Reminder>> {
        self.sorted(&ReminderQuery::for_user(username).between(from, to))
            .await
    }

    /// Every reminder of the user, or only those on or after `from`.
    async fn upcoming_reminders(
        &self,
        username: &str,
        from: Option<NaiveDate>,
    ) -> CalRemResult<Vec<Reminder>> {
        let query = match from {
            Some(date) => ReminderQuery::for_user(username).since(date),
            None => ReminderQuery::for_user(username),
        };
        self.sorted(&query).await
    }

    async fn update_reminder(&self, id: &str, draft: &ReminderDraft) -> CalRemResult<()> {
        self.update(id, draft).await?;
        tracing::debug!(id, "reminder updated");
        Ok(())
    }

    async fn delete_reminder(&self, id: &str) -> CalRemResult<()> {
        self.delete(id).await?;
        tracing::debug!(id, "reminder deleted");
        Ok(())
    }

    /// Update every reminder matching `key`. Returns how many were touched.
    async fn update_by_key(&self, key: &ReminderKey, draft: &ReminderDraft) -> CalRemResult<usize> {
        let matches = self.find(&ReminderQuery::from_key(key)).await?;
        let mut updated = 0;
        for id in matches.iter().filter_map(|r| r.id.as_deref()) {
            self.update(id, draft).await?;
            updated += 1;
        }
        tracing::debug!(title = %key.title, updated, "reminders updated by key");
        Ok(updated)
    }

    /// Delete every reminder matching `key`. Returns how many were removed.
    async fn delete_by_key(&self, key: &ReminderKey) -> CalRemResult<usize> {
        let matches = self.find(&ReminderQuery::from_key(key)).await?;
        let mut deleted = 0;
        for id in matches.iter().filter_map(|r| r.id.as_deref()) {
            self.delete(id).await?;
            deleted += 1;
        }
        tracing::debug!(title = %key.title, deleted, "reminders deleted by key");
        Ok(deleted)
    }

    #[doc(hidden)]
    async fn sorted(&self, query: &ReminderQuery) -> CalRemResult<Vec<Reminder>> {
        let mut reminders = self.find(query).await?;
        sort_reminders(&mut reminders);
        Ok(reminders)
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, username: &str) -> CalRemResult<Option<User>>;

    /// Create or overwrite the user document keyed by username.
    async fn put_user(&self, user: &User) -> CalRemResult<()>;
}

/// A backend holding both collections.
pub trait Store: ReminderStore + UserStore {}

impl<T: ReminderStore + UserStore> Store for T {}

/// Open the backend selected in the configuration.
pub fn open_store(config: &StoreConfig) -> CalRemResult<Arc<dyn Store>> {
    match config {
        StoreConfig::File { data_dir } => {
            let dir = crate::config::expand_path(data_dir);
            tracing::debug!(path = %dir.display(), "opening file store");
            Ok(Arc::new(FileStore::open(dir)?))
        }
        StoreConfig::Firestore(firestore) => {
            tracing::debug!(project = %firestore.project_id, "opening firestore store");
            Ok(Arc::new(FirestoreStore::new(firestore.clone())?))
        }
    }
}
