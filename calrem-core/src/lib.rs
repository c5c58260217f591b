//! Core of calrem, a calendar reminder manager.
//!
//! - `reminder` / `user`: the two document types
//! - `grid` / `view`: month, week, day and year layout and navigation
//! - `store`: reminder and user storage (local JSON files or Cloud Firestore)
//! - `session`: login, registration and the persisted session

pub mod config;
pub mod error;
pub mod grid;
pub mod reminder;
pub mod session;
pub mod store;
pub mod user;
pub mod view;

pub use error::{CalRemError, CalRemResult};
pub use reminder::{Meridiem, Reminder, ReminderDraft, ReminderKey, ReminderTime};
pub use user::User;
