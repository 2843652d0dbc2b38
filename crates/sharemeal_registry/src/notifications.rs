// --- File: crates/sharemeal_registry/src/notifications.rs ---
//! Per-user notification feed.
//!
//! Entries are appended newest first and never removed. The `time` label of
//! each entry is computed when the feed is read, not when it is written.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::NotificationItem;

pub const GREETING: &str = "Welcome to ShareMeal! Start donating or finding food.";

#[derive(Debug, Clone)]
struct Entry {
    id: u64,
    text: String,
    at: DateTime<Utc>,
    read: bool,
}

#[derive(Debug, Clone)]
pub struct NotificationLog {
    entries: Vec<Entry>,
    next_id: u64,
}

impl NotificationLog {
    /// A fresh log holding only the (already read) greeting.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            entries: vec![Entry {
                id: 1,
                text: GREETING.to_string(),
                at: now,
                read: true,
            }],
            next_id: 2,
        }
    }

    /// Appends an unread entry and returns its id.
    pub fn push(&mut self, text: impl Into<String>, now: DateTime<Utc>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let text = text.into();
        debug!("Notification {}: {}", id, text);
        self.entries.insert(
            0,
            Entry {
                id,
                text,
                at: now,
                read: false,
            },
        );
        id
    }

    /// The feed, newest first, with labels relative to `now`.
    pub fn items(&self, now: DateTime<Utc>) -> Vec<NotificationItem> {
        self.entries
            .iter()
            .map(|e| NotificationItem {
                id: e.id,
                text: e.text.clone(),
                time: relative_time_label(e.at, now),
                read: e.read,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.read).count()
    }

    /// Marks everything read and returns how many entries changed.
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for entry in self.entries.iter_mut().filter(|e| !e.read) {
            entry.read = true;
            changed += 1;
        }
        changed
    }
}

/// "Just now" under a minute, then whole minutes, hours and days.
/// Instants in the future read as "Just now".
pub fn relative_time_label(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    let hours = elapsed.num_hours();
    if hours < 1 {
        return plural(minutes, "minute");
    }
    let days = elapsed.num_days();
    if days < 1 {
        return plural(hours, "hour");
    }
    plural(days, "day")
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}
