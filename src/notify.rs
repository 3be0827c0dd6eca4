//! Notifications and per-user notification preferences

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    User,
    Role,
    System,
    Security,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub category: NotificationCategory,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub action_url: Option<String>,
    #[serde(default)]
    pub action_text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub category: NotificationCategory,
    pub action: Option<(String, String)>,
}

/// Newest-first notification list
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    items: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new(mut items: Vec<Notification>) -> Self {
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        NotificationCenter { items }
    }

    pub fn list(&self) -> &[Notification] {
        &self.items
    }

    pub fn unread(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter().filter(|n| !n.is_read)
    }

    pub fn unread_count(&self) -> usize {
        self.unread().count()
    }

    pub fn mark_read(&mut self, id: &str) -> Result<()> {
        let n = self
            .items
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| Error::not_found("notification", id))?;
        n.is_read = true;
        Ok(())
    }

    /// Returns how many were unread
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for n in self.items.iter_mut().filter(|n| !n.is_read) {
            n.is_read = true;
            changed += 1;
        }
        changed
    }

    pub fn push(&mut self, new: NewNotification) -> &Notification {
        let (action_url, action_text) = new.action.unzip();
        let n = Notification {
            id: uuid::Uuid::new_v4().to_string(),
            title: new.title,
            message: new.message,
            kind: new.kind,
            category: new.category,
            is_read: false,
            created_at: Utc::now(),
            action_url,
            action_text,
        };
        tracing::info!(id = %n.id, category = ?n.category, "notification added");
        self.items.insert(0, n);
        &self.items[0]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFlags {
    pub user: bool,
    pub role: bool,
    pub system: bool,
    pub security: bool,
}

impl CategoryFlags {
    fn slot(&mut self, category: NotificationCategory) -> &mut bool {
        match category {
            NotificationCategory::User => &mut self.user,
            NotificationCategory::Role => &mut self.role,
            NotificationCategory::System => &mut self.system,
            NotificationCategory::Security => &mut self.security,
        }
    }

    pub fn get(&self, category: NotificationCategory) -> bool {
        match category {
            NotificationCategory::User => self.user,
            NotificationCategory::Role => self.role,
            NotificationCategory::System => self.system,
            NotificationCategory::Security => self.security,
        }
    }
}

/// One switch on the preferences form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceToggle {
    Email(bool),
    Push(bool),
    Category(NotificationCategory, bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub user_id: String,
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub categories: CategoryFlags,
}

impl NotificationPreferences {
    /// Set exactly the field named by the toggle
    pub fn apply(&mut self, toggle: PreferenceToggle) {
        match toggle {
            PreferenceToggle::Email(on) => self.email_notifications = on,
            PreferenceToggle::Push(on) => self.push_notifications = on,
            PreferenceToggle::Category(c, on) => *self.categories.slot(c) = on,
        }
    }

    pub fn allows(&self, category: NotificationCategory) -> bool {
        self.categories.get(category)
    }
}
