//! Audit trail, user activity and sessions.
//!
//! User and role mutations and approved access requests append an
//! [`AuditEntry`] authored by the console's current actor. Entries are never
//! edited or removed.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::console::{new_id, Console};
use crate::constants::{SYSTEM_ACTOR, SYSTEM_ACTOR_NAME, TOP_ACTIVE_USERS};
use crate::error::Result;
use crate::models::{ActivityAction, AuditAction, AuditEntity, AuditEntry, UserActivity, UserSession};

/// Login and session figures for the activity dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemStats {
    pub total_users: usize,
    pub active_users: usize,
    pub total_logins: usize,
    pub active_sessions: usize,
    pub average_session_minutes: i64,
    /// (user id, activity count), busiest first
    pub most_active_users: Vec<(String, usize)>,
}

/// Before and after values of the fields one mutation touched
#[derive(Debug, Clone, Default)]
pub(crate) struct Changes {
    old: Map<String, Value>,
    new: Map<String, Value>,
}

impl Changes {
    /// Assign `next` to `slot`, tracking the field if the value differs
    pub(crate) fn set<T: Serialize + PartialEq>(&mut self, field: &str, slot: &mut T, next: T) {
        if *slot == next {
            return;
        }
        self.old.insert(field.to_string(), to_json(&*slot));
        self.new.insert(field.to_string(), to_json(&next));
        *slot = next;
    }

    pub(crate) fn old_value(mut self, field: &str, value: impl Serialize) -> Self {
        self.old.insert(field.to_string(), to_json(value));
        self
    }

    pub(crate) fn new_value(mut self, field: &str, value: impl Serialize) -> Self {
        self.new.insert(field.to_string(), to_json(value));
        self
    }

    pub(crate) fn touched(&self, field: &str) -> bool {
        self.new.contains_key(field)
    }

    pub(crate) fn fields(&self) -> Vec<&str> {
        self.new.keys().map(String::as_str).collect()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.old.is_empty() && self.new.is_empty()
    }
}

fn to_json(value: impl Serialize) -> Value {
    serde_json::to_value(value).unwrap_or_default()
}

fn non_empty(map: Map<String, Value>) -> Option<Value> {
    (!map.is_empty()).then_some(Value::Object(map))
}

impl Console<'_> {
    /// User id recorded as the author of audit entries
    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn act_as(&mut self, user_id: &str) -> Result<()> {
        self.user(user_id)?;
        self.actor = user_id.to_string();
        Ok(())
    }

    /// Audit entries newest first; `None` matches every entity or action
    pub fn audit_log(&self, entity: Option<AuditEntity>, action: Option<AuditAction>) -> Vec<&AuditEntry> {
        let mut entries: Vec<&AuditEntry> = self
            .audit_log
            .iter()
            .rev()
            .filter(|e| entity.map_or(true, |x| x == e.entity_type))
            .filter(|e| action.map_or(true, |x| x == e.action))
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }

    /// Activity of one user, newest first
    pub fn user_activity(&self, user_id: &str) -> Vec<&UserActivity> {
        let mut items: Vec<&UserActivity> =
            self.activities.iter().rev().filter(|a| a.user_id == user_id).collect();
        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        items
    }

    pub fn active_sessions(&self) -> Vec<&UserSession> {
        self.sessions.iter().filter(|s| s.is_active).collect()
    }

    pub fn system_stats(&self) -> SystemStats {
        let stats = self.stats();
        let total_logins = self
            .activities
            .iter()
            .filter(|a| a.action == ActivityAction::Login)
            .count();
        let average_session_minutes = match self.sessions.len() {
            0 => 0,
            n => self.sessions.iter().map(UserSession::minutes).sum::<i64>() / n as i64,
        };

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for a in &self.activities {
            *counts.entry(a.user_id.as_str()).or_insert(0) += 1;
        }
        let mut most_active: Vec<(String, usize)> =
            counts.into_iter().map(|(id, n)| (id.to_string(), n)).collect();
        // stable: ties stay in user id order
        most_active.sort_by(|a, b| b.1.cmp(&a.1));
        most_active.truncate(TOP_ACTIVE_USERS);

        SystemStats {
            total_users: stats.total,
            active_users: stats.active,
            total_logins,
            active_sessions: self.active_sessions().len(),
            average_session_minutes,
            most_active_users: most_active,
        }
    }

    pub(crate) fn record(
        &mut self,
        entity_type: AuditEntity,
        entity_id: &str,
        action: AuditAction,
        changes: Changes,
        description: String,
    ) {
        let actor = self.actor.clone();
        self.record_by(&actor, entity_type, entity_id, action, changes, description);
    }

    pub(crate) fn record_by(
        &mut self,
        actor: &str,
        entity_type: AuditEntity,
        entity_id: &str,
        action: AuditAction,
        changes: Changes,
        description: String,
    ) {
        let performed_by_name = match actor {
            SYSTEM_ACTOR => SYSTEM_ACTOR_NAME,
            id => self.user_name(id),
        }
        .to_string();
        let entry = AuditEntry {
            id: new_id(),
            entity_type,
            entity_id: entity_id.to_string(),
            action,
            old_values: non_empty(changes.old),
            new_values: non_empty(changes.new),
            performed_by: actor.to_string(),
            performed_by_name,
            timestamp: Utc::now(),
            description,
        };
        tracing::debug!(id = %entry.id, ?entity_type, entity_id, ?action, "audit entry recorded");
        self.audit_log.push(entry);
    }

    pub(crate) fn log_activity(&mut self, user_id: &str, action: ActivityAction, details: String) {
        self.activities.push(UserActivity {
            id: new_id(),
            user_id: user_id.to_string(),
            action,
            details: Some(details),
            ip_address: None,
            timestamp: Utc::now(),
            performed_by: Some(self.actor.clone()),
        });
    }
}
