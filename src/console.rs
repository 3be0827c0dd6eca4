//! In-memory console state built from seed data.
//!
//! Nothing here is persisted. Each successful mutation emits an `info` event;
//! user and role mutations also land in the in-memory audit trail. Roles,
//! teams, API keys, access requests and activity live in their own modules as
//! further `impl Console` blocks.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};

use crate::activity::Changes;
use crate::catalog::{self, Catalog};
use crate::constants::SYSTEM_ACTOR;
use crate::error::{Error, Result};
use crate::models::{
    AccessRequest, ActivityAction, ApiKey, AuditAction, AuditEntity, AuditEntry, NewUser, Role, Team,
    User, UserActivity, UserSession, UserStatus, UserUpdate,
};
use crate::notify::{NotificationCenter, NotificationPreferences};
use crate::seed::SeedData;
use crate::template::RoleTemplate;

#[derive(Debug, Clone)]
pub struct Console<'c> {
    pub(crate) catalog: &'c Catalog,
    pub(crate) users: Vec<User>,
    pub(crate) roles: Vec<Role>,
    pub(crate) teams: Vec<Team>,
    pub(crate) api_keys: Vec<ApiKey>,
    pub(crate) access_requests: Vec<AccessRequest>,
    pub(crate) activities: Vec<UserActivity>,
    pub(crate) sessions: Vec<UserSession>,
    pub(crate) audit_log: Vec<AuditEntry>,
    pub(crate) actor: String,
    pub notifications: NotificationCenter,
    pub preferences: NotificationPreferences,
}

/// User counts shown on the dashboard header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub pending: usize,
    pub suspended: usize,
    pub by_role: BTreeMap<RoleTemplate, usize>,
}

impl Console<'static> {
    /// Process-wide catalog plus the embedded seed
    pub fn seeded() -> Result<Self> {
        Ok(Console::new(catalog::catalog()?, SeedData::builtin()?))
    }
}

impl<'c> Console<'c> {
    pub fn new(catalog: &'c Catalog, seed: SeedData) -> Self {
        Console {
            catalog,
            users: seed.users,
            roles: seed.roles,
            teams: seed.teams,
            api_keys: seed.api_keys,
            access_requests: seed.access_requests,
            activities: seed.activities,
            sessions: seed.sessions,
            audit_log: seed.audit_log,
            actor: SYSTEM_ACTOR.to_string(),
            notifications: NotificationCenter::new(seed.notifications),
            preferences: seed.preferences,
        }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    // Users

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, id: &str) -> Result<&User> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| Error::not_found("user", id))
    }

    pub fn add_user(&mut self, new: NewUser) -> Result<&User> {
        if new.name.trim().is_empty() {
            return Err(Error::EmptyName);
        }
        let user = User {
            id: new_id(),
            name: new.name,
            email: new.email,
            role: new.role,
            status: new.status,
            avatar: None,
            department: non_blank(new.department),
            joined: today(),
            last_active: None,
            mfa_enabled: false,
            team_ids: Vec::new(),
        };
        tracing::info!(id = %user.id, role = %user.role, "user added");
        let changes = Changes::default()
            .new_value("name", &user.name)
            .new_value("email", &user.email)
            .new_value("role", user.role)
            .new_value("status", user.status);
        let id = user.id.clone();
        self.users.push(user);
        self.record(AuditEntity::User, &id, AuditAction::Create, changes, "New user created".into());
        Ok(&self.users[self.users.len() - 1])
    }

    /// Apply a partial update; changed fields are written to the audit trail
    pub fn update_user(&mut self, id: &str, update: UserUpdate) -> Result<&User> {
        let idx = self
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| Error::not_found("user", id))?;
        let user = &mut self.users[idx];
        let mut changes = Changes::default();
        if let Some(name) = update.name {
            changes.set("name", &mut user.name, name);
        }
        if let Some(email) = update.email {
            changes.set("email", &mut user.email, email);
        }
        if let Some(role) = update.role {
            changes.set("role", &mut user.role, role);
        }
        if let Some(status) = update.status {
            changes.set("status", &mut user.status, status);
        }
        if let Some(department) = update.department {
            changes.set("department", &mut user.department, non_blank(Some(department)));
        }
        if let Some(mfa) = update.mfa_enabled {
            changes.set("mfaEnabled", &mut user.mfa_enabled, mfa);
        }
        tracing::info!(id, fields = ?changes.fields(), "user updated");

        if !changes.is_empty() {
            let kind = if changes.touched("role") {
                ActivityAction::RoleChange
            } else if changes.touched("status") {
                ActivityAction::StatusChange
            } else {
                ActivityAction::ProfileUpdate
            };
            let description = format!("Updated {}", changes.fields().join(", "));
            self.log_activity(id, kind, description.clone());
            self.record(AuditEntity::User, id, AuditAction::Update, changes, description);
        }
        Ok(&self.users[idx])
    }

    /// Remove a user and drop them from every team
    pub fn delete_user(&mut self, id: &str) -> Result<User> {
        let idx = self
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| Error::not_found("user", id))?;
        let user = self.users.remove(idx);
        for team in &mut self.teams {
            team.members.retain(|m| m != id);
        }
        tracing::info!(id, "user deleted");
        let changes = Changes::default()
            .old_value("name", &user.name)
            .old_value("email", &user.email);
        self.record(AuditEntity::User, id, AuditAction::Delete, changes, "User deleted".into());
        Ok(user)
    }

    /// Case-insensitive match on name or email
    pub fn search_users(&self, term: &str) -> Vec<&User> {
        self.users
            .iter()
            .filter(|u| matches_term(&u.name, term) || matches_term(&u.email, term))
            .collect()
    }

    pub fn users_with_status(&self, status: UserStatus) -> Vec<&User> {
        self.users.iter().filter(|u| u.status == status).collect()
    }

    pub fn stats(&self) -> UserStats {
        let mut stats = UserStats { total: self.users.len(), ..Default::default() };
        for u in &self.users {
            match u.status {
                UserStatus::Active => stats.active += 1,
                UserStatus::Inactive => stats.inactive += 1,
                UserStatus::Pending => stats.pending += 1,
                UserStatus::Suspended => stats.suspended += 1,
            }
            *stats.by_role.entry(u.role).or_insert(0) += 1;
        }
        stats
    }

    /// Display name for a user id, tolerating dangling references
    pub fn user_name(&self, id: &str) -> &str {
        self.users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.name.as_str())
            .unwrap_or(crate::constants::UNKNOWN_USER)
    }
}

/// Blank strings count as absent
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Case-insensitive substring match; an empty term matches everything
pub(crate) fn matches_term(haystack: &str, term: &str) -> bool {
    term.is_empty() || haystack.to_lowercase().contains(&term.to_lowercase())
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}
