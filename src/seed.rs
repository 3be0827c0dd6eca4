//! Seed data the console starts from, embedded at build time

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{AccessRequest, ApiKey, AuditEntry, Role, Team, User, UserActivity, UserSession};
use crate::notify::{Notification, NotificationPreferences};

const BUILTIN_JSON: &str = include_str!("../data/seed.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    pub users: Vec<User>,
    pub roles: Vec<Role>,
    pub teams: Vec<Team>,
    pub api_keys: Vec<ApiKey>,
    pub access_requests: Vec<AccessRequest>,
    pub notifications: Vec<Notification>,
    pub preferences: NotificationPreferences,
    #[serde(default)]
    pub activities: Vec<UserActivity>,
    #[serde(default)]
    pub sessions: Vec<UserSession>,
    #[serde(default)]
    pub audit_log: Vec<AuditEntry>,
}

impl SeedData {
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
