//! Console records

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{MASK_HEAD, MASK_TAIL};
use crate::selection::PermissionSet;
use crate::template::RoleTemplate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
    Suspended,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: RoleTemplate,
    pub status: UserStatus,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    pub joined: NaiveDate,
    #[serde(default)]
    pub last_active: Option<NaiveDate>,
    #[serde(default)]
    pub mfa_enabled: bool,
    #[serde(default)]
    pub team_ids: Vec<String>,
}

impl User {
    /// Uppercase initials of each name part
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Fields supplied when adding a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: RoleTemplate,
    pub status: UserStatus,
    pub department: Option<String>,
}

/// Partial update; `None` leaves a field unchanged.
///
/// A blank `department` clears it.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<RoleTemplate>,
    pub status: Option<UserStatus>,
    pub department: Option<String>,
    pub mfa_enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    pub name: RoleTemplate,
    pub description: String,
    pub permissions: PermissionSet,
    pub users_count: u32,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub description: String,
    pub members: Vec<String>,
    pub roles: Vec<RoleTemplate>,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct NewTeam {
    pub name: String,
    pub description: String,
    pub members: Vec<String>,
    pub roles: Vec<RoleTemplate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub id: String,
    pub name: String,
    pub key: String,
    pub user_id: String,
    pub scopes: PermissionSet,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_used: Option<DateTime<Utc>>,
    pub is_active: bool,
    #[serde(default)]
    pub rate_limit: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl ApiKey {
    /// Display form of the secret: head, `...`, tail
    pub fn masked(&self) -> String {
        mask_key(&self.key)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Mask a key for display; keys too short to mask are returned whole
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() < MASK_HEAD + MASK_TAIL {
        return key.to_string();
    }
    let head: String = chars[..MASK_HEAD].iter().collect();
    let tail: String = chars[chars.len() - MASK_TAIL..].iter().collect();
    format!("{head}...{tail}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyExpiry {
    Never,
    Days(u32),
}

#[derive(Debug, Clone)]
pub struct NewApiKey {
    pub name: String,
    pub user_id: String,
    pub scopes: PermissionSet,
    pub expires_in: KeyExpiry,
    pub rate_limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequest {
    pub id: String,
    pub user_id: String,
    pub requested_permissions: PermissionSet,
    pub requested_roles: Vec<RoleTemplate>,
    pub reason: String,
    pub status: RequestStatus,
    pub requested_by: String,
    #[serde(default)]
    pub reviewed_by: Option<String>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Status filter of the access request list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestFilter {
    #[default]
    All,
    Only(RequestStatus),
}

impl RequestFilter {
    pub fn matches(self, status: RequestStatus) -> bool {
        match self {
            RequestFilter::All => true,
            RequestFilter::Only(s) => s == status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditEntity {
    User,
    Role,
    Permission,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Assign,
    Revoke,
}

/// One row of the audit trail; values hold only the fields that changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: String,
    pub entity_type: AuditEntity,
    pub entity_id: String,
    pub action: AuditAction,
    #[serde(default)]
    pub old_values: Option<serde_json::Value>,
    #[serde(default)]
    pub new_values: Option<serde_json::Value>,
    pub performed_by: String,
    pub performed_by_name: String,
    pub timestamp: DateTime<Utc>,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Login,
    Logout,
    ProfileUpdate,
    RoleChange,
    StatusChange,
    PasswordChange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActivity {
    pub id: String,
    pub user_id: String,
    pub action: ActivityAction,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub performed_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub id: String,
    pub user_id: String,
    pub login_time: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub is_active: bool,
    #[serde(default)]
    pub ip_address: Option<String>,
}

impl UserSession {
    pub fn minutes(&self) -> i64 {
        (self.last_activity - self.login_time).num_minutes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_long_keys() {
        assert_eq!(mask_key("ak_prod_1234567890abcdef"), "ak_prod_...cdef");
        assert_eq!(mask_key("short"), "short");
    }
}
