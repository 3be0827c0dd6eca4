//! accessdeck - in-memory access console
//!
//! The core is the permission selection engine: role templates resolve to
//! default permission sets ([`resolve_template`]) and permission groups
//! project a tri-state checkbox from the flat selected set
//! ([`derive_group_state`], [`toggle_group`], [`toggle_permission`]).
//! [`Console`] wraps the engine with the users, roles, teams, API keys,
//! access requests, notifications and audit trail of the admin dashboard, all
//! held in memory and seeded from embedded data.

pub mod catalog;
pub mod constants;
pub mod editor;
pub mod error;
pub mod models;
pub mod notify;
pub mod seed;
pub mod selection;
pub mod template;

mod access;
mod activity;
mod api_keys;
mod console;
mod roles;
mod teams;

pub use activity::SystemStats;
pub use api_keys::generate_key;
pub use catalog::{catalog, init, Catalog, Permission, PermissionGroup};
pub use console::{Console, UserStats};
pub use editor::PermissionEditor;
pub use error::{Error, Result};
pub use models::{
    mask_key, AccessRequest, ActivityAction, ApiKey, AuditAction, AuditEntity, AuditEntry, KeyExpiry,
    NewApiKey, NewTeam, NewUser, RequestFilter, RequestStatus, Role, Team, User, UserActivity,
    UserSession, UserStatus, UserUpdate,
};
pub use notify::{
    CategoryFlags, NewNotification, Notification, NotificationCategory, NotificationCenter,
    NotificationKind, NotificationPreferences, PreferenceToggle,
};
pub use seed::SeedData;
pub use selection::{
    derive_group_state, group_states, next_group_toggle, toggle_group, toggle_permission,
    GroupCheckState, PermissionSet,
};
pub use template::{resolve_template, RoleTemplate};
