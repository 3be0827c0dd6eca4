//! Role template defaults and console limits

// Template permission sets (admin is derived from the catalog)
pub const MANAGER_PERMISSIONS: &[&str] = &[
    "users.view",
    "users.create",
    "users.edit",
    "roles.view",
    "settings.view",
];

pub const USER_PERMISSIONS: &[&str] = &["profile.view", "profile.edit"];

pub const GUEST_PERMISSIONS: &[&str] = &["profile.view"];

// API keys
pub const API_KEY_PREFIX: &str = "ak_";
pub const API_KEY_BYTES: usize = 16;
pub const DEFAULT_RATE_LIMIT: u32 = 1000;
pub const MIN_RATE_LIMIT: u32 = 1;
pub const MAX_RATE_LIMIT: u32 = 10_000;

// Masked key display: first N chars ... last M chars
pub const MASK_HEAD: usize = 8;
pub const MASK_TAIL: usize = 4;

pub const UNKNOWN_USER: &str = "Unknown User";

// Audit trail author when no user is acting
pub const SYSTEM_ACTOR: &str = "system";
pub const SYSTEM_ACTOR_NAME: &str = "System";

// Most active users listed in system stats
pub const TOP_ACTIVE_USERS: usize = 5;
