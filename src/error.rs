//! Error types for accessdeck

use thiserror::Error;

/// The main error type for accessdeck operations
#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("group {0} is defined more than once")]
    DuplicateGroup(String),

    #[error("permission {id} appears in both {first} and {second}")]
    DuplicatePermission {
        id: String,
        first: String,
        second: String,
    },

    #[error("group {0} has no permissions")]
    EmptyGroup(String),

    #[error("catalog already initialized from {0}")]
    AlreadyInitialized(String),

    #[error("unknown role template: {0}")]
    UnknownTemplate(String),

    #[error("unknown permission group: {0}")]
    UnknownGroup(String),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("access request {0} has already been reviewed")]
    AlreadyReviewed(String),

    #[error("a comment is required to reject a request")]
    MissingComment,

    #[error("name must not be empty")]
    EmptyName,

    #[error("rate limit {0} is outside 1..=10000")]
    InvalidRateLimit(u32),

    #[error("expiry of {0} days is out of range")]
    InvalidExpiry(u32),

    #[error("entropy source failed: {0}")]
    Random(String),
}

impl Error {
    pub(crate) fn not_found(kind: &'static str, id: &str) -> Self {
        Error::NotFound { kind, id: id.to_string() }
    }
}

/// Result type alias for accessdeck operations
pub type Result<T> = std::result::Result<T, Error>;
