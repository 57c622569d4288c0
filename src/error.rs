//! Error types for td
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, missing project, unknown task)
//! - 4: Operation failed (corrupt record, I/O, lock contention)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for td CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for td operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("No .td/ directory found from {0} or any parent")]
    NotInitialized(PathBuf),

    #[error("Already initialized: {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Task ID '{0}' already exists")]
    AlreadyExists(String),

    #[error("Invalid {field}: '{value}'")]
    Invalid { field: String, value: String },

    #[error("Ambiguous task id '{id}': {}", .candidates.join(", "))]
    AmbiguousId { id: String, candidates: Vec<String> },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Aborted")]
    Aborted,

    // Operation failures (exit code 4)
    #[error("Corrupt task record '{id}': {reason}")]
    Corrupt { id: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),
}

impl Error {
    pub fn invalid(field: impl Into<String>, value: impl Into<String>) -> Self {
        Error::Invalid {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn corrupt(id: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Error::Corrupt {
            id: id.into(),
            reason: reason.to_string(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::NotInitialized(_)
            | Error::AlreadyInitialized(_)
            | Error::NotFound(_)
            | Error::AlreadyExists(_)
            | Error::Invalid { .. }
            | Error::AmbiguousId { .. }
            | Error::InvalidConfig(_)
            | Error::Aborted => exit_codes::USER_ERROR,

            Error::Corrupt { .. }
            | Error::Io(_)
            | Error::Yaml(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::LockFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured details for the JSON error envelope
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::NotFound(id) | Error::AlreadyExists(id) => {
                Some(serde_json::json!({ "id": id }))
            }
            Error::Invalid { field, value } => {
                Some(serde_json::json!({ "field": field, "value": value }))
            }
            Error::AmbiguousId { id, candidates } => {
                Some(serde_json::json!({ "id": id, "candidates": candidates }))
            }
            Error::Corrupt { id, reason } => {
                Some(serde_json::json!({ "id": id, "reason": reason }))
            }
            Error::NotInitialized(path) | Error::AlreadyInitialized(path) => {
                Some(serde_json::json!({ "path": path }))
            }
            _ => None,
        }
    }
}

/// Result type alias for td operations
pub type Result<T> = std::result::Result<T, Error>;
