//! Error types for kan
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, unknown id, unknown lane, bad config)
//! - 4: Operation failed (I/O, lock contention, unreadable board file)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the kan CLI
pub mod exit_codes {
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for kan operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Unknown lane '{lane}' (lanes: {lanes})")]
    UnknownLane { lane: String, lanes: String },

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("Board file is not valid UTF-8: {0}")]
    InvalidData(PathBuf),

    #[error("No ids left under prefix {0}")]
    IdExhausted(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidConfig(_)
            | Error::InvalidArgument(_)
            | Error::ItemNotFound(_)
            | Error::UnknownLane { .. }
            | Error::UnknownCommand(_) => exit_codes::USER_ERROR,

            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::LockFailed(_)
            | Error::InvalidData(_)
            | Error::IdExhausted(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured fields for machine-readable error output
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::ItemNotFound(id) => Some(serde_json::json!({ "id": id })),
            Error::UnknownLane { lane, lanes } => {
                Some(serde_json::json!({ "lane": lane, "lanes": lanes }))
            }
            Error::UnknownCommand(name) => Some(serde_json::json!({ "command": name })),
            Error::InvalidConfig(message) | Error::InvalidArgument(message) => {
                Some(serde_json::json!({ "message": message }))
            }
            Error::LockFailed(path) | Error::InvalidData(path) => {
                Some(serde_json::json!({ "path": path.to_string_lossy() }))
            }
            _ => None,
        }
    }
}

/// Result type alias for kan operations
pub type Result<T> = std::result::Result<T, Error>;
