//! Error types for the application.

use super::types::{StoredType, ValueKind};
use thiserror::Error;

/// Windows status codes reported for failures that have no OS call behind them.
pub mod status {
    pub const ERROR_FILE_NOT_FOUND: i32 = 2;
    pub const ERROR_ACCESS_DENIED: i32 = 5;
    pub const ERROR_INVALID_DATA: i32 = 13;
    pub const ERROR_INVALID_PARAMETER: i32 = 87;
    pub const ERROR_DATATYPE_MISMATCH: i32 = 1629;
}

/// Failure of a single registry read or write.
///
/// Every variant carries the native status code so callers can tell
/// "access denied" from "not found" without parsing messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Invalid registry root key in path {path:?}")]
    InvalidRootKey { path: String, code: i32 },

    #[error("Failed to open registry key {subkey:?} (status {code})")]
    OpenKeyFailed { subkey: String, code: i32 },

    #[error("Failed to query registry value {name:?} (status {code})")]
    QueryFailed { name: String, code: i32 },

    #[error("Failed to set registry value {name:?} (status {code})")]
    SetValueFailed { name: String, code: i32 },

    #[error("Registry value {name:?} is {found}, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: ValueKind,
        found: StoredType,
        code: i32,
    },

    /// For text, `expected` is the next even byte count above `actual`,
    /// since UTF-16 data always has an even length.
    #[error("Registry value {name:?} has {actual} bytes, expected {expected}")]
    UnexpectedSize {
        name: String,
        expected: usize,
        actual: usize,
        code: i32,
    },
}

impl RegistryError {
    /// Native status code behind this failure.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::InvalidRootKey { code, .. }
            | Self::OpenKeyFailed { code, .. }
            | Self::QueryFailed { code, .. }
            | Self::SetValueFailed { code, .. }
            | Self::TypeMismatch { code, .. }
            | Self::UnexpectedSize { code, .. } => *code,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("File system error: {0}")]
    FileSystem(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Known folder not found: {0}")]
    FolderNotFound(String),

    #[error("Process error: {0}")]
    Process(String),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn to_user_string(&self) -> String {
        self.to_string()
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::FileSystem(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
