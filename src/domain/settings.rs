//! Persisted editor settings.

use super::types::ValueKind;
use serde::{Deserialize, Serialize};

/// Last inputs used by the registry editor, restored on startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub path: String,
    pub value_name: String,
    pub kind: ValueKind,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            path: r"HKEY_CURRENT_USER\Software".to_string(),
            value_name: String::new(),
            kind: ValueKind::Dword,
        }
    }
}
