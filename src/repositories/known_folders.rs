//! Special folder lookup, resolved from the environment Windows publishes.

use crate::domain::{AppError, Result};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownFolder {
    AppData,
    LocalAppData,
    ProgramData,
    ProgramFiles,
    Temp,
    UserProfile,
    Windows,
}

impl KnownFolder {
    /// Environment variables consulted, in order.
    #[must_use]
    pub const fn variables(self) -> &'static [&'static str] {
        match self {
            Self::AppData => &["APPDATA"],
            Self::LocalAppData => &["LOCALAPPDATA"],
            Self::ProgramData => &["ProgramData"],
            Self::ProgramFiles => &["ProgramFiles"],
            Self::Temp => &["TEMP", "TMP"],
            Self::UserProfile => &["USERPROFILE"],
            Self::Windows => &["SystemRoot", "windir"],
        }
    }

    pub fn path(self) -> Result<PathBuf> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    fn resolve_with(self, lookup: impl Fn(&str) -> Option<String>) -> Result<PathBuf> {
        self.variables()
            .iter()
            .find_map(|name| lookup(name).filter(|v| !v.is_empty()))
            .map(PathBuf::from)
            .ok_or_else(|| {
                AppError::FolderNotFound(format!("{:?} ({})", self, self.variables().join("/")))
            })
    }
}
