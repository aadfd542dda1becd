//! Registry domain types - pure data structures with no OS dependencies.

use super::error::{status, RegistryError};
use crate::utils::to_wide;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator between the root alias and the subkey path.
pub const SEPARATOR: char = '\\';

// =============================================================================
// Root keys
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootKey {
    ClassesRoot,
    CurrentUser,
    LocalMachine,
    Users,
}

impl RootKey {
    pub const ALL: [RootKey; 4] = [
        Self::ClassesRoot,
        Self::CurrentUser,
        Self::LocalMachine,
        Self::Users,
    ];

    #[must_use]
    pub const fn alias(self) -> &'static str {
        match self {
            Self::ClassesRoot => "HKEY_CLASSES_ROOT",
            Self::CurrentUser => "HKEY_CURRENT_USER",
            Self::LocalMachine => "HKEY_LOCAL_MACHINE",
            Self::Users => "HKEY_USERS",
        }
    }
}

impl fmt::Display for RootKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alias())
    }
}

// =============================================================================
// Paths
// =============================================================================

/// A `<RootAlias>\<Subkey...>` path split into its root and subkey.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistryPath {
    pub root: RootKey,
    pub subkey: String,
}

impl RegistryPath {
    /// Split `path` into a root key and the subkey below it.
    ///
    /// The alias must be followed by a backslash. Anything else is rejected
    /// as a whole, there is no partial interpretation.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidRootKey`] if `path` does not start
    /// with a recognized alias and separator.
    pub fn parse(path: &str) -> Result<Self, RegistryError> {
        RootKey::ALL
            .iter()
            .find_map(|&root| {
                let subkey = path.strip_prefix(root.alias())?.strip_prefix(SEPARATOR)?;
                Some(Self {
                    root,
                    subkey: subkey.to_string(),
                })
            })
            .ok_or_else(|| RegistryError::InvalidRootKey {
                path: path.to_string(),
                code: status::ERROR_INVALID_PARAMETER,
            })
    }
}

impl FromStr for RegistryPath {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RegistryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.root, SEPARATOR, self.subkey)
    }
}

// =============================================================================
// Values
// =============================================================================

/// Value kinds the accessor can read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Dword,
    String,
}

impl ValueKind {
    pub const ALL: [ValueKind; 2] = [Self::Dword, Self::String];

    #[must_use]
    pub const fn stored_type(self) -> StoredType {
        match self {
            Self::Dword => StoredType::REG_DWORD,
            Self::String => StoredType::REG_SZ,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.stored_type(), f)
    }
}

/// Raw type tag as reported by the store, including kinds this crate
/// does not read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoredType(pub u32);

impl StoredType {
    pub const REG_NONE: Self = Self(0);
    pub const REG_SZ: Self = Self(1);
    pub const REG_EXPAND_SZ: Self = Self(2);
    pub const REG_BINARY: Self = Self(3);
    pub const REG_DWORD: Self = Self(4);
    pub const REG_MULTI_SZ: Self = Self(7);
    pub const REG_QWORD: Self = Self(11);

    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("REG_NONE"),
            1 => Some("REG_SZ"),
            2 => Some("REG_EXPAND_SZ"),
            3 => Some("REG_BINARY"),
            4 => Some("REG_DWORD"),
            7 => Some("REG_MULTI_SZ"),
            11 => Some("REG_QWORD"),
            _ => None,
        }
    }
}

impl fmt::Display for StoredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "type {}", self.0),
        }
    }
}

/// A typed registry value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryValue {
    Dword(u32),
    String(String),
}

impl RegistryValue {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Dword(_) => ValueKind::Dword,
            Self::String(_) => ValueKind::String,
        }
    }

    /// Bytes as handed to the store: 4 bytes little-endian for a DWORD,
    /// UTF-16LE followed by exactly one NUL code unit for text.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Dword(n) => n.to_le_bytes().to_vec(),
            Self::String(s) => to_wide(s).iter().flat_map(|u| u.to_le_bytes()).collect(),
        }
    }
}

impl fmt::Display for RegistryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dword(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<u32> for RegistryValue {
    fn from(n: u32) -> Self {
        Self::Dword(n)
    }
}

impl From<&str> for RegistryValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for RegistryValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

/// Stored type and data size of a value, known before its data is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueInfo {
    pub stored_type: StoredType,
    pub size: usize,
}

/// Value exactly as the store returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawValue {
    pub stored_type: StoredType,
    pub bytes: Vec<u8>,
}
