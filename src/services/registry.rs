//! Registry accessor - typed, fail-fast reads and writes of single values.
//!
//! Every call is one open → operate → close sequence. Key handles never
//! outlive the call that opened them; they are closed on drop, on every
//! exit path. Writing several values is not atomic.
//!
//! Reads check the stored type and size before fetching any data, so a
//! large value of the wrong type is rejected without being copied.

use crate::domain::{
    status, RawValue, RegistryError, RegistryPath, RegistryValue, ValueInfo, ValueKind,
};
use crate::repositories::RegistryStore;
use tracing::{debug, warn};

const DWORD_SIZE: usize = std::mem::size_of::<u32>();

/// Typed access to values in a [`RegistryStore`].
#[derive(Debug, Default, Clone)]
pub struct Registry<S> {
    store: S,
}

impl<S: RegistryStore> Registry<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Read `name` under `path`, requiring its stored type to be `kind`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidRootKey`] if `path` has no recognized root
    /// - [`RegistryError::OpenKeyFailed`] if the key is missing or access is denied
    /// - [`RegistryError::QueryFailed`] if the value does not exist
    /// - [`RegistryError::TypeMismatch`] if the value is stored as another type
    /// - [`RegistryError::UnexpectedSize`] if a DWORD is not 4 bytes or text has an odd length
    pub fn read_value(
        &self,
        path: &str,
        name: &str,
        kind: ValueKind,
    ) -> Result<RegistryValue, RegistryError> {
        match kind {
            ValueKind::Dword => self
                .read_with(path, name, kind, decode_dword)
                .map(RegistryValue::Dword),
            ValueKind::String => self
                .read_with(path, name, kind, decode_string)
                .map(RegistryValue::String),
        }
    }

    pub fn read_dword(&self, path: &str, name: &str) -> Result<u32, RegistryError> {
        self.read_with(path, name, ValueKind::Dword, decode_dword)
    }

    pub fn read_string(&self, path: &str, name: &str) -> Result<String, RegistryError> {
        self.read_with(path, name, ValueKind::String, decode_string)
    }

    fn read_with<T>(
        &self,
        path: &str,
        name: &str,
        kind: ValueKind,
        decode: fn(&str, &RawValue) -> Result<T, RegistryError>,
    ) -> Result<T, RegistryError> {
        self.query(path, name, kind)
            .and_then(|raw| decode(name, &raw))
            .inspect_err(|e| warn!(path, name, "{}", e))
    }

    /// Open the key, check the value's type and size, then fetch its data.
    /// The key is closed before returning.
    fn query(&self, path: &str, name: &str, kind: ValueKind) -> Result<RawValue, RegistryError> {
        let path = RegistryPath::parse(path)?;
        debug!(%path, name, %kind, "Reading registry value");

        let key = self
            .store
            .open_key(path.root, &path.subkey)
            .map_err(|code| RegistryError::OpenKeyFailed {
                subkey: path.to_string(),
                code,
            })?;

        let query_failed = |code: i32| RegistryError::QueryFailed {
            name: name.to_string(),
            code,
        };

        let info = key.info(name).map_err(query_failed)?;
        check_info(name, kind, info)?;

        // The value can change between the two calls; the decoders check again.
        key.query(name).map_err(query_failed)
    }

    /// Write `value` as `name` under `path`, creating missing keys first.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidRootKey`] if `path` has no recognized root
    /// - [`RegistryError::OpenKeyFailed`] if the key cannot be opened or created
    /// - [`RegistryError::SetValueFailed`] if the store rejects the value
    pub fn write_value(
        &self,
        path: &str,
        name: &str,
        value: &RegistryValue,
    ) -> Result<(), RegistryError> {
        let path = RegistryPath::parse(path)?;
        debug!(%path, name, kind = %value.kind(), "Writing registry value");

        let key = self
            .store
            .create_key(path.root, &path.subkey)
            .map_err(|code| {
                warn!(%path, code, "Failed to open or create registry key");
                RegistryError::OpenKeyFailed {
                    subkey: path.to_string(),
                    code,
                }
            })?;

        key.set(name, value).map_err(|code| {
            warn!(%path, name, code, "Failed to set registry value");
            RegistryError::SetValueFailed {
                name: name.to_string(),
                code,
            }
        })
    }

    pub fn write_dword(&self, path: &str, name: &str, value: u32) -> Result<(), RegistryError> {
        self.write_value(path, name, &RegistryValue::Dword(value))
    }

    pub fn write_string(&self, path: &str, name: &str, value: &str) -> Result<(), RegistryError> {
        self.write_value(path, name, &RegistryValue::String(value.to_string()))
    }
}

fn size_error(name: &str, expected: usize, actual: usize) -> RegistryError {
    RegistryError::UnexpectedSize {
        name: name.to_string(),
        expected,
        actual,
        code: status::ERROR_INVALID_DATA,
    }
}

/// Type and size checks that need only the value's metadata.
fn check_info(name: &str, kind: ValueKind, info: ValueInfo) -> Result<(), RegistryError> {
    if info.stored_type != kind.stored_type() {
        return Err(RegistryError::TypeMismatch {
            name: name.to_string(),
            expected: kind,
            found: info.stored_type,
            code: status::ERROR_DATATYPE_MISMATCH,
        });
    }
    match kind {
        ValueKind::Dword if info.size != DWORD_SIZE => {
            Err(size_error(name, DWORD_SIZE, info.size))
        }
        ValueKind::String if info.size % 2 != 0 => Err(size_error(name, info.size + 1, info.size)),
        _ => Ok(()),
    }
}

/// A DWORD must be exactly 4 little-endian bytes.
fn decode_dword(name: &str, raw: &RawValue) -> Result<u32, RegistryError> {
    let bytes: [u8; DWORD_SIZE] = raw
        .bytes
        .as_slice()
        .try_into()
        .map_err(|_| size_error(name, DWORD_SIZE, raw.bytes.len()))?;
    Ok(u32::from_le_bytes(bytes))
}

/// UTF-16LE text with at most one trailing NUL removed.
fn decode_string(name: &str, raw: &RawValue) -> Result<String, RegistryError> {
    let len = raw.bytes.len();
    if len % 2 != 0 {
        return Err(size_error(name, len + 1, len));
    }
    let mut units: Vec<u16> = raw
        .bytes
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();
    if units.last() == Some(&0) {
        units.pop();
    }
    Ok(String::from_utf16_lossy(&units))
}

#[cfg(windows)]
mod system {
    use super::Registry;
    use crate::domain::{RegistryError, RegistryValue, ValueKind};
    use crate::repositories::SystemRegistry;

    impl Registry<SystemRegistry> {
        /// Accessor bound to the live Windows registry.
        #[must_use]
        pub const fn system() -> Self {
            Self::new(SystemRegistry)
        }
    }

    /// Read a value from the live Windows registry.
    pub fn read_value(
        path: &str,
        name: &str,
        kind: ValueKind,
    ) -> Result<RegistryValue, RegistryError> {
        Registry::system().read_value(path, name, kind)
    }

    /// Write a value to the live Windows registry.
    pub fn write_value(path: &str, name: &str, value: &RegistryValue) -> Result<(), RegistryError> {
        Registry::system().write_value(path, name, value)
    }
}

#[cfg(windows)]
pub use system::{read_value, write_value};
