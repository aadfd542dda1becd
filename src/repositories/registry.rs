//! Registry store seam - open/query/set over a concrete backend.
//!
//! Status codes are returned raw; turning them into [`RegistryError`]s is
//! the accessor's job.
//!
//! [`RegistryError`]: crate::domain::RegistryError

use crate::domain::{RawValue, RegistryValue, RootKey, ValueInfo};

/// An open key. Dropping the handle closes the key.
pub trait KeyHandle {
    /// Stored type and data size of a value, without reading its data.
    fn info(&self, name: &str) -> Result<ValueInfo, i32>;

    /// Read a value's stored type and bytes.
    fn query(&self, name: &str) -> Result<RawValue, i32>;

    /// Store `value` under `name`, replacing any previous value.
    fn set(&self, name: &str, value: &RegistryValue) -> Result<(), i32>;
}

/// A hierarchical registry backend.
pub trait RegistryStore {
    /// Open an existing key for query access.
    fn open_key(&self, root: RootKey, subkey: &str) -> Result<Box<dyn KeyHandle + '_>, i32>;

    /// Open a key for set access, creating it and any missing ancestors.
    fn create_key(&self, root: RootKey, subkey: &str) -> Result<Box<dyn KeyHandle + '_>, i32>;
}

#[cfg(windows)]
pub use system::SystemRegistry;

#[cfg(windows)]
mod system {
    use super::{KeyHandle, RegistryStore};
    use crate::domain::{status, RawValue, RegistryValue, RootKey, StoredType, ValueInfo};
    use crate::utils::to_wide;
    use winreg::{enums::*, RegKey, HKEY};

    /// The live Windows registry, accessed through `winreg`.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct SystemRegistry;

    fn hive(root: RootKey) -> HKEY {
        match root {
            RootKey::ClassesRoot => HKEY_CLASSES_ROOT,
            RootKey::CurrentUser => HKEY_CURRENT_USER,
            RootKey::LocalMachine => HKEY_LOCAL_MACHINE,
            RootKey::Users => HKEY_USERS,
        }
    }

    fn os_status(e: &std::io::Error) -> i32 {
        e.raw_os_error().unwrap_or(status::ERROR_INVALID_PARAMETER)
    }

    struct SystemKey(RegKey);

    impl KeyHandle for SystemKey {
        fn info(&self, name: &str) -> Result<ValueInfo, i32> {
            use windows::core::PCWSTR;
            use windows::Win32::System::Registry::{RegQueryValueExW, REG_VALUE_TYPE};

            let name_wide = to_wide(name);
            let mut data_type = REG_VALUE_TYPE::default();
            let mut data_size = 0u32;

            // No data buffer: only the type and the size are filled in.
            let result = unsafe {
                RegQueryValueExW(
                    windows::Win32::System::Registry::HKEY(
                        self.0.raw_handle() as *mut core::ffi::c_void
                    ),
                    PCWSTR(name_wide.as_ptr()),
                    None,
                    Some(&raw mut data_type),
                    None,
                    Some(&raw mut data_size),
                )
            };

            if result.is_err() {
                return Err(result.0 as i32);
            }
            Ok(ValueInfo {
                stored_type: StoredType(data_type.0),
                size: data_size as usize,
            })
        }

        fn query(&self, name: &str) -> Result<RawValue, i32> {
            let raw = self.0.get_raw_value(name).map_err(|e| os_status(&e))?;
            let stored_type = StoredType(raw.vtype as u32);
            Ok(RawValue {
                stored_type,
                bytes: raw.bytes.to_vec(),
            })
        }

        fn set(&self, name: &str, value: &RegistryValue) -> Result<(), i32> {
            // winreg writes DWORDs as 4 LE bytes and strings as UTF-16 with
            // one NUL, passing the byte count explicitly.
            match value {
                RegistryValue::Dword(n) => self.0.set_value(name, n),
                RegistryValue::String(s) => self.0.set_value(name, s),
            }
            .map_err(|e| os_status(&e))
        }
    }

    impl RegistryStore for SystemRegistry {
        fn open_key(&self, root: RootKey, subkey: &str) -> Result<Box<dyn KeyHandle + '_>, i32> {
            let key = RegKey::predef(hive(root))
                .open_subkey_with_flags(subkey, KEY_QUERY_VALUE)
                .map_err(|e| os_status(&e))?;
            Ok(Box::new(SystemKey(key)))
        }

        fn create_key(&self, root: RootKey, subkey: &str) -> Result<Box<dyn KeyHandle + '_>, i32> {
            let (key, _) = RegKey::predef(hive(root))
                .create_subkey_with_flags(subkey, KEY_SET_VALUE)
                .map_err(|e| os_status(&e))?;
            Ok(Box::new(SystemKey(key)))
        }
    }
}
