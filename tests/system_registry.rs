//! Round trips against the live HKEY_CURRENT_USER hive.
#![cfg(windows)]

use win_utilities::services::registry;
use win_utilities::*;

struct ScratchKey(String);

impl ScratchKey {
    fn new(test: &str) -> Self {
        Self(format!(
            r"Software\win-utilities-tests\{}-{}",
            test,
            std::process::id()
        ))
    }

    fn path(&self) -> String {
        format!(r"HKEY_CURRENT_USER\{}", self.0)
    }
}

impl Drop for ScratchKey {
    fn drop(&mut self) {
        let _ = winreg::RegKey::predef(winreg::enums::HKEY_CURRENT_USER).delete_subkey_all(&self.0);
    }
}

#[test]
fn test_dword_round_trip() {
    let key = ScratchKey::new("dword");
    registry::write_value(&key.path(), "Count", &RegistryValue::Dword(42)).unwrap();

    assert_eq!(
        registry::read_value(&key.path(), "Count", ValueKind::Dword).unwrap(),
        RegistryValue::Dword(42)
    );
}

#[test]
fn test_string_round_trip() {
    let key = ScratchKey::new("string");
    let reg = Registry::system();
    reg.write_string(&key.path(), "Greeting", "hello").unwrap();
    reg.write_string(&key.path(), "Empty", "").unwrap();

    assert_eq!(reg.read_string(&key.path(), "Greeting").unwrap(), "hello");
    assert_eq!(reg.read_string(&key.path(), "Empty").unwrap(), "");
}

#[test]
fn test_type_mismatch_and_missing_value() {
    let key = ScratchKey::new("errors");
    let reg = Registry::system();
    reg.write_string(&key.path(), "Greeting", "hello").unwrap();

    assert!(matches!(
        reg.read_dword(&key.path(), "Greeting"),
        Err(RegistryError::TypeMismatch { .. })
    ));
    assert!(matches!(
        reg.read_dword(&key.path(), "Missing"),
        Err(RegistryError::QueryFailed { code: 2, .. })
    ));
}

#[test]
fn test_missing_key_fails_to_open() {
    let key = ScratchKey::new("missing");
    assert!(matches!(
        Registry::system().read_dword(&key.path(), "Count"),
        Err(RegistryError::OpenKeyFailed { code: 2, .. })
    ));
}
