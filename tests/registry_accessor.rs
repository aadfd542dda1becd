//! Read/write behavior of the registry accessor over the in-memory store.

use std::sync::atomic::{AtomicUsize, Ordering};
use win_utilities::domain::{status, RawValue, ValueInfo};
use win_utilities::repositories::KeyHandle;
use win_utilities::*;

const DEMO: &str = r"HKEY_CURRENT_USER\Software\Acme\Demo";

fn registry() -> Registry<MemoryRegistry> {
    Registry::new(MemoryRegistry::new())
}

#[test]
fn test_dword_round_trip() {
    let reg = registry();
    reg.write_value(DEMO, "Count", &RegistryValue::Dword(42)).unwrap();

    assert_eq!(
        reg.read_value(DEMO, "Count", ValueKind::Dword).unwrap(),
        RegistryValue::Dword(42)
    );
    assert_eq!(reg.read_dword(DEMO, "Count").unwrap(), 42);
}

#[test]
fn test_string_round_trip_has_no_terminator() {
    let reg = registry();
    reg.write_string(DEMO, "Greeting", "hello").unwrap();

    let value = reg.read_string(DEMO, "Greeting").unwrap();
    assert_eq!(value, "hello");
    assert!(!value.contains('\0'));
}

#[test]
fn test_empty_string_and_default_value_name() {
    let reg = registry();
    reg.write_string(DEMO, "", "").unwrap();

    assert_eq!(
        reg.read_value(DEMO, "", ValueKind::String).unwrap(),
        RegistryValue::String(String::new())
    );
}

#[test]
fn test_extreme_dwords_round_trip() {
    let reg = registry();
    for n in [0, 1, u32::MAX, 0x8000_0000] {
        reg.write_dword(DEMO, "Edge", n).unwrap();
        assert_eq!(reg.read_dword(DEMO, "Edge").unwrap(), n);
    }
}

#[test]
fn test_overwrite_changes_type() {
    let reg = registry();
    reg.write_dword(DEMO, "Mode", 1).unwrap();
    reg.write_string(DEMO, "Mode", "fast").unwrap();

    assert_eq!(reg.read_string(DEMO, "Mode").unwrap(), "fast");
    assert!(matches!(
        reg.read_dword(DEMO, "Mode"),
        Err(RegistryError::TypeMismatch { .. })
    ));
}

#[test]
fn test_type_mismatch_reports_both_types() {
    let reg = registry();
    reg.write_string(DEMO, "Greeting", "hello").unwrap();

    let err = reg.read_value(DEMO, "Greeting", ValueKind::Dword).unwrap_err();
    assert_eq!(
        err,
        RegistryError::TypeMismatch {
            name: "Greeting".into(),
            expected: ValueKind::Dword,
            found: StoredType::REG_SZ,
            code: status::ERROR_DATATYPE_MISMATCH,
        }
    );
}

#[test]
fn test_unsupported_stored_type_is_mismatch() {
    let reg = registry();
    reg.store().insert_raw(
        RootKey::CurrentUser,
        r"Software\Acme\Demo",
        "Blob",
        StoredType::REG_BINARY,
        vec![1, 2, 3, 4],
    );

    let err = reg.read_dword(DEMO, "Blob").unwrap_err();
    assert!(matches!(
        err,
        RegistryError::TypeMismatch {
            found: StoredType::REG_BINARY,
            ..
        }
    ));
}

#[test]
fn test_short_dword_is_unexpected_size() {
    let reg = registry();
    reg.store().insert_raw(
        RootKey::CurrentUser,
        r"Software\Acme\Demo",
        "Short",
        StoredType::REG_DWORD,
        vec![1, 2],
    );

    let err = reg.read_dword(DEMO, "Short").unwrap_err();
    assert!(matches!(
        err,
        RegistryError::UnexpectedSize {
            expected: 4,
            actual: 2,
            ..
        }
    ));
    assert_eq!(err.code(), status::ERROR_INVALID_DATA);
}

#[test]
fn test_missing_key_is_open_failure() {
    let reg = registry();
    let err = reg
        .read_value(r"HKEY_LOCAL_MACHINE\Software\Nope", "Count", ValueKind::Dword)
        .unwrap_err();

    assert!(matches!(err, RegistryError::OpenKeyFailed { .. }));
    assert_eq!(err.code(), status::ERROR_FILE_NOT_FOUND);
}

#[test]
fn test_missing_value_is_query_failure() {
    let reg = registry();
    reg.write_dword(DEMO, "Count", 1).unwrap();

    let err = reg.read_dword(DEMO, "Missing").unwrap_err();
    assert_eq!(
        err,
        RegistryError::QueryFailed {
            name: "Missing".into(),
            code: status::ERROR_FILE_NOT_FOUND,
        }
    );
}

#[test]
fn test_write_creates_missing_hierarchy() {
    let reg = registry();
    assert!(!reg.store().key_exists(RootKey::CurrentUser, r"Software\Acme"));

    reg.write_dword(r"HKEY_CURRENT_USER\Software\Acme\Deep\Er\Key", "X", 5)
        .unwrap();

    assert!(reg.store().key_exists(RootKey::CurrentUser, r"Software\Acme"));
    assert!(reg
        .store()
        .key_exists(RootKey::CurrentUser, r"Software\Acme\Deep\Er\Key"));
}

#[test]
fn test_invalid_root_rejected_for_read_and_write() {
    let reg = registry();

    let err = reg.write_dword(r"HKCU\Software\Acme", "X", 1).unwrap_err();
    assert!(matches!(err, RegistryError::InvalidRootKey { .. }));
    assert_eq!(err.code(), status::ERROR_INVALID_PARAMETER);

    let err = reg
        .read_value(r"HKEY_CURRENT_CONFIG\Software", "X", ValueKind::Dword)
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidRootKey { .. }));
    assert_eq!(reg.store().open_handles(), 0);
}

#[test]
fn test_keys_and_names_are_case_insensitive() {
    let reg = registry();
    reg.write_dword(DEMO, "Count", 9).unwrap();

    assert_eq!(
        reg.read_dword(r"HKEY_CURRENT_USER\SOFTWARE\acme\DEMO", "count")
            .unwrap(),
        9
    );
}

#[test]
fn test_roots_are_separate() {
    let reg = registry();
    reg.write_dword(DEMO, "Count", 1).unwrap();

    let err = reg
        .read_dword(r"HKEY_USERS\Software\Acme\Demo", "Count")
        .unwrap_err();
    assert!(matches!(err, RegistryError::OpenKeyFailed { .. }));
}

#[test]
fn test_no_handle_leaks_on_any_path() {
    let reg = registry();
    reg.write_dword(DEMO, "Count", 1).unwrap();
    reg.write_string(DEMO, "Greeting", "hi").unwrap();
    reg.store().insert_raw(
        RootKey::CurrentUser,
        r"Software\Acme\Demo",
        "Short",
        StoredType::REG_DWORD,
        vec![0],
    );

    let _ = reg.read_dword(DEMO, "Count");
    let _ = reg.read_dword(DEMO, "Greeting");
    let _ = reg.read_dword(DEMO, "Short");
    let _ = reg.read_dword(DEMO, "Missing");
    let _ = reg.read_dword(r"HKEY_USERS\Nope", "Count");

    assert_eq!(reg.store().open_handles(), 0);
}

/// Store that counts how many times value data is fetched.
#[derive(Default)]
struct CountingStore {
    inner: MemoryRegistry,
    fetches: AtomicUsize,
}

struct CountingKey<'a> {
    inner: Box<dyn KeyHandle + 'a>,
    fetches: &'a AtomicUsize,
}

impl KeyHandle for CountingKey<'_> {
    fn info(&self, name: &str) -> std::result::Result<ValueInfo, i32> {
        self.inner.info(name)
    }

    fn query(&self, name: &str) -> std::result::Result<RawValue, i32> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.query(name)
    }

    fn set(&self, name: &str, value: &RegistryValue) -> std::result::Result<(), i32> {
        self.inner.set(name, value)
    }
}

impl RegistryStore for CountingStore {
    fn open_key(
        &self,
        root: RootKey,
        subkey: &str,
    ) -> std::result::Result<Box<dyn KeyHandle + '_>, i32> {
        let inner = self.inner.open_key(root, subkey)?;
        Ok(Box::new(CountingKey {
            inner,
            fetches: &self.fetches,
        }))
    }

    fn create_key(
        &self,
        root: RootKey,
        subkey: &str,
    ) -> std::result::Result<Box<dyn KeyHandle + '_>, i32> {
        let inner = self.inner.create_key(root, subkey)?;
        Ok(Box::new(CountingKey {
            inner,
            fetches: &self.fetches,
        }))
    }
}

#[test]
fn test_wrong_type_rejected_before_data_is_fetched() {
    let reg = Registry::new(CountingStore::default());
    reg.store().inner.insert_raw(
        RootKey::CurrentUser,
        r"Software\Acme\Demo",
        "Blob",
        StoredType::REG_BINARY,
        vec![0; 8 << 20],
    );

    let err = reg.read_dword(DEMO, "Blob").unwrap_err();
    assert!(matches!(
        err,
        RegistryError::TypeMismatch {
            found: StoredType::REG_BINARY,
            ..
        }
    ));
    assert_eq!(reg.store().fetches.load(Ordering::SeqCst), 0);
    assert_eq!(reg.store().inner.open_handles(), 0);
}

#[test]
fn test_wrong_size_rejected_before_data_is_fetched() {
    let reg = Registry::new(CountingStore::default());
    reg.store().inner.insert_raw(
        RootKey::CurrentUser,
        r"Software\Acme\Demo",
        "Wide",
        StoredType::REG_DWORD,
        vec![0; 8],
    );
    reg.store().inner.insert_raw(
        RootKey::CurrentUser,
        r"Software\Acme\Demo",
        "Odd",
        StoredType::REG_SZ,
        vec![b'a', 0, 0],
    );

    let err = reg.read_dword(DEMO, "Wide").unwrap_err();
    assert!(matches!(
        err,
        RegistryError::UnexpectedSize {
            expected: 4,
            actual: 8,
            ..
        }
    ));
    let err = reg.read_string(DEMO, "Odd").unwrap_err();
    assert!(matches!(
        err,
        RegistryError::UnexpectedSize {
            expected: 4,
            actual: 3,
            ..
        }
    ));
    assert_eq!(reg.store().fetches.load(Ordering::SeqCst), 0);
}

#[test]
fn test_matching_value_is_fetched_once() {
    let reg = Registry::new(CountingStore::default());
    reg.write_dword(DEMO, "Count", 3).unwrap();

    assert_eq!(reg.read_dword(DEMO, "Count").unwrap(), 3);
    assert_eq!(reg.store().fetches.load(Ordering::SeqCst), 1);
}

#[test]
fn test_denied_key_is_write_open_failure() {
    let reg = registry();
    reg.store()
        .deny_access(RootKey::CurrentUser, r"Software\Acme\Demo");

    let err = reg.write_dword(DEMO, "Count", 1).unwrap_err();
    assert_eq!(
        err,
        RegistryError::OpenKeyFailed {
            subkey: DEMO.into(),
            code: status::ERROR_ACCESS_DENIED,
        }
    );
    assert_eq!(reg.store().open_handles(), 0);
}

#[test]
fn test_rejected_set_is_set_value_failure() {
    let reg = registry();
    reg.store()
        .deny_writes(RootKey::CurrentUser, r"Software\Acme\Demo");

    let err = reg.write_string(DEMO, "Greeting", "hi").unwrap_err();
    assert_eq!(
        err,
        RegistryError::SetValueFailed {
            name: "Greeting".into(),
            code: status::ERROR_ACCESS_DENIED,
        }
    );
    assert_eq!(err.code(), 5);
    assert_eq!(reg.store().open_handles(), 0);

    // The key itself was created before the set failed.
    assert!(reg
        .store()
        .key_exists(RootKey::CurrentUser, r"Software\Acme\Demo"));
}
