//! In-memory registry backend.
//!
//! Mirrors the Windows semantics the accessor depends on: key paths and
//! value names compare case-insensitively, creating a key creates its
//! ancestors, and lookups of missing keys or values fail with
//! `ERROR_FILE_NOT_FOUND`.
//!
//! Keys can be marked inaccessible or read-only to exercise the failure
//! paths; both then fail with `ERROR_ACCESS_DENIED`.

use super::registry::{KeyHandle, RegistryStore};
use crate::domain::{status, RawValue, RegistryValue, RootKey, StoredType, ValueInfo, SEPARATOR};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

type Values = HashMap<String, RawValue>;
type KeySet = HashSet<(RootKey, String)>;

#[derive(Debug, Default)]
pub struct MemoryRegistry {
    keys: Mutex<HashMap<(RootKey, String), Values>>,
    denied: Mutex<KeySet>,
    read_only: Mutex<KeySet>,
    open_handles: AtomicUsize,
}

/// Lowercase the path and drop empty segments, so `A\\b\` and `a\B` match.
fn normalize(subkey: &str) -> String {
    subkey
        .split(SEPARATOR)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("\\")
}

impl MemoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of key handles currently open.
    pub fn open_handles(&self) -> usize {
        self.open_handles.load(Ordering::SeqCst)
    }

    pub fn key_exists(&self, root: RootKey, subkey: &str) -> bool {
        self.lock().contains_key(&(root, normalize(subkey)))
    }

    /// Store raw bytes with an arbitrary type tag, creating the key if needed.
    pub fn insert_raw(
        &self,
        root: RootKey,
        subkey: &str,
        name: &str,
        stored_type: StoredType,
        bytes: Vec<u8>,
    ) {
        let mut keys = self.lock();
        let path = normalize(subkey);
        if self.is_denied(root, &path) {
            return Err(status::ERROR_ACCESS_DENIED);
        }
        Self::create_ancestors(&mut keys, root, &path);
        keys.entry((root, path)).or_default().insert(
            name.to_lowercase(),
            RawValue { stored_type, bytes },
        );
    }

    /// Make opening or creating `subkey` fail with `ERROR_ACCESS_DENIED`.
    pub fn deny_access(&self, root: RootKey, subkey: &str) {
        lock_set(&self.denied).insert((root, normalize(subkey)));
    }

    /// Let `subkey` be opened but make every set on it fail with
    /// `ERROR_ACCESS_DENIED`.
    pub fn deny_writes(&self, root: RootKey, subkey: &str) {
        lock_set(&self.read_only).insert((root, normalize(subkey)));
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<(RootKey, String), Values>> {
        // A poisoned map is still structurally valid.
        self.keys.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn is_denied(&self, root: RootKey, path: &str) -> bool {
        lock_set(&self.denied).contains(&(root, path.to_string()))
    }

    fn create_ancestors(keys: &mut HashMap<(RootKey, String), Values>, root: RootKey, path: &str) {
        let mut prefix = String::new();
        keys.entry((root, String::new())).or_default();
        for segment in path.split(SEPARATOR).filter(|s| !s.is_empty()) {
            if !prefix.is_empty() {
                prefix.push(SEPARATOR);
            }
            prefix.push_str(segment);
            keys.entry((root, prefix.clone())).or_default();
        }
    }

    fn handle(&self, root: RootKey, path: String) -> Box<dyn KeyHandle + '_> {
        self.open_handles.fetch_add(1, Ordering::SeqCst);
        Box::new(MemoryKey {
            registry: self,
            root,
            path,
        })
    }
}

fn lock_set(set: &Mutex<KeySet>) -> MutexGuard<'_, KeySet> {
    set.lock().unwrap_or_else(|e| e.into_inner())
}

impl RegistryStore for MemoryRegistry {
    fn open_key(&self, root: RootKey, subkey: &str) -> Result<Box<dyn KeyHandle + '_>, i32> {
        let path = normalize(subkey);
        if self.is_denied(root, &path) {
            return Err(status::ERROR_ACCESS_DENIED);
        }
        if !path.is_empty() && !self.lock().contains_key(&(root, path.clone())) {
            return Err(status::ERROR_FILE_NOT_FOUND);
        }
        Ok(self.handle(root, path))
    }

    fn create_key(&self, root: RootKey, subkey: &str) -> Result<Box<dyn KeyHandle + '_>, i32> {
        let path = normalize(subkey);
        Self::create_ancestors(&mut self.lock(), root, &path);
        Ok(self.handle(root, path))
    }
}

struct MemoryKey<'a> {
    registry: &'a MemoryRegistry,
    root: RootKey,
    path: String,
}

impl KeyHandle for MemoryKey<'_> {
    fn info(&self, name: &str) -> Result<ValueInfo, i32> {
        self.registry
            .lock()
            .get(&(self.root, self.path.clone()))
            .and_then(|values| values.get(&name.to_lowercase()))
            .map(|raw| ValueInfo {
                stored_type: raw.stored_type,
                size: raw.bytes.len(),
            })
            .ok_or(status::ERROR_FILE_NOT_FOUND)
    }

    fn query(&self, name: &str) -> Result<RawValue, i32> {
        self.registry
            .lock()
            .get(&(self.root, self.path.clone()))
            .and_then(|values| values.get(&name.to_lowercase()))
            .cloned()
            .ok_or(status::ERROR_FILE_NOT_FOUND)
    }

    fn set(&self, name: &str, value: &RegistryValue) -> Result<(), i32> {
        if lock_set(&self.registry.read_only).contains(&(self.root, self.path.clone())) {
            return Err(status::ERROR_ACCESS_DENIED);
        }
        let raw = RawValue {
            stored_type: value.kind().stored_type(),
            bytes: value.to_bytes(),
        };
        self.registry
            .lock()
            .entry((self.root, self.path.clone()))
            .or_default()
            .insert(name.to_lowercase(), raw);
        Ok(())
    }
}

impl Drop for MemoryKey<'_> {
    fn drop(&mut self) {
        self.registry.open_handles.fetch_sub(1, Ordering::SeqCst);
    }
}
