pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;

// Public, stable-ish API surface for consumers (UI / other crates)

pub use crate::domain::{
    AppError, AppSettings, RegistryError, RegistryPath, RegistryValue, Result, RootKey,
    StoredType, ValueKind,
};

pub use crate::repositories::{MemoryRegistry, RegistryStore};

#[cfg(windows)]
pub use crate::repositories::SystemRegistry;

pub use crate::services::{logger, Registry};

pub mod prelude {
    pub use crate::domain::{
        AppError, RegistryError, RegistryPath, RegistryValue, Result, RootKey, ValueKind,
    };
    pub use crate::repositories::{file_system, json, process, KnownFolder, RegistryStore};
    pub use crate::services::{logger, Registry};
}
