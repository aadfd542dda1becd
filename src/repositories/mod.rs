pub mod file_system;
pub mod json;
pub mod known_folders;
pub mod memory;
pub mod process;
pub mod registry;

pub use known_folders::KnownFolder;
pub use memory::MemoryRegistry;
pub use registry::{KeyHandle, RegistryStore};

#[cfg(windows)]
pub use registry::SystemRegistry;
