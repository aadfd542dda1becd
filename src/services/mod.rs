pub mod logger;
pub mod registry;
pub mod settings;

pub use registry::Registry;
