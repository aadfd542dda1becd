pub mod error;
pub mod settings;
pub mod types;

pub use error::*;
pub use settings::*;
pub use types::*;
