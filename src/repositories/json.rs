//! JSON documents on disk.

use super::file_system;
use crate::domain::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::error;

/// Serialize `value` as pretty JSON indented by four spaces.
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut ser)?;
    file_system::write_file(path, &out)
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = file_system::read_file(path).inspect_err(|e| {
        error!(path = %path.display(), "Failed loading json: {}", e);
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}
