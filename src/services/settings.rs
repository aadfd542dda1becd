//! Editor settings persisted as JSON under the user's AppData folder.

use crate::domain::{AppSettings, Result};
use crate::repositories::{file_system, json, KnownFolder};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR: &str = "win-utilities";
const SETTINGS_FILE: &str = "settings.json";

/// `%APPDATA%\win-utilities\settings.json`
pub fn settings_path() -> Result<PathBuf> {
    Ok(KnownFolder::AppData.path()?.join(APP_DIR).join(SETTINGS_FILE))
}

/// Load settings from `path`. A missing file yields defaults; a corrupt one
/// is an error.
pub fn load_from(path: &Path) -> Result<AppSettings> {
    if !file_system::exists(path) {
        debug!(path = %path.display(), "No settings file, using defaults");
        return Ok(AppSettings::default());
    }
    json::load_json(path)
}

pub fn save_to(settings: &AppSettings, path: &Path) -> Result<()> {
    debug!(path = %path.display(), "Saving settings");
    json::save_json(settings, path)
}

pub fn load() -> Result<AppSettings> {
    load_from(&settings_path()?)
}

pub fn save(settings: &AppSettings) -> Result<()> {
    save_to(settings, &settings_path()?)
}
