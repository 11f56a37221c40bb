//! JSON key-value persistence under the user data directory.
//!
//! Loads fail open: a missing or unreadable file yields the type's default
//! so the app always starts. Saves report errors to the caller.

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::{fs, path::PathBuf};

/// `<platform data dir>/focusglow`, created on first use. Falls back to the
/// working directory when the platform reports no data dir.
pub fn data_path(filename: &str) -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("focusglow");
    let _ = fs::create_dir_all(&path);
    path.push(filename);
    path
}

pub fn load_json<T: DeserializeOwned + Default>(path: &PathBuf) -> T {
    let Ok(raw) = fs::read_to_string(path) else {
        return T::default();
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("focusglow: ignoring unreadable {}: {e}", path.display());
            T::default()
        }
    }
}

pub fn save_json<T: Serialize>(path: &PathBuf, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.default_focus_duration = 50;
        settings.theme = "nord".into();
        save_json(&path, &settings).unwrap();

        let loaded: Settings = load_json(&path);
        assert_eq!(loaded.default_focus_duration, 50);
        assert_eq!(loaded.theme, "nord");
    }

    #[test]
    fn missing_or_corrupt_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let loaded: Settings = load_json(&missing);
        assert_eq!(loaded.default_focus_duration, 25);

        let corrupt = dir.path().join("bad.json");
        fs::write(&corrupt, "]]]").unwrap();
        let loaded: Settings = load_json(&corrupt);
        assert_eq!(loaded.default_focus_duration, 25);
    }
}
