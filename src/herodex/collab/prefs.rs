//! Key-value preference storage.
//!
//! Only the view mode is stored today. Values are plain strings; callers parse
//! them and fall back to defaults on anything unexpected.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use parking_lot::Mutex;
use tracing::debug;

use crate::error::{HerodexError, Result};

pub const PREFERENCES_FILE: &str = "preferences.json";

pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Preferences that last as long as the process.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept in a single JSON object on disk.
///
/// A missing or unreadable file reads as empty. Writes replace the whole file
/// atomically.
#[derive(Debug, Clone)]
pub struct JsonFilePreferences {
    path: PathBuf,
}

impl JsonFilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `preferences.json` in the platform data directory for herodex.
    pub fn in_data_dir() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "herodex").ok_or_else(|| {
            HerodexError::Preferences("could not determine a data directory".to_string())
        })?;
        Ok(Self::new(dirs.data_dir().join(PREFERENCES_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let content = serde_json::to_string_pretty(values)?;
        let tmp_path = dir.join(format!(".{}.tmp", PREFERENCES_FILE));
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        match self.read_all() {
            Ok(mut values) => values.remove(key),
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "preferences unreadable");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        // A corrupt file is replaced rather than blocking every later write.
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_preferences() {
        let prefs = MemoryPreferences::new();
        assert_eq!(prefs.get("hero_view_mode"), None);
        prefs.set("hero_view_mode", "list").unwrap();
        assert_eq!(prefs.get("hero_view_mode").as_deref(), Some("list"));
    }

    #[test]
    fn test_json_file_missing_reads_empty() {
        let dir = tempdir().unwrap();
        let prefs = JsonFilePreferences::new(dir.path().join(PREFERENCES_FILE));
        assert_eq!(prefs.get("hero_view_mode"), None);
    }

    #[test]
    fn test_json_file_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(PREFERENCES_FILE);

        JsonFilePreferences::new(&path)
            .set("hero_view_mode", "list")
            .unwrap();
        JsonFilePreferences::new(&path).set("other", "x").unwrap();

        let reopened = JsonFilePreferences::new(&path);
        assert_eq!(reopened.get("hero_view_mode").as_deref(), Some("list"));
        assert_eq!(reopened.get("other").as_deref(), Some("x"));
        assert!(!dir
            .path()
            .join("nested")
            .join(format!(".{}.tmp", PREFERENCES_FILE))
            .exists());
    }

    #[test]
    fn test_json_file_corrupt_is_replaced_on_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE);
        fs::write(&path, "{not json").unwrap();

        let prefs = JsonFilePreferences::new(&path);
        assert_eq!(prefs.get("hero_view_mode"), None);
        prefs.set("hero_view_mode", "grid").unwrap();
        assert_eq!(prefs.get("hero_view_mode").as_deref(), Some("grid"));
    }

    #[test]
    fn test_json_file_write_into_a_file_path_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let prefs = JsonFilePreferences::new(blocker.join(PREFERENCES_FILE));
        assert!(matches!(
            prefs.set("hero_view_mode", "list"),
            Err(HerodexError::Io(_))
        ));
    }
}
