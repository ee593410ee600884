//! YAML-file persistence for the configuration store.
//!
//! Covers:
//! - `open` / `open_default` (load an existing file or start empty)
//! - `save` (atomic write: temp file then rename)
//! - XDG-compliant default path (`<config_dir>/dropterm/prefs.yaml`)
//!
//! Only explicitly set values are written; schema defaults stay implicit so
//! that changing a default in a later release reaches existing users.

use crate::error::ConfigError;
use crate::schema::Schema;
use crate::store::{ChangeListener, ConfigStore, ListenerId, MemoryConfigStore};
use crate::value::ConfigValue;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// [`ConfigStore`] persisted to a YAML file, written through on every change.
#[derive(Debug)]
pub struct YamlConfigStore {
    path: PathBuf,
    inner: MemoryConfigStore,
}

impl YamlConfigStore {
    /// Open the store at `path`, loading its values when the file exists.
    pub fn open(path: impl Into<PathBuf>, schema: Schema) -> Result<Self> {
        let path = path.into();
        log::info!("Preferences path: {:?}", path);

        let values = if path.exists() {
            log::info!("Loading existing preferences from {:?}", path);
            let contents = fs::read_to_string(&path)
                .map_err(ConfigError::from)
                .with_context(|| format!("Failed to read preferences from {:?}", path))?;
            Self::parse(&contents)
                .with_context(|| format!("Failed to parse preferences in {:?}", path))?
        } else {
            log::info!("Preferences file not found at {:?}, starting empty", path);
            BTreeMap::new()
        };

        Ok(Self {
            path,
            inner: MemoryConfigStore::with_values(schema, values),
        })
    }

    /// Open the store at [`Self::default_path`] with the application schema.
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path(), Schema::dropterm())
    }

    /// `<config_dir>/dropterm/prefs.yaml`, falling back to the working directory.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dropterm")
            .join("prefs.yaml")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy of the explicitly stored values.
    pub fn snapshot(&self) -> BTreeMap<String, ConfigValue> {
        self.inner.snapshot()
    }

    /// Write all explicit values to disk.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(ConfigError::from)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }

        let yaml = serde_yaml_ng::to_string(&self.inner.snapshot()).map_err(ConfigError::from)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = self.path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)
            .map_err(ConfigError::from)
            .with_context(|| format!("Failed to write {:?}", temp_path))?;
        fs::rename(&temp_path, &self.path)
            .map_err(ConfigError::from)
            .with_context(|| format!("Failed to replace {:?}", self.path))?;

        log::debug!("Preferences saved to {:?}", self.path);
        Ok(())
    }

    fn parse(contents: &str) -> Result<BTreeMap<String, ConfigValue>, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_yaml_ng::from_str(contents)?)
    }

    /// Best-effort write-through: a failed save is logged and the in-memory
    /// value stays authoritative until the next successful save.
    fn persist(&self) {
        if let Err(e) = self.save() {
            log::error!("Failed to save preferences: {:#}", e);
        }
    }
}

impl ConfigStore for YamlConfigStore {
    fn get(&self, path: &str) -> Option<ConfigValue> {
        self.inner.get(path)
    }

    fn set(&self, path: &str, value: ConfigValue) {
        let before = self.inner.is_set(path).then(|| self.inner.get(path)).flatten();
        if before.as_ref() == Some(&value) {
            return;
        }
        self.inner.set(path, value);
        self.persist();
    }

    fn unset(&self, path: &str) {
        if !self.inner.is_set(path) {
            return;
        }
        self.inner.unset(path);
        self.persist();
    }

    fn subscribe(&self, listener: ChangeListener) -> ListenerId {
        self.inner.subscribe(listener)
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        self.inner.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{general, keybindings};
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file_starts_empty() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("prefs.yaml");

        let store = YamlConfigStore::open(&path, Schema::dropterm()).unwrap();
        assert!(store.snapshot().is_empty());
        assert!(!path.exists(), "opening must not create the file");
        assert_eq!(store.get_int(general::WINDOW_SIZE), Some(50));
    }

    #[test]
    fn test_set_writes_through_and_reloads() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("prefs.yaml");

        {
            let store = YamlConfigStore::open(&path, Schema::dropterm()).unwrap();
            store.set_string(keybindings::NEW_TAB, "<Shift><Control>n");
            store.set_bool(general::USE_POPUP, false);
            store.set_int(general::HISTORY_SIZE, 4096);
        }

        let reopened = YamlConfigStore::open(&path, Schema::dropterm()).unwrap();
        assert_eq!(
            reopened.get_string(keybindings::NEW_TAB),
            Some("<Shift><Control>n".to_string())
        );
        assert_eq!(reopened.get_bool(general::USE_POPUP), Some(false));
        assert_eq!(reopened.get_int(general::HISTORY_SIZE), Some(4096));
    }

    #[test]
    fn test_unset_is_persisted() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("prefs.yaml");

        let store = YamlConfigStore::open(&path, Schema::dropterm()).unwrap();
        store.set_string(general::COMPAT_DELETE, "ascii-backspace");
        store.unset(general::COMPAT_DELETE);

        let reopened = YamlConfigStore::open(&path, Schema::dropterm()).unwrap();
        assert!(reopened.snapshot().is_empty());
        assert_eq!(
            reopened.get_string(general::COMPAT_DELETE),
            Some("delete-sequence".to_string())
        );
    }

    #[test]
    fn test_invalid_yaml_is_a_parse_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("prefs.yaml");
        fs::write(&path, "- just\n- a list\n").expect("Failed to write prefs");

        let err = YamlConfigStore::open(&path, Schema::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_file_is_accepted() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("prefs.yaml");
        fs::write(&path, "").expect("Failed to write prefs");

        let store = YamlConfigStore::open(&path, Schema::new()).unwrap();
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("prefs.yaml");

        let store = YamlConfigStore::open(&path, Schema::new()).unwrap();
        store.set_bool(general::USE_POPUP, true);

        assert!(path.exists());
        assert!(!path.with_extension("yaml.tmp").exists());
    }

    #[test]
    fn test_failed_save_keeps_value_in_memory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        // parent of the preferences file is a regular file, so saving fails
        let blocker = temp_dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("prefs.yaml");

        let store = YamlConfigStore::open(&path, Schema::dropterm()).unwrap();
        store.set_string(keybindings::NEW_TAB, "<Control>t");

        assert!(store.save().is_err());
        assert_eq!(
            store.get_string(keybindings::NEW_TAB).as_deref(),
            Some("<Control>t")
        );
        assert!(!path.exists());
    }
}
