//! Settings slot storage
//!
//! The store only needs a read/write/clear capability on one named slot.
//! `FileStorage` keeps it as a JSON file under the user config directory,
//! `MemoryStorage` keeps it in memory (ephemeral sessions and tests).

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A single key-value slot holding the serialized configuration
pub trait SettingsStorage {
    /// Current slot contents, `None` when nothing was stored yet
    fn read(&self) -> Result<Option<String>>;

    /// Replace the slot contents
    fn write(&mut self, contents: &str) -> Result<()>;

    /// Remove the slot entirely; removing an absent slot succeeds
    fn clear(&mut self) -> Result<()>;
}

/// Slot backed by a file on disk
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/mockup-studio/settings.json`
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileStorage {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl SettingsStorage for FileStorage {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No settings file yet");
                Ok(None)
            }
            Err(e) => Err(e).with_context(|| format!("Failed to read settings from {}", self.path.display())),
        }
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {}", parent.display()))?;
        }
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove settings file {}", self.path.display())),
        }
    }
}

/// Slot kept in memory for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Option<String>,
    unavailable: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with `contents`
    #[cfg(test)]
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self { slot: Some(contents.into()), unavailable: false }
    }

    /// Storage whose every operation fails, like a full or blocked backend
    #[cfg(test)]
    pub fn unavailable() -> Self {
        Self { slot: None, unavailable: true }
    }

    #[cfg(test)]
    pub fn contents(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(anyhow!("settings storage is unavailable"));
        }
        Ok(())
    }
}

impl SettingsStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>> {
        self.check_available()?;
        Ok(self.slot.clone())
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        self.check_available()?;
        self.slot = Some(contents.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.check_available()?;
        self.slot = None;
        Ok(())
    }
}

/// Boxed storages are storages too, so the GUI can pick one at runtime
impl<S: SettingsStorage + ?Sized> SettingsStorage for Box<S> {
    fn read(&self) -> Result<Option<String>> {
        (**self).read()
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        (**self).write(contents)
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_storage_missing_file_reads_none() -> Result<()> {
        let dir = tempdir()?;
        let storage = FileStorage::new(dir.path().join("settings.json"));
        assert_eq!(storage.read()?, None);
        Ok(())
    }

    #[test]
    fn test_file_storage_write_creates_directories() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("deeper").join("settings.json");
        let mut storage = FileStorage::new(&path);

        storage.write("{\"isDarkMode\":true}")?;
        assert!(path.exists());
        assert_eq!(storage.read()?.as_deref(), Some("{\"isDarkMode\":true}"));
        Ok(())
    }

    #[test]
    fn test_file_storage_write_replaces_previous() -> Result<()> {
        let dir = tempdir()?;
        let mut storage = FileStorage::new(dir.path().join("settings.json"));
        storage.write("first")?;
        storage.write("second")?;
        assert_eq!(storage.read()?.as_deref(), Some("second"));
        Ok(())
    }

    #[test]
    fn test_file_storage_clear_removes_slot() -> Result<()> {
        let dir = tempdir()?;
        let mut storage = FileStorage::new(dir.path().join("settings.json"));
        storage.write("{}")?;
        storage.clear()?;
        assert_eq!(storage.read()?, None);

        // Clearing twice is fine
        storage.clear()?;
        Ok(())
    }

    #[test]
    fn test_default_path_ends_with_slot_name() {
        let path = FileStorage::default_path();
        assert!(path.ends_with("mockup-studio/settings.json"));
    }

    #[test]
    fn test_memory_storage_roundtrip() -> Result<()> {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.read()?, None);
        storage.write("abc")?;
        assert_eq!(storage.contents(), Some("abc"));
        storage.clear()?;
        assert_eq!(storage.contents(), None);
        Ok(())
    }

    #[test]
    fn test_unavailable_memory_storage_fails() {
        let mut storage = MemoryStorage::unavailable();
        assert!(storage.read().is_err());
        assert!(storage.write("abc").is_err());
        assert!(storage.clear().is_err());
    }
}
