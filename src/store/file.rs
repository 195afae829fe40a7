//! File-backed [`KeyValueStore`].

use std::fs;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::{StoreError, StoreResult};

/// Stores each key as `{key}.value` under a base directory.
///
/// Writes go to a temp file first and are renamed into place, so a crash
/// never leaves a half-written value behind.
#[derive(Clone, Debug)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Open the store in the platform data directory.
    ///
    /// - Linux: `~/.local/share/flipzy`
    /// - macOS: `~/Library/Application Support/flipzy`
    /// - Windows: `%APPDATA%\flipzy`
    /// - Fallback: `./save_data`
    pub fn default_location() -> StoreResult<Self> {
        let dir = directories::ProjectDirs::from("", "", "flipzy")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("./save_data"));
        Self::new(dir)
    }

    /// Open the store at `FLIPZY_DATA_DIR`, or the default location.
    pub fn from_env() -> StoreResult<Self> {
        match std::env::var("FLIPZY_DATA_DIR") {
            Ok(dir) if !dir.trim().is_empty() => Self::new(dir.trim()),
            _ => Self::default_location(),
        }
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn value_path(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.base_dir.join(format!("{key}.value")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.value_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path)?;
        tracing::debug!("Read {} ({} bytes)", path.display(), value.len());
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.value_path(key)?;
        let temp_path = path.with_extension("value.tmp");

        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Wrote {} ({} bytes)", path.display(), value.len());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        let path = self.value_path(key)?;
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Removed {}", path.display());
        }
        Ok(())
    }
}
