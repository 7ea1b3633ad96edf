//! Persisted favorites.
//!
//! The whole list is stored as one JSON array of strings and is always
//! overwritten in full.

use anyhow::{Context, Result};
use std::{
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::warn;

use crate::config::Config;

/// Backing storage for the favorites list.
pub trait FavoritesStore: Send + Sync + Debug {
    /// Read the stored list. Absent or unreadable data yields an empty list.
    fn load(&self) -> Vec<String>;

    /// Replace the stored list with `favorites`.
    fn save(&self, favorites: &[String]) -> Result<()>;
}

/// Favorites kept in a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.favorites_file_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<Vec<String>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read favorites file: {}", self.path.display()))?;

        let list = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse favorites file: {}", self.path.display()))?;

        Ok(Some(list))
    }
}

impl FavoritesStore for JsonFileStore {
    fn load(&self) -> Vec<String> {
        match self.read() {
            Ok(list) => list.unwrap_or_default(),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "Ignoring unreadable favorites");
                Vec::new()
            }
        }
    }

    fn save(&self, favorites: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create favorites directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string(favorites).context("Failed to serialize favorites")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write favorites file: {}", self.path.display()))?;

        Ok(())
    }
}

/// In-process store. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_favorites<I, S>(favorites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { inner: Arc::new(Mutex::new(favorites.into_iter().map(Into::into).collect())) }
    }

    /// What was last saved.
    pub fn snapshot(&self) -> Vec<String> {
        self.load()
    }
}

impl FavoritesStore for MemoryStore {
    fn load(&self) -> Vec<String> {
        match self.inner.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn save(&self, favorites: &[String]) -> Result<()> {
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = favorites.to_vec();
        Ok(())
    }
}
