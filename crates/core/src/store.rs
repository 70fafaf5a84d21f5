use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;

/// String-keyed persistence backend for user data.
///
/// Values are opaque to the store; callers serialize before writing.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Store that keeps each key in its own JSON file under a data directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: PathBuf) -> Self {
        JsonFileStore { dir }
    }

    /// Open the store in the platform data directory.
    pub fn open_default() -> anyhow::Result<Self> {
        let dir = dirs::data_dir()
            .context("could not determine the platform data directory")?
            .join("chromalab");
        Ok(JsonFileStore::new(dir))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

/// In-memory store used by tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_missing_key_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().to_path_buf());
        assert!(store.get("saved_colors").unwrap().is_none());
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(temp_dir.path().to_path_buf());
        store.set("saved_colors", "[1, 2, 3]").unwrap();
        assert_eq!(store.get("saved_colors").unwrap().unwrap(), "[1, 2, 3]");
    }

    #[test]
    fn test_set_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("nested").join("data");
        let mut store = JsonFileStore::new(dir.clone());
        store.set("settings", "{}").unwrap();
        assert!(dir.join("settings.json").exists());
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let mut store = MemoryStore::new();
        store.set("key", "old").unwrap();
        store.set("key", "new").unwrap();
        assert_eq!(store.get("key").unwrap().unwrap(), "new");
    }

    #[test]
    fn test_memory_store_starts_empty() {
        let store = MemoryStore::new();
        assert!(store.get("anything").unwrap().is_none());
    }
}
