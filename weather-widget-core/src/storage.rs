use std::{collections::HashMap, fs, path::PathBuf};

use anyhow::Result;

/// Synchronous string store keyed by flat names, the stand-in for the
/// browser's localStorage. Accessed from a single thread only.
///
/// Mutations never fail the caller; a persistence error is logged and
/// swallowed, matching how history treats unreadable stored data.
pub trait StringStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

impl<S: StringStore + ?Sized> StringStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) {
        (**self).remove(key)
    }
}

/// File-per-key store under the platform data directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Store rooted at the widget's platform data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(crate::config::data_dir()?))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StringStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        let result = fs::create_dir_all(&self.dir)
            .and_then(|()| fs::write(self.path_for(key), value));
        if let Err(err) = result {
            tracing::warn!(key, error = %err, "failed to persist store entry");
        }
    }

    fn remove(&mut self, key: &str) {
        let _ = fs::remove_file(self.path_for(key));
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl StringStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::default();
        assert_eq!(store.get("k"), None);

        store.set("k", "v");
        assert_eq!(store.get("k"), Some("v".to_string()));

        store.remove("k");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!(
            "weather-widget-store-test-{}",
            std::process::id()
        ));
        let mut store = FileStore::new(dir.clone());

        assert_eq!(store.get("history"), None);

        store.set("history", r#"["London"]"#);
        assert_eq!(store.get("history"), Some(r#"["London"]"#.to_string()));

        store.remove("history");
        assert_eq!(store.get("history"), None);

        let _ = fs::remove_dir_all(dir);
    }
}
