use crate::storage::StringStore;

/// Store key holding the JSON-serialized array of city names.
pub const HISTORY_KEY: &str = "weatherSearchHistory";

const MAX_ENTRIES: usize = 5;

/// Recent searches, most recent first, unique case-insensitively,
/// capped at five entries. Every mutation persists immediately.
#[derive(Debug)]
pub struct HistoryStore<S: StringStore> {
    store: S,
    entries: Vec<String>,
}

impl<S: StringStore> HistoryStore<S> {
    /// Loads persisted history. Absent or unparseable data yields an
    /// empty list; this never fails the caller.
    pub fn load(store: S) -> Self {
        let entries = store
            .get(HISTORY_KEY)
            .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok())
            .unwrap_or_default();

        Self { store, entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Front-inserts `city`, dropping any case-insensitive duplicate
    /// first, then truncates to the cap.
    ///
    /// `city` must be the canonical name returned by the provider; that
    /// is what keeps deduplication stable when the user re-types the
    /// same city with different casing.
    pub fn add(&mut self, city: &str) {
        let needle = city.to_lowercase();
        self.entries.retain(|e| e.to_lowercase() != needle);
        self.entries.insert(0, city.to_string());
        self.entries.truncate(MAX_ENTRIES);
        self.persist();
    }

    /// Exact-match removal. Entries carry provider casing after [`add`],
    /// so display strings match stored strings.
    ///
    /// [`add`]: HistoryStore::add
    pub fn remove(&mut self, city: &str) {
        self.entries.retain(|e| e != city);
        self.persist();
    }

    /// Empties the history and drops the stored value entirely.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.store.remove(HISTORY_KEY);
    }

    fn persist(&mut self) {
        match serde_json::to_string(&self.entries) {
            Ok(raw) => self.store.set(HISTORY_KEY, &raw),
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize search history");
            }
        }
    }
}
