//! Recently searched cities.
//!
//! The history is small (at most [`MAX_ENTRIES`]), most-recent-first and
//! unique under case-insensitive comparison. [`SearchHistoryStore`] persists it
//! through a [`HistoryStorage`] port as a JSON array of strings.

use serde::Serialize;

use crate::{CityQuery, storage::HistoryStorage};

pub const MAX_ENTRIES: usize = 5;

/// Storage key of the persisted history record.
pub const STORAGE_KEY: &str = "searchHistory";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchHistory(Vec<String>);

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from arbitrary entries, restoring the invariants:
    /// blanks dropped, later duplicates dropped, at most [`MAX_ENTRIES`].
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kept: Vec<String> = Vec::with_capacity(MAX_ENTRIES);
        for entry in entries {
            let Some(city) = CityQuery::new(entry.as_ref()) else { continue };
            if kept.iter().any(|k| same_city(k, city.as_str())) {
                continue;
            }
            kept.push(city.as_str().to_string());
            if kept.len() == MAX_ENTRIES {
                break;
            }
        }
        Self(kept)
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A new history with `city` in front and any older spelling of it removed.
    pub fn with_recorded(&self, city: &CityQuery) -> Self {
        let mut entries = Vec::with_capacity(MAX_ENTRIES);
        entries.push(city.as_str().to_string());
        entries.extend(self.0.iter().filter(|e| !same_city(e, city.as_str())).cloned());
        entries.truncate(MAX_ENTRIES);
        Self(entries)
    }

    /// Entries starting with `prefix`, ignoring case, in history order.
    pub fn suggestions(&self, prefix: &str) -> Vec<&str> {
        let prefix = prefix.to_lowercase();
        self.0
            .iter()
            .filter(|e| e.to_lowercase().starts_with(&prefix))
            .map(String::as_str)
            .collect()
    }
}

fn same_city(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Loads and persists [`SearchHistory`] through an injected storage port.
#[derive(Debug)]
pub struct SearchHistoryStore {
    storage: Box<dyn HistoryStorage>,
}

impl SearchHistoryStore {
    pub fn new(storage: impl HistoryStorage + 'static) -> Self {
        Self { storage: Box::new(storage) }
    }

    /// Reads the persisted history. Missing, unreadable or malformed data
    /// yields an empty history.
    pub fn load(&self) -> SearchHistory {
        let raw = match self.storage.read(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return SearchHistory::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read search history; starting empty");
                return SearchHistory::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(entries) => SearchHistory::from_entries(entries),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring malformed search history");
                SearchHistory::new()
            }
        }
    }

    /// Records `city` on top of `current` and persists the result.
    ///
    /// A failed write is logged; the in-memory history is still returned.
    pub fn record(&self, city: &CityQuery, current: &SearchHistory) -> SearchHistory {
        let updated = current.with_recorded(city);

        let persisted = serde_json::to_string(&updated)
            .map_err(anyhow::Error::from)
            .and_then(|json| self.storage.write(STORAGE_KEY, &json));
        if let Err(e) = persisted {
            tracing::warn!(error = %e, "could not persist search history");
        }

        updated
    }

    /// Entries of `history` matching `prefix`; see [`SearchHistory::suggestions`].
    pub fn suggestions<'h>(prefix: &str, history: &'h SearchHistory) -> Vec<&'h str> {
        history.suggestions(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use anyhow::anyhow;

    fn city(name: &str) -> CityQuery {
        CityQuery::new(name).unwrap()
    }

    fn history(entries: &[&str]) -> SearchHistory {
        SearchHistory::from_entries(entries)
    }

    #[derive(Debug)]
    struct BrokenStorage;

    impl HistoryStorage for BrokenStorage {
        fn read(&self, _key: &str) -> anyhow::Result<Option<String>> {
            Err(anyhow!("disk on fire"))
        }

        fn write(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
            Err(anyhow!("disk on fire"))
        }
    }

    #[test]
    fn record_prepends_new_city() {
        let store = SearchHistoryStore::new(MemoryStorage::new());
        let updated = store.record(&city("Kandy"), &history(&["Colombo"]));

        assert_eq!(updated.entries(), ["Kandy", "Colombo"]);
    }

    #[test]
    fn record_dedupes_case_insensitively_keeping_latest_casing() {
        let store = SearchHistoryStore::new(MemoryStorage::new());
        let first = store.record(&city("Paris"), &SearchHistory::new());
        let second = store.record(&city("paris"), &first);

        assert_eq!(second.entries(), ["paris"]);
    }

    #[test]
    fn record_moves_existing_entry_to_front() {
        let store = SearchHistoryStore::new(MemoryStorage::new());
        let updated = store.record(&city("GALLE"), &history(&["Kandy", "Galle", "Colombo"]));

        assert_eq!(updated.entries(), ["GALLE", "Kandy", "Colombo"]);
    }

    #[test]
    fn record_drops_oldest_beyond_five() {
        let store = SearchHistoryStore::new(MemoryStorage::new());
        let full = history(&["Kandy", "Colombo", "Galle", "Jaffna", "Negombo"]);

        let updated = store.record(&city("Matara"), &full);

        assert_eq!(updated.entries(), ["Matara", "Kandy", "Colombo", "Galle", "Jaffna"]);
    }

    #[test]
    fn record_never_exceeds_limit() {
        let store = SearchHistoryStore::new(MemoryStorage::new());
        let mut current = SearchHistory::new();
        for i in 0..20 {
            current = store.record(&city(&format!("City {i}")), &current);
            assert!(current.len() <= MAX_ENTRIES);
        }
        assert_eq!(current.entries()[0], "City 19");
        assert_eq!(current.len(), MAX_ENTRIES);
    }

    #[test]
    fn record_persists_and_load_reads_back() {
        let store = SearchHistoryStore::new(MemoryStorage::new());
        let updated = store.record(&city("Kandy"), &history(&["Colombo"]));

        assert_eq!(store.load(), updated);
    }

    #[test]
    fn record_survives_write_failure() {
        let store = SearchHistoryStore::new(BrokenStorage);
        let updated = store.record(&city("Kandy"), &SearchHistory::new());

        assert_eq!(updated.entries(), ["Kandy"]);
    }

    #[test]
    fn load_absent_is_empty() {
        let store = SearchHistoryStore::new(MemoryStorage::new());
        assert!(store.load().is_empty());
    }

    #[test]
    fn load_invalid_json_is_empty() {
        let store = SearchHistoryStore::new(MemoryStorage::with_entry(STORAGE_KEY, "[\"Kandy\","));
        assert!(store.load().is_empty());
    }

    #[test]
    fn load_non_array_is_empty() {
        for raw in [r#"{"city":"Kandy"}"#, "\"Kandy\"", "[1, 2]", "null"] {
            let store = SearchHistoryStore::new(MemoryStorage::with_entry(STORAGE_KEY, raw));
            assert!(store.load().is_empty(), "{raw} should load as empty");
        }
    }

    #[test]
    fn load_read_error_is_empty() {
        let store = SearchHistoryStore::new(BrokenStorage);
        assert!(store.load().is_empty());
    }

    #[test]
    fn load_normalizes_stored_entries() {
        let raw = r#"["Kandy", "  ", "kandy", " Galle ", "A", "B", "C", "D"]"#;
        let store = SearchHistoryStore::new(MemoryStorage::with_entry(STORAGE_KEY, raw));

        assert_eq!(store.load().entries(), ["Kandy", "Galle", "A", "B", "C"]);
    }

    #[test]
    fn suggestions_empty_prefix_returns_everything_in_order() {
        let h = history(&["Kandy", "Colombo", "Galle"]);
        assert_eq!(SearchHistoryStore::suggestions("", &h), ["Kandy", "Colombo", "Galle"]);
    }

    #[test]
    fn suggestions_filter_by_prefix_ignoring_case() {
        let h = history(&["Kandy", "Colombo", "kalutara", "Galle", "KEGALLE"]);

        assert_eq!(SearchHistoryStore::suggestions("K", &h), ["Kandy", "kalutara", "KEGALLE"]);
        assert_eq!(SearchHistoryStore::suggestions("ka", &h), ["Kandy", "kalutara"]);
        assert!(SearchHistoryStore::suggestions("x", &h).is_empty());
    }

    #[test]
    fn persisted_format_is_plain_json_array() {
        let json = serde_json::to_string(&history(&["Kandy", "Colombo"])).unwrap();
        assert_eq!(json, r#"["Kandy","Colombo"]"#);
    }
}
