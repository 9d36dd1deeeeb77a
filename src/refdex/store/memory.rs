use super::IndexStore;
use crate::error::{RefdexError, Result};
use crate::model::{Entry, Settings};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct StoredIndex {
    settings: Settings,
    entries: Vec<Entry>,
}

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    indexes: BTreeMap<String, StoredIndex>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn get_mut(&mut self, title: &str) -> Result<&mut StoredIndex> {
        self.indexes
            .get_mut(title)
            .ok_or_else(|| RefdexError::NotFound(title.to_string()))
    }
}

impl IndexStore for InMemoryStore {
    fn create_index(&mut self, title: &str, settings: &Settings) -> Result<()> {
        if self.indexes.contains_key(title) {
            return Err(RefdexError::Conflict(title.to_string()));
        }
        self.indexes.insert(
            title.to_string(),
            StoredIndex {
                settings: *settings,
                entries: Vec::new(),
            },
        );
        Ok(())
    }

    fn index_exists(&self, title: &str) -> bool {
        self.indexes.contains_key(title)
    }

    fn load_settings(&self, title: &str) -> Result<Settings> {
        self.indexes
            .get(title)
            .map(|idx| idx.settings)
            .ok_or_else(|| RefdexError::NotFound(title.to_string()))
    }

    fn load_entries(&self, title: &str) -> Result<Vec<Entry>> {
        self.indexes
            .get(title)
            .map(|idx| idx.entries.clone())
            .ok_or_else(|| RefdexError::NotFound(title.to_string()))
    }

    fn save_settings(&mut self, title: &str, settings: &Settings) -> Result<()> {
        self.get_mut(title)?.settings = *settings;
        Ok(())
    }

    fn save_entries(&mut self, title: &str, entries: &[Entry]) -> Result<()> {
        self.get_mut(title)?.entries = entries.to_vec();
        Ok(())
    }

    fn append_entry(&mut self, title: &str, entry: &Entry) -> Result<()> {
        self.get_mut(title)?.entries.push(entry.clone());
        Ok(())
    }

    fn list_indexes(&self) -> Result<Vec<String>> {
        Ok(self.indexes.keys().cloned().collect())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::PageRef;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_index(mut self, title: &str, books: u32) -> Self {
            self.store
                .create_index(title, &Settings::new(books, 1))
                .unwrap();
            self
        }

        pub fn with_entry(
            mut self,
            title: &str,
            term: &str,
            category: &str,
            book: u32,
            page: &str,
        ) -> Self {
            let entry = Entry::new(term, category, &PageRef::new(book, Some(page)), "");
            self.store.append_entry(title, &entry).unwrap();
            self
        }
    }
}
