use super::{validate_key, KeyValueStore};
use crate::error::Result;
use std::collections::BTreeMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    values: BTreeMap<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::commands::{append, create};
    use crate::model::{DiaryRecord, EntryKind};

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

        pub fn with_diary(mut self, title: &str, pin: &str) -> Self {
            create::run(&mut self.store, title, "#ff0000", pin).unwrap();
            self
        }

        pub fn with_text_entries(mut self, title: &str, count: usize) -> Self {
            let diary = self.diary(title);
            for i in 0..count {
                append::run(
                    &mut self.store,
                    &diary.id,
                    EntryKind::Text,
                    &format!("Entry {}", i + 1),
                )
                .unwrap();
            }
            self
        }

        pub fn diary(&self, title: &str) -> DiaryRecord {
            crate::commands::helpers::load_diaries(&self.store)
                .unwrap()
                .into_iter()
                .find(|d| d.title == title)
                .unwrap()
        }
    }
}
