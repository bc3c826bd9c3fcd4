use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::store::{DocumentRecord, DocumentStore};
use crate::{Error, Result};

/// In-memory document store.
///
/// Records live until the store is dropped. Reads take a shared lock and
/// clone an [`Arc`], so queries against different documents never wait on
/// each other for longer than a map lookup.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, Arc<DocumentRecord>>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

// Writers only ever insert whole records, so a poisoned lock still guards a
// valid map.
impl DocumentStore for MemoryStore {
    fn insert(&self, record: DocumentRecord) -> Result<Arc<DocumentRecord>> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        if records.contains_key(&record.id) {
            return Err(Error::Store(format!("duplicate document id {}", record.id)));
        }
        let record = Arc::new(record);
        records.insert(record.id.clone(), Arc::clone(&record));
        Ok(record)
    }

    fn get(&self, id: &str) -> Option<Arc<DocumentRecord>> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    fn len(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::Vocabulary;

    fn make_record(id: &str) -> DocumentRecord {
        DocumentRecord {
            id: id.to_string(),
            segments: Vec::new(),
            vocabulary: Vocabulary::default(),
            total_segments: 0,
            page_count: 1,
        }
    }

    #[test]
    fn test_insert_and_len() {
        let store = MemoryStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());

        store.insert(make_record("a")).unwrap();
        store.insert(make_record("b")).unwrap();
        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_get() {
        let store = MemoryStore::new();
        let inserted = store.insert(make_record("a")).unwrap();

        let found = store.get("a").unwrap();
        assert!(Arc::ptr_eq(&inserted, &found));
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let store = MemoryStore::new();
        store.insert(make_record("same-id")).unwrap();

        let err = store.insert(make_record("same-id")).unwrap_err();
        assert!(matches!(err, Error::Store(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_concurrent_readers() {
        let store = Arc::new(MemoryStore::new());
        store.insert(make_record("shared")).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store.insert(make_record(&format!("doc-{i}"))).unwrap();
                    store.get("shared").is_some()
                })
            })
            .collect();

        for h in handles {
            assert!(h.join().unwrap());
        }
        assert_eq!(store.len(), 9);
    }
}
