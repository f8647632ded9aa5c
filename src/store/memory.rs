//! store::memory
//!
//! In-memory post store.
//!
//! # Design
//!
//! Records live in insertion order behind an `Arc<Mutex<...>>`, so clones
//! share state. Every call is recorded and any operation can be configured
//! to fail, which makes the store usable as a test double as well as a
//! small embedded backend.
//!
//! # Example
//!
//! ```
//! use postdata::core::types::{PostRecord, PropertyBag};
//! use postdata::store::{MemoryStore, PostQuery, PostStore};
//!
//! # tokio_test::block_on(async {
//! let store = MemoryStore::new();
//!
//! let mut properties = PropertyBag::new();
//! properties.insert("url", "https://website.example/notes/1/");
//! store.insert(PostRecord { path: "notes/1.md".into(), properties }).await.unwrap();
//!
//! let found = store
//!     .find_one(&PostQuery::by_url("https://website.example/notes/1/"))
//!     .await
//!     .unwrap();
//! assert_eq!(found.unwrap().path, "notes/1.md");
//! # });
//! ```

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

use super::traits::{PostQuery, PostStore, StoreError};
use crate::core::types::PostRecord;

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    records: Vec<PostRecord>,
    fail_on: Option<FailOn>,
    operations: Vec<StoreOperation>,
}

/// Which operation should fail, and with what.
#[derive(Debug, Clone)]
pub enum FailOn {
    FindOne(StoreError),
    Insert(StoreError),
    Update(StoreError),
}

/// Recorded call, for verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOperation {
    FindOne { url: String },
    Insert { url: Option<String> },
    Update { url: String },
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with records.
    pub fn with_records(records: Vec<PostRecord>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryStoreInner {
                records,
                ..Default::default()
            })),
        }
    }

    /// Fail a specific operation from now on.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.lock().fail_on = Some(fail_on);
        self
    }

    pub fn clear_fail_on(&self) {
        self.lock().fail_on = None;
    }

    pub fn operations(&self) -> Vec<StoreOperation> {
        self.lock().operations.clone()
    }

    pub fn clear_operations(&self) {
        self.lock().operations.clear();
    }

    /// All records, in insertion order.
    pub fn records(&self) -> Vec<PostRecord> {
        self.lock().records.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().records.is_empty()
    }

    // A panicking test thread must not wedge the store for other clones.
    fn lock(&self) -> MutexGuard<'_, MemoryStoreInner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, operation: StoreOperation) {
        self.lock().operations.push(operation);
    }

    fn check_fail(&self, operation: &str) -> Result<(), StoreError> {
        match (&self.lock().fail_on, operation) {
            (Some(FailOn::FindOne(e)), "find_one")
            | (Some(FailOn::Insert(e)), "insert")
            | (Some(FailOn::Update(e)), "update") => Err(e.clone()),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn find_one(&self, query: &PostQuery) -> Result<Option<PostRecord>, StoreError> {
        self.record(StoreOperation::FindOne {
            url: query.url().to_string(),
        });
        self.check_fail("find_one")?;

        let inner = self.lock();
        Ok(inner.records.iter().find(|r| query.matches(r)).cloned())
    }

    async fn insert(&self, record: PostRecord) -> Result<(), StoreError> {
        self.record(StoreOperation::Insert {
            url: record.url().map(str::to_string),
        });
        self.check_fail("insert")?;

        let mut inner = self.lock();
        if let Some(url) = record.url() {
            let query = PostQuery::by_url(url);
            if inner.records.iter().any(|r| query.matches(r)) {
                return Err(StoreError::Duplicate(url.to_string()));
            }
        }
        inner.records.push(record);
        Ok(())
    }

    async fn update(&self, query: &PostQuery, record: PostRecord) -> Result<(), StoreError> {
        self.record(StoreOperation::Update {
            url: query.url().to_string(),
        });
        self.check_fail("update")?;

        let mut inner = self.lock();
        let existing = inner
            .records
            .iter_mut()
            .find(|r| query.matches(r))
            .ok_or_else(|| StoreError::NotFound(query.url().to_string()))?;
        *existing = record;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PropertyBag;

    fn record(url: &str, path: &str) -> PostRecord {
        let mut properties = PropertyBag::new();
        properties.insert("url", url);
        PostRecord {
            path: path.to_string(),
            properties,
        }
    }

    #[tokio::test]
    async fn insert_then_find() {
        let store = MemoryStore::new();
        store.insert(record("https://a.example/1", "1.md")).await.unwrap();

        let found = store
            .find_one(&PostQuery::by_url("https://a.example/1"))
            .await
            .unwrap();
        assert_eq!(found.map(|r| r.path), Some("1.md".to_string()));

        let missing = store
            .find_one(&PostQuery::by_url("https://a.example/2"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn duplicate_insert_fails() {
        let store = MemoryStore::with_records(vec![record("https://a.example/1", "1.md")]);
        let result = store.insert(record("https://a.example/1", "other.md")).await;
        assert_eq!(
            result,
            Err(StoreError::Duplicate("https://a.example/1".to_string()))
        );
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn update_replaces_record() {
        let store = MemoryStore::with_records(vec![record("https://a.example/1", "1.md")]);
        let query = PostQuery::by_url("https://a.example/1");
        store
            .update(&query, record("https://a.example/1", "moved.md"))
            .await
            .unwrap();
        assert_eq!(store.records()[0].path, "moved.md");

        let result = store
            .update(&PostQuery::by_url("https://a.example/9"), record("x", "x"))
            .await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn fail_on_injects_errors() {
        let store = MemoryStore::new().fail_on(FailOn::FindOne(StoreError::Backend("down".into())));
        let result = store.find_one(&PostQuery::by_url("https://a.example/1")).await;
        assert_eq!(result, Err(StoreError::Backend("down".into())));

        store.clear_fail_on();
        assert!(store
            .find_one(&PostQuery::by_url("https://a.example/1"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn records_operations() {
        let store = MemoryStore::new();
        store.insert(record("https://a.example/1", "1.md")).await.unwrap();
        store
            .find_one(&PostQuery::by_url("https://a.example/1"))
            .await
            .unwrap();

        assert_eq!(
            store.operations(),
            vec![
                StoreOperation::Insert {
                    url: Some("https://a.example/1".to_string())
                },
                StoreOperation::FindOne {
                    url: "https://a.example/1".to_string()
                },
            ]
        );

        store.clear_operations();
        assert!(store.operations().is_empty());
    }

    #[test]
    fn clones_share_state() {
        let store = MemoryStore::with_records(vec![record("https://a.example/1", "1.md")]);
        let clone = store.clone();
        assert_eq!(clone.len(), 1);
        assert!(!clone.is_empty());
    }
}
