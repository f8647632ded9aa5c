//! store::traits
//!
//! The post store contract.
//!
//! # Design
//!
//! Durable storage is owned by the endpoint layer. This crate only reads
//! through it (`find_one`); `insert` and `update` are part of the contract
//! so one trait object serves both sides, but the orchestrator never
//! calls them.

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

use crate::core::types::PostRecord;

/// Errors from store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A record with this URL already exists.
    #[error("duplicate record: {0}")]
    Duplicate(String),

    /// No record matches the query.
    #[error("no record found: {0}")]
    NotFound(String),

    /// The backing store failed.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Query for a single post.
///
/// Posts are keyed by their canonical URL in `properties.url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    url: String,
}

impl PostQuery {
    pub fn by_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Document-store filter form: `{"properties.url": url}`.
    pub fn to_filter(&self) -> Value {
        json!({ "properties.url": self.url })
    }

    /// Whether a record satisfies the query.
    pub fn matches(&self, record: &PostRecord) -> bool {
        record.url() == Some(self.url.as_str())
    }
}

/// Post storage.
///
/// # Example
///
/// ```
/// use postdata::store::{MemoryStore, PostQuery, PostStore, StoreError};
///
/// async fn exists(store: &dyn PostStore, url: &str) -> Result<bool, StoreError> {
///     Ok(store.find_one(&PostQuery::by_url(url)).await?.is_some())
/// }
///
/// # tokio_test::block_on(async {
/// assert!(!exists(&MemoryStore::new(), "https://website.example/a").await.unwrap());
/// # });
/// ```
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Store name for logs.
    fn name(&self) -> &'static str;

    /// Find the record matching a query. Absence is `Ok(None)`.
    async fn find_one(&self, query: &PostQuery) -> Result<Option<PostRecord>, StoreError>;

    /// Insert a new record.
    ///
    /// # Errors
    ///
    /// `StoreError::Duplicate` if a record with the same URL exists.
    async fn insert(&self, record: PostRecord) -> Result<(), StoreError>;

    /// Replace the record matching a query.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if nothing matches.
    async fn update(&self, query: &PostQuery, record: PostRecord) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PropertyBag;

    fn record(url: &str) -> PostRecord {
        let mut properties = PropertyBag::new();
        properties.insert("url", url);
        PostRecord {
            path: "a.md".to_string(),
            properties,
        }
    }

    #[test]
    fn query_filter() {
        let query = PostQuery::by_url("https://website.example/a");
        assert_eq!(
            query.to_filter(),
            json!({"properties.url": "https://website.example/a"})
        );
    }

    #[test]
    fn query_matches_url() {
        let query = PostQuery::by_url("https://website.example/a");
        assert!(query.matches(&record("https://website.example/a")));
        assert!(!query.matches(&record("https://website.example/b")));
        assert!(!query.matches(&PostRecord {
            path: String::new(),
            properties: PropertyBag::new(),
        }));
    }

    #[test]
    fn store_error_display() {
        assert_eq!(
            StoreError::Backend("timeout".into()).to_string(),
            "store backend error: timeout"
        );
    }
}
