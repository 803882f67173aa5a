//! Object store gateway.
//!
//! Blobs (uploaded page images, cropped regions) are written and read by
//! exact key through the [`ObjectStore`] trait. The production backend is
//! S3; an in-memory backend stands in for tests and local development.

pub mod config;
pub mod memory;
pub mod s3;

use async_trait::async_trait;

pub use config::StorageConfig;
pub use memory::InMemoryObjectStore;
pub use s3::S3ObjectStore;

/// How long access URLs returned by [`ObjectStore::put`] stay valid.
pub const ACCESS_URL_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// A blob read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Errors from the object store layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No object exists under the requested key.
    #[error("Object not found: {key}")]
    NotFound { key: String },

    /// The backend failed (network, credentials, permissions).
    #[error("Object store error: {0}")]
    Backend(String),

    /// Required configuration is missing or invalid.
    #[error("Object store configuration error: {0}")]
    Config(String),
}

/// Store and fetch blobs by exact key.
///
/// Callers choose globally unique keys; the store neither deduplicates nor
/// versions, and a second `put` to the same key overwrites.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `bytes` under `key` and return a time-limited access URL.
    async fn put(&self, bytes: Vec<u8>, key: &str, content_type: &str)
        -> Result<String, StorageError>;

    /// Read the object stored under `key`.
    async fn get(&self, key: &str) -> Result<StoredObject, StorageError>;

    /// Stable public URL for `key`, if a public base URL is configured.
    fn public_url(&self, key: &str) -> Option<String>;
}

/// Join a base URL and a key with exactly one slash between them.
pub(crate) fn join_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key.trim_start_matches('/'))
}
