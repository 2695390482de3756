//! Share-link records and their storage.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A public hash mapped to a filesystem path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLink {
    pub hash: String,
    pub path: PathBuf,
    pub expires: bool,
    pub expire_date: DateTime<Utc>,
}

impl ShareLink {
    /// A link that never expires.
    pub fn permanent(hash: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            hash: hash.into(),
            path: path.into(),
            expires: false,
            expire_date: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    /// A link valid until `expire_date`.
    pub fn expiring(
        hash: impl Into<String>,
        path: impl Into<PathBuf>,
        expire_date: DateTime<Utc>,
    ) -> Self {
        Self {
            hash: hash.into(),
            path: path.into(),
            expires: true,
            expire_date,
        }
    }

    /// Whether the link is past its expiration at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires && self.expire_date < now
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Share store failures. A missing record is not an error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("share store I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("share store encoding: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("share store unavailable: {0}")]
    Unavailable(String),
}

/// Keyed storage of share links.
#[async_trait]
pub trait ShareStore: Send + Sync {
    /// `Ok(None)` when no record exists for `hash`.
    async fn get(&self, hash: &str) -> Result<Option<ShareLink>, StoreError>;

    /// Remove a record. Removing an absent record succeeds.
    async fn delete(&self, link: &ShareLink) -> Result<(), StoreError>;

    async fn insert(&self, link: ShareLink) -> Result<(), StoreError>;
}

/// A concurrent in-memory share store with optional JSON persistence.
#[derive(Clone, Default)]
pub struct MemoryShareStore {
    inner: Arc<DashMap<String, ShareLink>>,
    persistence_path: Option<PathBuf>,
}

impl MemoryShareStore {
    /// Create a new empty store.
    pub fn new(persistence_path: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            persistence_path,
        }
    }

    /// Load from file if it exists; later saves go to the same file.
    pub fn load_from_file(path: &Path) -> Result<Self, StoreError> {
        let store = Self::new(Some(path.to_path_buf()));
        if path.exists() {
            let reader = BufReader::new(File::open(path)?);
            let map: HashMap<String, ShareLink> = serde_json::from_reader(reader)?;

            for (k, v) in map {
                store.inner.insert(k, v);
            }
            tracing::info!(count = store.inner.len(), path = ?path, "Loaded share links");
        }
        Ok(store)
    }

    /// Save to the persistence file, if one is configured.
    pub fn save_to_file(&self) -> Result<(), StoreError> {
        if let Some(path) = &self.persistence_path {
            let writer = BufWriter::new(File::create(path)?);

            let map: HashMap<_, _> = self
                .inner
                .iter()
                .map(|r| (r.key().clone(), r.value().clone()))
                .collect();

            serde_json::to_writer(writer, &map)?;
            tracing::info!(count = map.len(), path = ?path, "Saved share links");
        }
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.inner.len()
    }
}

#[async_trait]
impl ShareStore for MemoryShareStore {
    async fn get(&self, hash: &str) -> Result<Option<ShareLink>, StoreError> {
        Ok(self.inner.get(hash).map(|r| r.value().clone()))
    }

    async fn delete(&self, link: &ShareLink) -> Result<(), StoreError> {
        self.inner.remove(&link.hash);
        Ok(())
    }

    async fn insert(&self, link: ShareLink) -> Result<(), StoreError> {
        self.inner.insert(link.hash.clone(), link);
        Ok(())
    }
}
