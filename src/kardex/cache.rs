//! Local catalog mirror.
//!
//! The cache is a two-key store: the serialized product collection and the
//! time of the last successful remote fetch. It is written only by the
//! product store and read only during initialization. Anything that fails
//! to parse is treated as a cache miss and discarded, never an error.

use crate::error::Result;
use crate::model::Product;
use chrono::{DateTime, Duration, Utc};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

const PRODUCTS_FILE: &str = "products.json";
const LAST_FETCH_FILE: &str = "products_last_fetch";

/// How long a cached catalog is served without a remote refetch.
pub fn freshness_window() -> Duration {
    Duration::minutes(10)
}

/// What the cache currently holds. Either key can be absent on its own.
#[derive(Debug, Clone, Default)]
pub struct CacheSnapshot {
    pub products: Option<Vec<Product>>,
    pub last_fetch: Option<DateTime<Utc>>,
}

impl CacheSnapshot {
    /// Fresh means: we have products, we know when they were fetched, and
    /// that was within the freshness window.
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        match (&self.products, self.last_fetch) {
            (Some(_), Some(at)) => now.signed_duration_since(at) < max_age,
            _ => false,
        }
    }
}

pub trait CatalogCache {
    /// Reads both keys. Missing or unparseable entries come back as `None`.
    fn load(&self) -> CacheSnapshot;

    /// Rewrites the product collection key.
    fn store_products(&mut self, products: &[Product]) -> Result<()>;

    /// Rewrites the last-fetch stamp key.
    fn store_fetch_time(&mut self, at: DateTime<Utc>) -> Result<()>;
}

/// File-backed cache: one directory, one file per key.
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    fn read_key(&self, file: &str) -> Option<String> {
        let path = self.root.join(file);
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read cache key");
                None
            }
        }
    }

    fn parse_products(&self, raw: &str) -> Option<Vec<Product>> {
        match serde_json::from_str(raw) {
            Ok(products) => Some(products),
            Err(e) => {
                warn!(error = %e, "cached product list is corrupt, discarding");
                None
            }
        }
    }

    fn parse_fetch_time(raw: &str) -> Option<DateTime<Utc>> {
        match DateTime::parse_from_rfc3339(raw.trim()) {
            Ok(at) => Some(at.with_timezone(&Utc)),
            Err(e) => {
                warn!(error = %e, "cached fetch stamp is corrupt, discarding");
                None
            }
        }
    }
}

impl CatalogCache for FileCache {
    fn load(&self) -> CacheSnapshot {
        let products = self
            .read_key(PRODUCTS_FILE)
            .and_then(|raw| self.parse_products(&raw));
        let last_fetch = self
            .read_key(LAST_FETCH_FILE)
            .and_then(|raw| Self::parse_fetch_time(&raw));
        CacheSnapshot {
            products,
            last_fetch,
        }
    }

    fn store_products(&mut self, products: &[Product]) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(products)?;
        fs::write(self.root.join(PRODUCTS_FILE), content)?;
        Ok(())
    }

    fn store_fetch_time(&mut self, at: DateTime<Utc>) -> Result<()> {
        self.ensure_dir()?;
        fs::write(self.root.join(LAST_FETCH_FILE), at.to_rfc3339())?;
        Ok(())
    }
}

/// In-memory cache for testing. Does NOT persist.
#[derive(Default)]
pub struct InMemoryCache {
    products: Option<Vec<Product>>,
    last_fetch: Option<DateTime<Utc>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(products: Vec<Product>, last_fetch: DateTime<Utc>) -> Self {
        Self {
            products: Some(products),
            last_fetch: Some(last_fetch),
        }
    }

    pub fn cached_products(&self) -> Option<&[Product]> {
        self.products.as_deref()
    }
}

impl CatalogCache for InMemoryCache {
    fn load(&self) -> CacheSnapshot {
        CacheSnapshot {
            products: self.products.clone(),
            last_fetch: self.last_fetch,
        }
    }

    fn store_products(&mut self, products: &[Product]) -> Result<()> {
        self.products = Some(products.to_vec());
        Ok(())
    }

    fn store_fetch_time(&mut self, at: DateTime<Utc>) -> Result<()> {
        self.last_fetch = Some(at);
        Ok(())
    }
}
