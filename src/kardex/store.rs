//! # Product Store
//!
//! The store owns the authoritative in-memory product collection and is
//! the only writer of the local cache. It is constructed from injected
//! dependencies — a [`ProductApi`], a [`CatalogCache`] and a [`Clock`] —
//! so the whole CRUD surface is testable without a network or a terminal.
//!
//! ## Semantics
//!
//! Mutations are confirmed-only: the collection changes strictly after the
//! remote call succeeds, and a failed call leaves it byte-for-byte
//! untouched. The one local-merge path is a `204 No Content` update reply,
//! where the server accepted the record but returned no body and the
//! client keeps the copy it submitted.
//!
//! Every mutating method takes `&mut self`, which serializes mutations:
//! a second edit cannot start while one is in flight.
//!
//! ## Degradation
//!
//! `initialize` never fails. It prefers a fresh cache, falls back to the
//! network, then to a stale cache, then to an empty collection, logging
//! each degradation instead of surfacing it.

use crate::cache::{freshness_window, CatalogCache};
use crate::error::{KardexError, Result};
use crate::model::{Product, ProductDraft, ProductId};
use crate::remote::{ProductApi, UpdateReply};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant, for testing freshness windows and
/// timestamp stamping.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Which path `initialize` ended up taking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitSource {
    FreshCache,
    Remote,
    StaleCache,
    Empty,
}

pub struct ProductStore<A, C, K = SystemClock> {
    api: A,
    cache: C,
    clock: K,
    max_cache_age: chrono::Duration,
    products: Vec<Product>,
}

impl<A, C, K> ProductStore<A, C, K>
where
    A: ProductApi,
    C: CatalogCache,
    K: Clock,
{
    pub fn new(api: A, cache: C, clock: K) -> Self {
        Self {
            api,
            cache,
            clock,
            max_cache_age: freshness_window(),
            products: Vec::new(),
        }
    }

    /// Overrides the default 10-minute freshness window.
    pub fn with_max_cache_age(mut self, age: chrono::Duration) -> Self {
        self.max_cache_age = age;
        self
    }

    /// Loads the collection: fresh cache first, then the remote API, then
    /// any stale cache, then empty. Infallible; failures degrade and are
    /// logged.
    pub async fn initialize(&mut self) -> InitSource {
        let snapshot = self.cache.load();

        if snapshot.is_fresh(self.clock.now(), self.max_cache_age) {
            self.products = snapshot.products.unwrap_or_default();
            debug!(count = self.products.len(), "catalog loaded from cache");
            return InitSource::FreshCache;
        }

        match self.api.fetch_all().await {
            Ok(products) => {
                self.products = products;
                self.write_cache();
                if let Err(e) = self.cache.store_fetch_time(self.clock.now()) {
                    warn!(error = %e, "failed to record the fetch time");
                }
                debug!(count = self.products.len(), "catalog fetched from API");
                InitSource::Remote
            }
            Err(e) => {
                warn!(error = %e, "could not fetch products from the API");
                match snapshot.products {
                    Some(products) => {
                        self.products = products;
                        InitSource::StaleCache
                    }
                    None => {
                        self.products = Vec::new();
                        InitSource::Empty
                    }
                }
            }
        }
    }

    /// Forces a remote refetch regardless of cache freshness. The caller
    /// asked for it explicitly, so unlike `initialize` a failure is
    /// returned (with the current collection kept intact).
    pub async fn refresh(&mut self) -> Result<usize> {
        let products = self.api.fetch_all().await?;
        self.products = products;
        self.write_cache();
        if let Err(e) = self.cache.store_fetch_time(self.clock.now()) {
            warn!(error = %e, "failed to record the fetch time");
        }
        Ok(self.products.len())
    }

    /// Read-only view of the collection.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Creates a product remotely and appends the server's record (which
    /// carries the assigned id) on success.
    pub async fn create(&mut self, draft: ProductDraft) -> Result<Product> {
        let created = self.api.create(&draft).await?;
        self.products.push(created.clone());
        self.write_cache();
        debug!(id = %created.id, "product created");
        Ok(created)
    }

    /// Replaces the record at `id`. The original creation timestamp is
    /// preserved and the modification timestamp stamped from the clock
    /// before the record goes out; a `204` reply keeps this merged copy,
    /// a body reply wins over it.
    pub async fn update(&mut self, id: &ProductId, draft: ProductDraft) -> Result<Product> {
        let position = self
            .position(id)
            .ok_or_else(|| KardexError::NotFound(id.clone()))?;

        let merged = Product {
            id: id.clone(),
            title: draft.title,
            description: draft.description,
            price: draft.price,
            discount: draft.discount,
            category: draft.category,
            image: draft.image,
            created_at: self.products[position].created_at,
            updated_at: self.clock.now(),
        };

        let stored = match self.api.update(&merged).await? {
            UpdateReply::Replaced(product) => product,
            UpdateReply::NoContent => merged,
        };

        self.products[position] = stored.clone();
        self.write_cache();
        debug!(id = %id, "product updated");
        Ok(stored)
    }

    /// Deletes the record at `id`, returning the removed product.
    pub async fn delete(&mut self, id: &ProductId) -> Result<Product> {
        let position = self
            .position(id)
            .ok_or_else(|| KardexError::NotFound(id.clone()))?;

        self.api.delete(id).await?;
        let removed = self.products.remove(position);
        self.write_cache();
        debug!(id = %id, "product deleted");
        Ok(removed)
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.products.iter().position(|p| &p.id == id)
    }

    fn write_cache(&mut self) {
        if let Err(e) = self.cache.store_products(&self.products) {
            warn!(error = %e, "failed to refresh the product cache");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCache;
    use crate::remote::InMemoryApi;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn product(id: &str, title: &str, price: f64) -> Product {
        let created = now() - Duration::days(3);
        Product {
            id: ProductId::new(id),
            title: title.into(),
            description: format!("{} description", title),
            price,
            discount: 5.0,
            category: "general".into(),
            image: "https://example.com/p.png".into(),
            created_at: created,
            updated_at: created,
        }
    }

    fn draft(title: &str, price: f64) -> ProductDraft {
        ProductDraft {
            title: title.into(),
            description: format!("{} description", title),
            price,
            discount: 20.0,
            category: "general".into(),
            image: "https://example.com/new.png".into(),
        }
    }

    fn store_with(
        api: InMemoryApi,
        cache: InMemoryCache,
    ) -> ProductStore<InMemoryApi, InMemoryCache, FixedClock> {
        ProductStore::new(api, cache, FixedClock(now()))
    }

    #[tokio::test]
    async fn initialize_serves_a_fresh_cache_without_touching_the_network() {
        let cached = vec![product("1", "Cached", 10.0)];
        let cache = InMemoryCache::seeded(cached.clone(), now() - Duration::minutes(5));
        let mut store = store_with(InMemoryApi::new(), cache);

        assert_eq!(store.initialize().await, InitSource::FreshCache);
        assert_eq!(store.products(), cached.as_slice());
        assert_eq!(store.api().call_count(), 0);
    }

    #[tokio::test]
    async fn a_wider_cache_window_keeps_serving_the_mirror() {
        let cached = vec![product("1", "Cached", 10.0)];
        let cache = InMemoryCache::seeded(cached.clone(), now() - Duration::minutes(30));
        let mut store =
            store_with(InMemoryApi::new(), cache).with_max_cache_age(Duration::hours(1));

        assert_eq!(store.initialize().await, InitSource::FreshCache);
        assert_eq!(store.api().call_count(), 0);
    }

    #[tokio::test]
    async fn initialize_refetches_once_the_cache_goes_stale() {
        let cache = InMemoryCache::seeded(
            vec![product("1", "Old", 10.0)],
            now() - Duration::minutes(11),
        );
        let api = InMemoryApi::seeded(vec![product("2", "Fresh", 20.0)]);
        let mut store = store_with(api, cache);

        assert_eq!(store.initialize().await, InitSource::Remote);
        assert_eq!(store.len(), 1);
        assert_eq!(store.products()[0].title, "Fresh");
        // the cache mirror was rewritten with the remote list
        assert_eq!(store.cache().cached_products().unwrap().len(), 1);
        assert_eq!(store.cache().cached_products().unwrap()[0].title, "Fresh");
    }

    #[tokio::test]
    async fn initialize_falls_back_to_a_stale_cache_when_the_api_is_down() {
        let cached = vec![product("1", "Stale", 10.0)];
        let cache = InMemoryCache::seeded(cached.clone(), now() - Duration::hours(2));
        let api = InMemoryApi::new();
        api.fail_with_status(502);
        let mut store = store_with(api, cache);

        assert_eq!(store.initialize().await, InitSource::StaleCache);
        assert_eq!(store.products(), cached.as_slice());
    }

    #[tokio::test]
    async fn initialize_degrades_to_empty_with_no_cache_and_no_network() {
        let api = InMemoryApi::new();
        api.fail_with_status(500);
        let mut store = store_with(api, InMemoryCache::new());

        assert_eq!(store.initialize().await, InitSource::Empty);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn create_appends_the_server_record_and_rewrites_the_cache() {
        let mut store = store_with(InMemoryApi::new(), InMemoryCache::new());
        store.initialize().await;

        let created = store.create(draft("Toaster", 45.0)).await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&created.id).unwrap().title, "Toaster");
        assert_eq!(store.cache().cached_products().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_create_leaves_the_collection_unchanged() {
        let api = InMemoryApi::seeded(vec![product("1", "Existing", 10.0)]);
        let mut store = store_with(api, InMemoryCache::new());
        store.initialize().await;
        let before = store.products().to_vec();

        store.api().fail_with_status(500);
        let err = store.create(draft("Doomed", 1.0)).await.unwrap_err();
        assert!(matches!(err, KardexError::Api { status: 500, .. }));
        assert_eq!(store.products(), before.as_slice());
    }

    #[tokio::test]
    async fn update_preserves_created_at_and_stamps_updated_at() {
        let original = product("1", "Lamp", 30.0);
        let api = InMemoryApi::seeded(vec![original.clone()]);
        let mut store = store_with(api, InMemoryCache::new());
        store.initialize().await;

        let stored = store
            .update(&original.id, draft("Lamp v2", 35.0))
            .await
            .unwrap();
        assert_eq!(stored.created_at, original.created_at);
        assert_eq!(stored.updated_at, now());
        assert_eq!(store.get(&original.id).unwrap().title, "Lamp v2");
    }

    #[tokio::test]
    async fn update_keeps_the_merged_record_on_no_content() {
        let original = product("1", "Lamp", 30.0);
        let api = InMemoryApi::seeded(vec![original.clone()]);
        api.reply_no_content_on_update();
        let mut store = store_with(api, InMemoryCache::new());
        store.initialize().await;

        let stored = store
            .update(&original.id, draft("Lamp v2", 35.0))
            .await
            .unwrap();
        assert_eq!(stored.title, "Lamp v2");
        assert_eq!(stored.price, 35.0);
        assert_eq!(stored.created_at, original.created_at);
        assert_eq!(stored.updated_at, now());
    }

    #[tokio::test]
    async fn update_of_an_unknown_id_is_an_explicit_error_with_no_request() {
        let mut store = store_with(InMemoryApi::new(), InMemoryCache::new());
        store.initialize().await;
        let calls_after_init = store.api().call_count();

        let err = store
            .update(&ProductId::new("ghost"), draft("X", 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, KardexError::NotFound(_)));
        assert_eq!(store.api().call_count(), calls_after_init);
    }

    #[tokio::test]
    async fn failed_update_leaves_the_record_as_it_was() {
        let original = product("1", "Lamp", 30.0);
        let api = InMemoryApi::seeded(vec![original.clone()]);
        let mut store = store_with(api, InMemoryCache::new());
        store.initialize().await;

        store.api().fail_with_status(503);
        assert!(store
            .update(&original.id, draft("Lamp v2", 35.0))
            .await
            .is_err());
        assert_eq!(store.get(&original.id).unwrap(), &original);
    }

    #[tokio::test]
    async fn delete_removes_the_record_and_rewrites_the_cache() {
        let target = product("1", "Lamp", 30.0);
        let api = InMemoryApi::seeded(vec![target.clone(), product("2", "Chair", 90.0)]);
        let mut store = store_with(api, InMemoryCache::new());
        store.initialize().await;

        let removed = store.delete(&target.id).await.unwrap();
        assert_eq!(removed.id, target.id);
        assert_eq!(store.len(), 1);
        assert_eq!(store.cache().cached_products().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_record() {
        let target = product("1", "Lamp", 30.0);
        let api = InMemoryApi::seeded(vec![target.clone()]);
        let mut store = store_with(api, InMemoryCache::new());
        store.initialize().await;

        store.api().fail_with_status(500);
        assert!(store.delete(&target.id).await.is_err());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn refresh_replaces_the_collection_but_failure_keeps_it() {
        let api = InMemoryApi::seeded(vec![product("1", "One", 10.0)]);
        let mut store = store_with(api, InMemoryCache::new());
        store.initialize().await;

        store.api().fail_with_status(502);
        assert!(store.refresh().await.is_err());
        assert_eq!(store.len(), 1);

        store.api().clear_fault();
        assert_eq!(store.refresh().await.unwrap(), 1);
    }
}
