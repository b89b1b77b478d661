//! View orchestration.
//!
//! [`CatalogView`] sits between the store and whatever renders: it holds
//! the current filter criteria and page, recomputes the visible slice
//! through the filter engine and the pagination calculator, and publishes
//! the result to a [`ViewSink`]. Publish order is fixed — products first,
//! then page controls — and there are exactly three triggers: a successful
//! store mutation, a criteria change, a page change.

use crate::cache::CatalogCache;
use crate::error::Result;
use crate::filter;
use crate::model::{FilterCriteria, Product, ProductDraft, ProductId};
use crate::page::{self, PageControl, PageWindow};
use crate::remote::ProductApi;
use crate::store::{Clock, InitSource, ProductStore};

/// A fully computed view: the visible slice plus everything a renderer
/// needs to draw page controls.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub products: Vec<Product>,
    pub window: PageWindow,
    pub controls: Vec<PageControl>,
}

/// The rendering seam. Implementations draw; the orchestrator decides
/// when and with what.
pub trait ViewSink {
    fn show_products(&mut self, products: &[Product]);
    fn show_controls(&mut self, controls: &[PageControl]);
}

/// Sink that renders nowhere. Useful for headless embedding.
#[derive(Default)]
pub struct NullSink;

impl ViewSink for NullSink {
    fn show_products(&mut self, _products: &[Product]) {}
    fn show_controls(&mut self, _controls: &[PageControl]) {}
}

/// Sink that records publish events, for testing.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<String>,
}

impl ViewSink for RecordingSink {
    fn show_products(&mut self, products: &[Product]) {
        self.events.push(format!("products:{}", products.len()));
    }

    fn show_controls(&mut self, controls: &[PageControl]) {
        self.events.push(format!("controls:{}", controls.len()));
    }
}

pub struct CatalogView<A, C, K, S> {
    store: ProductStore<A, C, K>,
    sink: S,
    criteria: FilterCriteria,
    page: usize,
    page_size: usize,
}

impl<A, C, K, S> CatalogView<A, C, K, S>
where
    A: ProductApi,
    C: CatalogCache,
    K: Clock,
    S: ViewSink,
{
    pub fn new(store: ProductStore<A, C, K>, sink: S, page_size: usize) -> Self {
        Self {
            store,
            sink,
            criteria: FilterCriteria::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Loads the store. Does not publish: the first render is the
    /// client's explicit call, the way an app shell renders once after
    /// boot.
    pub async fn initialize(&mut self) -> InitSource {
        self.store.initialize().await
    }

    pub fn store(&self) -> &ProductStore<A, C, K> {
        &self.store
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Recomputes the current view without publishing it.
    pub fn state(&self) -> ViewState {
        let filtered = filter::apply(self.store.products(), &self.criteria);
        let window = page::paginate(filtered.len(), self.page_size, self.page);
        let controls = page::controls(&window);
        ViewState {
            products: window.slice(&filtered).to_vec(),
            window,
            controls,
        }
    }

    /// Recomputes and publishes the current view.
    pub fn render(&mut self) {
        let state = self.state();
        self.sink.show_products(&state.products);
        self.sink.show_controls(&state.controls);
    }

    /// Changing what is filtered resets the view to page 1.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.page = 1;
        self.render();
    }

    /// Changing the page leaves the criteria untouched.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
        self.render();
    }

    /// One-shot navigation: criteria and page together, one publish.
    /// Interactive clients use `set_criteria`/`set_page`; batch clients
    /// land on a fully specified view in a single step.
    pub fn navigate(&mut self, criteria: FilterCriteria, page: usize) {
        self.criteria = criteria;
        self.page = page.max(1);
        self.render();
    }

    pub async fn create(&mut self, draft: ProductDraft) -> Result<Product> {
        let created = self.store.create(draft).await?;
        self.render();
        Ok(created)
    }

    pub async fn update(&mut self, id: &ProductId, draft: ProductDraft) -> Result<Product> {
        let updated = self.store.update(id, draft).await?;
        self.render();
        Ok(updated)
    }

    pub async fn delete(&mut self, id: &ProductId) -> Result<Product> {
        let removed = self.store.delete(id).await?;
        self.render();
        Ok(removed)
    }

    pub async fn refresh(&mut self) -> Result<usize> {
        let count = self.store.refresh().await?;
        self.render();
        Ok(count)
    }
}
