use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned product identifier. Opaque: some backends hand out
/// UUIDs, others plain integers, so we keep the raw string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: f64,
    /// Discount percentage, 0.1..=100
    pub discount: f64,
    pub category: String,
    /// Image URL
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Builds a product from a validated draft, with both timestamps set
    /// to `at`. Used when the server assigns the id but no metadata.
    pub fn from_draft(id: ProductId, draft: ProductDraft, at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            price: draft.price,
            discount: draft.discount,
            category: draft.category,
            image: draft.image,
            created_at: at,
            updated_at: at,
        }
    }
}

/// A validated, typed product submission. Produced only by
/// [`crate::validate::validate`]; raw user input lives in [`ProductForm`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub discount: f64,
    pub category: String,
    pub image: String,
}

/// Raw form fields as the user typed them. Price and discount stay strings
/// until validation parses them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub discount: String,
    pub category: String,
    pub image: String,
}

impl ProductForm {
    /// Pre-fills a form from an existing product, the way an edit dialog
    /// would.
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            discount: product.discount.to_string(),
            category: product.category.clone(),
            image: product.image.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    PriceAsc,
    PriceDesc,
    Newest,
    Oldest,
}

/// What the list view is narrowed by. Every field is independently
/// optional; an absent field skips that stage entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Exact, case-sensitive category match
    pub category: Option<String>,
    /// Case-insensitive substring over title or description
    pub search: Option<String>,
    pub sort: Option<SortMode>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.search.is_none() && self.sort.is_none()
    }
}
