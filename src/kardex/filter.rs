//! The filter/sort pipeline for the catalog view.
//!
//! Pure: the input list is never mutated, and applying the same criteria
//! twice yields the same result. Stages run in a fixed order — category,
//! then search, then sort — and an absent criterion skips its stage.

use crate::model::{FilterCriteria, Product, SortMode};

pub fn apply(products: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    let mut filtered: Vec<Product> = products.to_vec();

    if let Some(category) = &criteria.category {
        filtered.retain(|p| &p.category == category);
    }

    if let Some(term) = &criteria.search {
        let term = term.to_lowercase();
        filtered.retain(|p| {
            p.title.to_lowercase().contains(&term) || p.description.to_lowercase().contains(&term)
        });
    }

    match criteria.sort {
        // sort_by is stable, so equal keys keep their incoming order
        Some(SortMode::PriceAsc) => filtered.sort_by(|a, b| a.price.total_cmp(&b.price)),
        Some(SortMode::PriceDesc) => filtered.sort_by(|a, b| b.price.total_cmp(&a.price)),
        Some(SortMode::Newest) => filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        Some(SortMode::Oldest) => filtered.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        None => {}
    }

    filtered
}
