//! Field-level validation for product forms.
//!
//! Rules are pure and independent of each other: every field is checked on
//! its own, all failures are collected, and a submission goes through only
//! when the whole form is clean. Nothing here ever touches the network or
//! the store.

use crate::model::{ProductDraft, ProductForm};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(https?|ftp)://\S+$").expect("url pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Price,
    Discount,
    Category,
    Image,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Price => "price",
            Field::Discount => "discount",
            Field::Category => "category",
            Field::Image => "image",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn check_title(value: &str) -> Option<FieldError> {
    if value.trim().chars().count() < 2 {
        return Some(FieldError::new(
            Field::Title,
            "Title must be at least 2 characters",
        ));
    }
    None
}

pub fn check_description(value: &str) -> Option<FieldError> {
    if value.trim().is_empty() {
        return Some(FieldError::new(
            Field::Description,
            "Description must not be empty",
        ));
    }
    None
}

pub fn check_category(value: &str) -> Option<FieldError> {
    if value.trim().is_empty() {
        return Some(FieldError::new(Field::Category, "Choose a product category"));
    }
    None
}

pub fn check_price(value: &str) -> Option<FieldError> {
    let raw = value.trim();
    if raw.is_empty() {
        return Some(FieldError::new(Field::Price, "Enter the product price"));
    }
    match raw.parse::<f64>() {
        Ok(v) if v >= 0.1 => None,
        _ => Some(FieldError::new(
            Field::Price,
            "Price must be greater than 0",
        )),
    }
}

pub fn check_discount(value: &str) -> Option<FieldError> {
    let raw = value.trim();
    if raw.is_empty() {
        return Some(FieldError::new(Field::Discount, "Enter the discount amount"));
    }
    match raw.parse::<f64>() {
        Ok(v) if (0.1..=100.0).contains(&v) => None,
        _ => Some(FieldError::new(
            Field::Discount,
            "Discount must be between 0.1 and 100%",
        )),
    }
}

pub fn check_image(value: &str) -> Option<FieldError> {
    if !URL_PATTERN.is_match(value.trim()) {
        return Some(FieldError::new(
            Field::Image,
            "Invalid URL format (https://example.com)",
        ));
    }
    None
}

/// Validates every field and collects all failures. Returns the typed
/// draft only when the whole form passes.
pub fn validate(form: &ProductForm) -> Result<ProductDraft, Vec<FieldError>> {
    let errors: Vec<FieldError> = [
        check_title(&form.title),
        check_description(&form.description),
        check_price(&form.price),
        check_discount(&form.discount),
        check_category(&form.category),
        check_image(&form.image),
    ]
    .into_iter()
    .flatten()
    .collect();

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ProductDraft {
        title: form.title.trim().to_string(),
        description: form.description.trim().to_string(),
        // Parses are infallible here: the checks above already accepted them
        price: form.price.trim().parse().unwrap_or_default(),
        discount: form.discount.trim().parse().unwrap_or_default(),
        category: form.category.trim().to_string(),
        image: form.image.trim().to_string(),
    })
}
