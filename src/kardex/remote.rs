//! Remote catalog API client.
//!
//! [`ProductApi`] is the seam between the store and the wire: production
//! code talks HTTP through [`HttpApi`], tests swap in [`InMemoryApi`]. The
//! wire shape is the backend's camelCase one (`discountPercentage`,
//! `thumbnail`, nested `meta` timestamps) and is mapped field-by-field to
//! [`Product`] at this boundary so nothing else in the crate sees it.

use crate::error::{KardexError, Result};
use crate::model::{Product, ProductDraft, ProductId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use uuid::Uuid;

/// What a PUT came back with. Some backends return the updated record,
/// others answer `204 No Content` and expect the client to keep its own
/// merged copy.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateReply {
    Replaced(Product),
    NoContent,
}

#[async_trait]
pub trait ProductApi {
    /// GET the full product list.
    async fn fetch_all(&self) -> Result<Vec<Product>>;

    /// POST a new product; the server assigns the id.
    async fn create(&self, draft: &ProductDraft) -> Result<Product>;

    /// PUT the full replacement record for `product.id`.
    async fn update(&self, product: &Product) -> Result<UpdateReply>;

    /// DELETE by id.
    async fn delete(&self, id: &ProductId) -> Result<()>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMeta {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireProduct {
    id: ProductId,
    title: String,
    description: String,
    price: f64,
    discount_percentage: f64,
    category: String,
    thumbnail: String,
    meta: WireMeta,
}

impl From<WireProduct> for Product {
    fn from(wire: WireProduct) -> Self {
        Product {
            id: wire.id,
            title: wire.title,
            description: wire.description,
            price: wire.price,
            discount: wire.discount_percentage,
            category: wire.category,
            image: wire.thumbnail,
            created_at: wire.meta.created_at,
            updated_at: wire.meta.updated_at,
        }
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a ProductId>,
    title: &'a str,
    description: &'a str,
    price: f64,
    discount_percentage: f64,
    category: &'a str,
    thumbnail: &'a str,
    meta: SubmitMeta,
}

impl<'a> SubmitBody<'a> {
    fn for_create(draft: &'a ProductDraft) -> Self {
        Self {
            id: None,
            title: &draft.title,
            description: &draft.description,
            price: draft.price,
            discount_percentage: draft.discount,
            category: &draft.category,
            thumbnail: &draft.image,
            meta: SubmitMeta::default(),
        }
    }

    fn for_update(product: &'a Product) -> Self {
        Self {
            id: Some(&product.id),
            title: &product.title,
            description: &product.description,
            price: product.price,
            discount_percentage: product.discount,
            category: &product.category,
            thumbnail: &product.image,
            meta: SubmitMeta {
                created_at: Some(product.created_at),
                updated_at: Some(product.updated_at),
            },
        }
    }
}

/// Production client. Every request carries the configured timeout; a
/// timeout surfaces as the same Network failure as any other transport
/// error.
pub struct HttpApi {
    base_url: String,
    http: Client,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("kardex/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn item_url(&self, id: &ProductId) -> String {
        format!("{}/{}", self.base_url, id)
    }

    async fn checked(response: Response) -> Result<Response> {
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(KardexError::Api {
                status: status.as_u16(),
                detail,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ProductApi for HttpApi {
    async fn fetch_all(&self) -> Result<Vec<Product>> {
        let response = Self::checked(self.http.get(&self.base_url).send().await?).await?;
        let wire: Vec<WireProduct> = response.json().await?;
        Ok(wire.into_iter().map(Product::from).collect())
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product> {
        let body = SubmitBody::for_create(draft);
        let response =
            Self::checked(self.http.post(&self.base_url).json(&body).send().await?).await?;
        let wire: WireProduct = response.json().await?;
        Ok(wire.into())
    }

    async fn update(&self, product: &Product) -> Result<UpdateReply> {
        let body = SubmitBody::for_update(product);
        let request = self.http.put(self.item_url(&product.id)).json(&body);
        let response = Self::checked(request.send().await?).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(UpdateReply::NoContent);
        }
        let wire: WireProduct = response.json().await?;
        Ok(UpdateReply::Replaced(wire.into()))
    }

    async fn delete(&self, id: &ProductId) -> Result<()> {
        Self::checked(self.http.delete(self.item_url(id)).send().await?).await?;
        Ok(())
    }
}

#[derive(Default)]
struct ApiState {
    products: Vec<Product>,
    fault_status: Option<u16>,
    reply_no_content: bool,
    calls: Vec<&'static str>,
}

/// In-memory stand-in for the remote backend, for testing. Assigns UUID
/// ids on create and keeps a call log so tests can assert which verbs ran.
#[derive(Default)]
pub struct InMemoryApi {
    state: Mutex<ApiState>,
}

impl InMemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(products: Vec<Product>) -> Self {
        let api = Self::default();
        api.guard().products = products;
        api
    }

    /// Every subsequent call answers with this HTTP status.
    pub fn fail_with_status(&self, status: u16) {
        self.guard().fault_status = Some(status);
    }

    pub fn clear_fault(&self) {
        self.guard().fault_status = None;
    }

    /// Make PUT answer `204 No Content` instead of echoing the record.
    pub fn reply_no_content_on_update(&self) {
        self.guard().reply_no_content = true;
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.guard().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.guard().calls.len()
    }

    /// What the fake backend currently holds.
    pub fn remote_products(&self) -> Vec<Product> {
        self.guard().products.clone()
    }

    fn guard(&self) -> MutexGuard<'_, ApiState> {
        self.state.lock().expect("api state lock poisoned")
    }

    fn answer(state: &mut ApiState, verb: &'static str) -> Result<()> {
        state.calls.push(verb);
        if let Some(status) = state.fault_status {
            return Err(KardexError::Api {
                status,
                detail: "injected failure".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ProductApi for InMemoryApi {
    async fn fetch_all(&self) -> Result<Vec<Product>> {
        let mut state = self.guard();
        Self::answer(&mut state, "GET")?;
        Ok(state.products.clone())
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product> {
        let mut state = self.guard();
        Self::answer(&mut state, "POST")?;
        let product = Product::from_draft(
            ProductId::new(Uuid::new_v4().to_string()),
            draft.clone(),
            Utc::now(),
        );
        state.products.push(product.clone());
        Ok(product)
    }

    async fn update(&self, product: &Product) -> Result<UpdateReply> {
        let mut state = self.guard();
        Self::answer(&mut state, "PUT")?;
        let slot = state
            .products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or(KardexError::Api {
                status: 404,
                detail: "no such product".into(),
            })?;
        *slot = product.clone();
        if state.reply_no_content {
            Ok(UpdateReply::NoContent)
        } else {
            Ok(UpdateReply::Replaced(product.clone()))
        }
    }

    async fn delete(&self, id: &ProductId) -> Result<()> {
        let mut state = self.guard();
        Self::answer(&mut state, "DELETE")?;
        state.products.retain(|p| &p.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_products_map_field_for_field() {
        let raw = json!({
            "id": "42",
            "title": "Kettle",
            "description": "1.7 litres",
            "price": 39.0,
            "discountPercentage": 15.0,
            "category": "kitchen",
            "thumbnail": "https://example.com/kettle.jpg",
            "meta": {
                "createdAt": "2025-05-01T08:00:00Z",
                "updatedAt": "2025-05-02T08:00:00Z"
            }
        });
        let wire: WireProduct = serde_json::from_value(raw).unwrap();
        let product = Product::from(wire);
        assert_eq!(product.id, ProductId::new("42"));
        assert_eq!(product.discount, 15.0);
        assert_eq!(product.image, "https://example.com/kettle.jpg");
        assert!(product.updated_at > product.created_at);
    }

    #[test]
    fn create_body_has_no_id_and_an_empty_meta() {
        let draft = ProductDraft {
            title: "Kettle".into(),
            description: "1.7 litres".into(),
            price: 39.0,
            discount: 15.0,
            category: "kitchen".into(),
            image: "https://example.com/kettle.jpg".into(),
        };
        let value = serde_json::to_value(SubmitBody::for_create(&draft)).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["discountPercentage"], json!(15.0));
        assert_eq!(value["thumbnail"], json!("https://example.com/kettle.jpg"));
        assert_eq!(value["meta"], json!({}));
    }

    #[test]
    fn update_body_carries_id_and_both_timestamps() {
        let draft = ProductDraft {
            title: "Kettle".into(),
            description: "1.7 litres".into(),
            price: 39.0,
            discount: 15.0,
            category: "kitchen".into(),
            image: "https://example.com/kettle.jpg".into(),
        };
        let created = "2025-05-01T08:00:00Z".parse().unwrap();
        let mut product = Product::from_draft(ProductId::new("42"), draft, created);
        product.updated_at = "2025-05-03T08:00:00Z".parse().unwrap();

        let value = serde_json::to_value(SubmitBody::for_update(&product)).unwrap();
        assert_eq!(value["id"], json!("42"));
        assert_eq!(value["meta"]["createdAt"], json!("2025-05-01T08:00:00Z"));
        assert_eq!(value["meta"]["updatedAt"], json!("2025-05-03T08:00:00Z"));
    }
}
