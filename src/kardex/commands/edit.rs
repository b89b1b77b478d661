use crate::cache::CatalogCache;
use crate::commands::{CmdMessage, CmdResult};
use crate::model::{ProductForm, ProductId};
use crate::remote::ProductApi;
use crate::store::Clock;
use crate::validate;
use crate::view::{CatalogView, ViewSink};

/// Partial field overrides for an edit. Absent fields keep the stored
/// value, the way an edit dialog pre-fills from the current record.
#[derive(Debug, Clone, Default)]
pub struct FieldOverrides {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub discount: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
}

impl FieldOverrides {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.discount.is_none()
            && self.category.is_none()
            && self.image.is_none()
    }

    fn apply_to(&self, form: &mut ProductForm) {
        if let Some(v) = &self.title {
            form.title = v.clone();
        }
        if let Some(v) = &self.description {
            form.description = v.clone();
        }
        if let Some(v) = &self.price {
            form.price = v.clone();
        }
        if let Some(v) = &self.discount {
            form.discount = v.clone();
        }
        if let Some(v) = &self.category {
            form.category = v.clone();
        }
        if let Some(v) = &self.image {
            form.image = v.clone();
        }
    }
}

/// Merges the overrides over the stored record, re-validates the whole
/// form, and sends the update.
pub async fn run<A, C, K, S>(
    view: &mut CatalogView<A, C, K, S>,
    id: &ProductId,
    overrides: &FieldOverrides,
) -> CmdResult
where
    A: ProductApi,
    C: CatalogCache,
    K: Clock,
    S: ViewSink,
{
    let mut result = CmdResult::default();

    let Some(current) = view.store().get(id) else {
        result.add_message(CmdMessage::error(format!("Product not found: {id}")));
        return result;
    };

    if overrides.is_empty() {
        result.add_message(CmdMessage::info("Nothing to change."));
        return result;
    }

    let mut form = ProductForm::from_product(current);
    overrides.apply_to(&mut form);

    let draft = match validate::validate(&form) {
        Ok(draft) => draft,
        Err(errors) => {
            for error in errors {
                result.add_message(CmdMessage::error(error.to_string()));
            }
            return result;
        }
    };

    match view.update(id, draft).await {
        Ok(product) => {
            result.add_message(CmdMessage::success(format!(
                "Product updated: {} ({})",
                product.title, product.id
            )));
            result.affected_products.push(product);
        }
        Err(e) => {
            result.add_message(CmdMessage::error(format!("Could not save product: {e}")));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{sample_product, seeded_view, test_now};

    fn title_override(title: &str) -> FieldOverrides {
        FieldOverrides {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn untouched_fields_keep_their_stored_values() {
        let original = sample_product("1", "Lamp", 30.0);
        let mut view = seeded_view(vec![original.clone()]).await;

        let result = run(&mut view, &original.id, &title_override("Lamp v2")).await;
        assert!(!result.has_errors());

        let updated = view.store().get(&original.id).unwrap();
        assert_eq!(updated.title, "Lamp v2");
        assert_eq!(updated.price, original.price);
        assert_eq!(updated.category, original.category);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.updated_at, test_now());
    }

    #[tokio::test]
    async fn an_unknown_id_is_reported_without_a_request() {
        let mut view = seeded_view(Vec::new()).await;
        let result = run(&mut view, &ProductId::new("ghost"), &title_override("X")).await;
        assert!(result.has_errors());
        assert_eq!(result.messages[0].content, "Product not found: ghost");
        assert_eq!(view.store().api().calls(), vec!["GET"]);
    }

    #[tokio::test]
    async fn empty_overrides_are_a_noop() {
        let original = sample_product("1", "Lamp", 30.0);
        let mut view = seeded_view(vec![original.clone()]).await;
        let result = run(&mut view, &original.id, &FieldOverrides::default()).await;
        assert_eq!(result.messages[0].content, "Nothing to change.");
        assert_eq!(view.store().api().calls(), vec!["GET"]);
    }

    #[tokio::test]
    async fn a_bad_override_blocks_the_submission() {
        let original = sample_product("1", "Lamp", 30.0);
        let mut view = seeded_view(vec![original.clone()]).await;

        let overrides = FieldOverrides {
            price: Some("free".into()),
            ..Default::default()
        };
        let result = run(&mut view, &original.id, &overrides).await;
        assert!(result.has_errors());
        assert_eq!(
            result.messages[0].content,
            "price: Price must be greater than 0"
        );
        // no PUT went out, the record is untouched
        assert_eq!(view.store().api().calls(), vec!["GET"]);
        assert_eq!(view.store().get(&original.id).unwrap(), &original);
    }
}
