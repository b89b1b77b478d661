use crate::cache::CatalogCache;
use crate::commands::{CmdMessage, CmdResult};
use crate::model::ProductForm;
use crate::remote::ProductApi;
use crate::store::Clock;
use crate::validate;
use crate::view::{CatalogView, ViewSink};

/// Validates the form and creates the product remotely. A form that fails
/// validation never reaches the network.
pub async fn run<A, C, K, S>(view: &mut CatalogView<A, C, K, S>, form: &ProductForm) -> CmdResult
where
    A: ProductApi,
    C: CatalogCache,
    K: Clock,
    S: ViewSink,
{
    let mut result = CmdResult::default();

    let draft = match validate::validate(form) {
        Ok(draft) => draft,
        Err(errors) => {
            for error in errors {
                result.add_message(CmdMessage::error(error.to_string()));
            }
            return result;
        }
    };

    match view.create(draft).await {
        Ok(product) => {
            result.add_message(CmdMessage::success(format!(
                "Product created: {} ({})",
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
    use crate::commands::testing::{seeded_view, valid_form};
    use crate::commands::MessageLevel;

    #[tokio::test]
    async fn creates_a_product_from_a_valid_form() {
        let mut view = seeded_view(Vec::new()).await;
        let result = run(&mut view, &valid_form()).await;

        assert!(!result.has_errors());
        assert_eq!(result.affected_products.len(), 1);
        assert_eq!(view.store().len(), 1);
        assert!(result.messages[0].content.starts_with("Product created:"));
    }

    #[tokio::test]
    async fn an_invalid_form_is_blocked_before_the_network() {
        let mut view = seeded_view(Vec::new()).await;
        let mut form = valid_form();
        form.discount = "150".into();

        let result = run(&mut view, &form).await;
        assert!(result.has_errors());
        assert_eq!(
            result.messages[0].content,
            "discount: Discount must be between 0.1 and 100%"
        );
        // only the initial GET; no POST went out
        assert_eq!(view.store().api().calls(), vec!["GET"]);
        assert!(view.store().is_empty());
    }

    #[tokio::test]
    async fn a_server_error_leaves_the_collection_unchanged() {
        let mut view = seeded_view(Vec::new()).await;
        view.store().api().fail_with_status(500);

        let result = run(&mut view, &valid_form()).await;
        assert!(result.has_errors());
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(result.messages[0]
            .content
            .starts_with("Could not save product:"));
        assert!(view.store().is_empty());
        assert!(result.affected_products.is_empty());
    }
}
