use crate::cache::CatalogCache;
use crate::commands::{CmdMessage, CmdResult};
use crate::confirm::ConfirmGate;
use crate::error::Result;
use crate::model::ProductId;
use crate::remote::ProductApi;
use crate::store::Clock;
use crate::view::{CatalogView, ViewSink};

/// Deletes a product after a yes/no confirmation. `skip_confirm` bypasses
/// the gate for scripted use.
pub async fn run<A, C, K, S, G>(
    view: &mut CatalogView<A, C, K, S>,
    gate: &mut G,
    id: &ProductId,
    skip_confirm: bool,
) -> Result<CmdResult>
where
    A: ProductApi,
    C: CatalogCache,
    K: Clock,
    S: ViewSink,
    G: ConfirmGate,
{
    let mut result = CmdResult::default();

    let Some(product) = view.store().get(id) else {
        result.add_message(CmdMessage::error(format!("Product not found: {id}")));
        return Ok(result);
    };
    let title = product.title.clone();

    if !skip_confirm {
        let message = format!("Delete \"{title}\"? This cannot be undone.");
        if !gate.confirm(&message)? {
            result.add_message(CmdMessage::info("Operation cancelled."));
            return Ok(result);
        }
    }

    match view.delete(id).await {
        Ok(removed) => {
            result.add_message(CmdMessage::success(format!(
                "Product deleted: {} ({})",
                removed.title, removed.id
            )));
            result.affected_products.push(removed);
        }
        Err(e) => {
            result.add_message(CmdMessage::error(format!("Could not delete product: {e}")));
        }
    }
    Ok(result)
}
