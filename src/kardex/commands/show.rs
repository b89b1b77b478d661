use crate::cache::CatalogCache;
use crate::commands::{CmdMessage, CmdResult};
use crate::model::ProductId;
use crate::remote::ProductApi;
use crate::store::Clock;
use crate::view::{CatalogView, ViewSink};

/// Looks up one product for detail rendering.
pub fn run<A, C, K, S>(view: &CatalogView<A, C, K, S>, id: &ProductId) -> CmdResult
where
    A: ProductApi,
    C: CatalogCache,
    K: Clock,
    S: ViewSink,
{
    match view.store().get(id) {
        Some(product) => CmdResult::default().with_affected_products(vec![product.clone()]),
        None => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::error(format!("Product not found: {id}")));
            result
        }
    }
}
