use crate::cache::CatalogCache;
use crate::commands::{CmdMessage, CmdResult};
use crate::remote::ProductApi;
use crate::store::Clock;
use crate::view::{CatalogView, ViewSink};

/// Forces a remote refetch, bypassing the cache freshness window.
pub async fn run<A, C, K, S>(view: &mut CatalogView<A, C, K, S>) -> CmdResult
where
    A: ProductApi,
    C: CatalogCache,
    K: Clock,
    S: ViewSink,
{
    let mut result = CmdResult::default();
    match view.refresh().await {
        Ok(count) => {
            let noun = if count == 1 { "product" } else { "products" };
            result.add_message(CmdMessage::success(format!(
                "Catalog refreshed: {count} {noun}."
            )));
        }
        Err(e) => {
            let hint = if e.is_retryable() {
                " Try again in a moment."
            } else {
                ""
            };
            result.add_message(CmdMessage::error(format!(
                "Could not refresh the catalog: {e}{hint}"
            )));
        }
    }
    result
}
