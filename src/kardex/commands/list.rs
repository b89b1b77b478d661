use crate::cache::CatalogCache;
use crate::commands::{CmdMessage, CmdResult};
use crate::model::FilterCriteria;
use crate::remote::ProductApi;
use crate::store::Clock;
use crate::view::{CatalogView, ViewSink};

/// Navigates the view to the requested criteria and page; the sink
/// receives the slice and the page controls.
pub fn run<A, C, K, S>(
    view: &mut CatalogView<A, C, K, S>,
    criteria: FilterCriteria,
    page: usize,
) -> CmdResult
where
    A: ProductApi,
    C: CatalogCache,
    K: Clock,
    S: ViewSink,
{
    view.navigate(criteria, page);

    let mut result = CmdResult::default();
    let state = view.state();
    if state.window.total_items == 0 {
        if view.criteria().is_empty() {
            result.add_message(CmdMessage::info("The catalog is empty."));
        } else {
            result.add_message(CmdMessage::info("No products match the current filters."));
        }
    } else if page > state.window.total_pages {
        result.add_message(CmdMessage::warning(format!(
            "Page {page} is out of range; showing page {} of {}.",
            state.window.page, state.window.total_pages
        )));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{sample_product, seeded_view};
    use crate::model::SortMode;

    #[tokio::test]
    async fn publishes_the_requested_slice() {
        let products = (1..=14)
            .map(|n| sample_product(&n.to_string(), &format!("P{n}"), n as f64))
            .collect();
        let mut view = seeded_view(products).await;

        let result = run(&mut view, FilterCriteria::default(), 2);
        assert!(result.messages.is_empty());
        assert_eq!(view.sink().events, vec!["products:4", "controls:4"]);
    }

    #[tokio::test]
    async fn an_out_of_range_page_clamps_with_a_warning() {
        let products = (1..=14)
            .map(|n| sample_product(&n.to_string(), &format!("P{n}"), n as f64))
            .collect();
        let mut view = seeded_view(products).await;

        let result = run(&mut view, FilterCriteria::default(), 9);
        assert_eq!(
            result.messages[0].content,
            "Page 9 is out of range; showing page 2 of 2."
        );
        assert_eq!(view.state().window.page, 2);
    }

    #[tokio::test]
    async fn reports_an_empty_catalog() {
        let mut view = seeded_view(Vec::new()).await;
        let result = run(&mut view, FilterCriteria::default(), 1);
        assert_eq!(result.messages[0].content, "The catalog is empty.");
    }

    #[tokio::test]
    async fn reports_when_filters_match_nothing() {
        let mut view = seeded_view(vec![sample_product("1", "Lamp", 20.0)]).await;
        let criteria = FilterCriteria {
            search: Some("no such thing".into()),
            sort: Some(SortMode::PriceAsc),
            ..Default::default()
        };
        let result = run(&mut view, criteria, 1);
        assert_eq!(
            result.messages[0].content,
            "No products match the current filters."
        );
    }
}
