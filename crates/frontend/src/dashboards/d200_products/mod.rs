pub mod ui;

use contracts::metrics::{PriceAnomalies, ProductSalesByMonth, TopProducts, WorstProducts};
use leptos::prelude::*;

use crate::shared::filters::use_filters;
use crate::shared::metric_source::provide_metric;

/// Start every product metric; `skip` is true while the tab is hidden.
///
/// The monthly series of one product is skipped unless exactly one product
/// is selected.
pub fn provide_metrics(skip: Signal<bool>) {
    let filters = use_filters().signal();

    provide_metric::<TopProducts>(skip);
    provide_metric::<WorstProducts>(skip);
    provide_metric::<PriceAnomalies>(skip);

    let no_single_product = Memo::new(move |_| filters.with(|f| f.single_product().is_none()));
    provide_metric::<ProductSalesByMonth>(Signal::derive(move || {
        skip.get() || no_single_product.get()
    }));
}
