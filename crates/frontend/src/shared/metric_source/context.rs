use contracts::shared::metric::Metric;
use leptos::prelude::*;

use super::hook::{use_metric, MetricHandle};
use crate::shared::filters::use_filters;

/// Start the metric against the shared filters and expose it to descendants
pub fn provide_metric<M: Metric>(skip: Signal<bool>) -> MetricHandle<M> {
    let filters = use_filters();
    let handle = use_metric::<M>(filters.signal(), skip);
    provide_context(handle);
    handle
}

/// Access a metric provided higher up the component tree
pub fn use_metric_context<M: Metric>() -> MetricHandle<M> {
    use_context::<MetricHandle<M>>().unwrap_or_else(|| {
        panic!(
            "metric {} not provided in component tree",
            std::any::type_name::<M>()
        )
    })
}
