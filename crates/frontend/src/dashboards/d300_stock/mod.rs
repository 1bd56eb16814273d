pub mod ui;

use contracts::metrics::{StockByCategory, StockByMonth, StockCoverage};
use leptos::prelude::Signal;

use crate::shared::metric_source::provide_metric;

pub fn provide_metrics(skip: Signal<bool>) {
    provide_metric::<StockByMonth>(skip);
    provide_metric::<StockByCategory>(skip);
    provide_metric::<StockCoverage>(skip);
}
