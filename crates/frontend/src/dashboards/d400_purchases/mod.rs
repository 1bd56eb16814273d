pub mod ui;

use contracts::metrics::{PurchasesByCategory, PurchasesByLabDistributor, PurchasesByMonth};
use leptos::prelude::Signal;

use crate::shared::metric_source::provide_metric;

pub fn provide_metrics(skip: Signal<bool>) {
    provide_metric::<PurchasesByMonth>(skip);
    provide_metric::<PurchasesByCategory>(skip);
    provide_metric::<PurchasesByLabDistributor>(skip);
}
