pub mod ui;

use contracts::metrics::{
    PeakSales, SalesByCategory, SalesByLabDistributor, SalesByMonth, SalesByPharmacy,
    SalesByUniverse, SalesSummary,
};
use leptos::prelude::Signal;

use crate::shared::metric_source::provide_metric;

/// Start every sales metric; `skip` is true while the tab is hidden
pub fn provide_metrics(skip: Signal<bool>) {
    provide_metric::<SalesSummary>(skip);
    provide_metric::<SalesByMonth>(skip);
    provide_metric::<SalesByCategory>(skip);
    provide_metric::<SalesByUniverse>(skip);
    provide_metric::<SalesByLabDistributor>(skip);
    provide_metric::<SalesByPharmacy>(skip);
    provide_metric::<PeakSales>(skip);
}
