use contracts::dashboards::d400_purchases::{
    MonthlyPurchasesResponse, PurchasesByCategoryResponse, PurchasesByLabDistributorResponse,
};
use contracts::metrics::{PurchasesByCategory, PurchasesByLabDistributor, PurchasesByMonth};
use leptos::prelude::*;

use crate::shared::components::table::{format_money, format_number_int, BreakdownTable, Column};
use crate::shared::components::MetricFrame;
use crate::shared::metric_source::use_metric_context;

fn purchase_row(label: &str, quantity: i64, amount: f64) -> Vec<String> {
    vec![
        label.to_string(),
        format_number_int(quantity as f64),
        format_money(amount),
    ]
}

fn columns(first: &'static str) -> Vec<Column> {
    vec![
        Column::text(first),
        Column::number("Quantité"),
        Column::number("Montant HT"),
    ]
}

#[component]
pub fn PurchasesDashboard() -> impl IntoView {
    let by_month = use_metric_context::<PurchasesByMonth>();
    let by_category = use_metric_context::<PurchasesByCategory>();
    let by_lab = use_metric_context::<PurchasesByLabDistributor>();

    view! {
        <div class="dashboard dashboard--purchases">
            <MetricFrame
                title="Achats par mois"
                state=by_month.state()
                render=|data: MonthlyPurchasesResponse| {
                    let rows = data
                        .months
                        .iter()
                        .zip(&data.quantities)
                        .zip(&data.amounts)
                        .map(|((month, quantity), amount)| purchase_row(month, *quantity, *amount))
                        .collect::<Vec<_>>();
                    view! { <BreakdownTable columns=columns("Mois") rows=rows /> }
                }
            />
            <div class="dashboard__grid">
                <MetricFrame
                    title="Achats par catégorie"
                    state=by_category.state()
                    render=|data: PurchasesByCategoryResponse| {
                        let rows = data
                            .categories
                            .iter()
                            .map(|c| purchase_row(&c.category, c.quantity, c.amount))
                            .collect::<Vec<_>>();
                        view! { <BreakdownTable columns=columns("Catégorie") rows=rows /> }
                    }
                />
                <MetricFrame
                    title="Achats par laboratoire"
                    state=by_lab.state()
                    render=|data: PurchasesByLabDistributorResponse| {
                        let rows = data
                            .lab_distributors
                            .iter()
                            .map(|l| purchase_row(&l.lab_distributor, l.quantity, l.amount))
                            .collect::<Vec<_>>();
                        view! { <BreakdownTable columns=columns("Laboratoire") rows=rows /> }
                    }
                />
            </div>
        </div>
    }
}
