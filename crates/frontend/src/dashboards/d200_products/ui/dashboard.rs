use contracts::dashboards::d100_sales::MonthlySalesResponse;
use contracts::dashboards::d200_products::{PriceAnomaliesResponse, ProductRankingResponse};
use contracts::metrics::{PriceAnomalies, ProductSalesByMonth, TopProducts, WorstProducts};
use leptos::prelude::*;

use crate::dashboards::d100_sales::ui::dashboard::monthly_rows;
use crate::shared::components::table::{
    format_money, format_number_int, format_percent, BreakdownTable, Column,
};
use crate::shared::components::MetricFrame;
use crate::shared::metric_source::use_metric_context;

fn ranking_columns() -> Vec<Column> {
    vec![
        Column::text("Produit"),
        Column::text("EAN-13"),
        Column::number("Quantité"),
        Column::number("CA TTC"),
        Column::number("Marge"),
    ]
}

fn ranking_rows(data: &ProductRankingResponse) -> Vec<Vec<String>> {
    data.products
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                p.code.clone(),
                format_number_int(p.quantity as f64),
                format_money(p.revenue),
                format_money(p.margin),
            ]
        })
        .collect()
}

fn anomaly_rows(data: &PriceAnomaliesResponse) -> Vec<Vec<String>> {
    data.anomalies
        .iter()
        .map(|a| {
            vec![
                a.name.clone(),
                a.code.clone(),
                format_money(a.min_price),
                format_money(a.average_price),
                format_money(a.max_price),
                format_percent(a.deviation * 100.0),
            ]
        })
        .collect()
}

#[component]
pub fn ProductsDashboard() -> impl IntoView {
    let top = use_metric_context::<TopProducts>();
    let worst = use_metric_context::<WorstProducts>();
    let product_by_month = use_metric_context::<ProductSalesByMonth>();
    let anomalies = use_metric_context::<PriceAnomalies>();

    view! {
        <div class="dashboard dashboard--products">
            <div class="dashboard__grid">
                <MetricFrame
                    title="Meilleures ventes"
                    state=top.state()
                    render=|data: ProductRankingResponse| view! {
                        <BreakdownTable columns=ranking_columns() rows=ranking_rows(&data) />
                    }
                />
                <MetricFrame
                    title="Plus faibles ventes"
                    state=worst.state()
                    render=|data: ProductRankingResponse| view! {
                        <BreakdownTable columns=ranking_columns() rows=ranking_rows(&data) />
                    }
                />
            </div>

            <MetricFrame
                title="Évolution mensuelle du produit"
                state=product_by_month.state()
                skipped_hint="Sélectionnez un seul produit pour afficher son évolution mensuelle."
                render=|data: MonthlySalesResponse| view! {
                    <BreakdownTable
                        columns=vec![
                            Column::text("Mois"),
                            Column::number("Quantité"),
                            Column::number("CA TTC"),
                            Column::number("Marge"),
                        ]
                        rows=monthly_rows(&data)
                    />
                }
            />

            <MetricFrame
                title="Anomalies de prix"
                state=anomalies.state()
                render=|data: PriceAnomaliesResponse| view! {
                    <BreakdownTable
                        columns=vec![
                            Column::text("Produit"),
                            Column::text("EAN-13"),
                            Column::number("Prix min"),
                            Column::number("Prix moyen"),
                            Column::number("Prix max"),
                            Column::number("Écart"),
                        ]
                        rows=anomaly_rows(&data)
                    />
                }
            />
        </div>
    }
}
