use contracts::dashboards::d300_stock::{
    MonthlyStockResponse, StockByCategoryResponse, StockCoverageResponse,
};
use contracts::metrics::{StockByCategory, StockByMonth, StockCoverage};
use leptos::prelude::*;

use crate::shared::components::table::{
    format_days, format_money, format_number_int, BreakdownTable, Column,
};
use crate::shared::components::MetricFrame;
use crate::shared::metric_source::use_metric_context;

fn monthly_rows(data: &MonthlyStockResponse) -> Vec<Vec<String>> {
    data.months
        .iter()
        .zip(&data.stock_quantities)
        .zip(&data.stock_values)
        .map(|((month, quantity), value)| {
            vec![
                month.clone(),
                format_number_int(*quantity as f64),
                format_money(*value),
            ]
        })
        .collect()
}

fn category_rows(data: &StockByCategoryResponse) -> Vec<Vec<String>> {
    data.categories
        .iter()
        .map(|c| {
            vec![
                c.category.clone(),
                format_number_int(c.stock_quantity as f64),
                format_money(c.stock_value),
            ]
        })
        .collect()
}

fn coverage_rows(data: &StockCoverageResponse) -> Vec<Vec<String>> {
    data.products
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                p.code.clone(),
                format_number_int(p.stock_quantity as f64),
                format_number_int(p.quantity_sold as f64),
                format_days(p.coverage_days),
            ]
        })
        .collect()
}

#[component]
pub fn StockDashboard() -> impl IntoView {
    let by_month = use_metric_context::<StockByMonth>();
    let by_category = use_metric_context::<StockByCategory>();
    let coverage = use_metric_context::<StockCoverage>();

    view! {
        <div class="dashboard dashboard--stock">
            <div class="dashboard__grid">
                <MetricFrame
                    title="Stock par mois"
                    state=by_month.state()
                    render=|data: MonthlyStockResponse| view! {
                        <BreakdownTable
                            columns=vec![Column::text("Mois"), Column::number("Quantité"), Column::number("Valeur")]
                            rows=monthly_rows(&data)
                        />
                    }
                />
                <MetricFrame
                    title="Stock par catégorie"
                    state=by_category.state()
                    render=|data: StockByCategoryResponse| view! {
                        <BreakdownTable
                            columns=vec![Column::text("Catégorie"), Column::number("Quantité"), Column::number("Valeur")]
                            rows=category_rows(&data)
                        />
                    }
                />
            </div>

            <MetricFrame
                title="Couverture de stock"
                state=coverage.state()
                render=|data: StockCoverageResponse| view! {
                    <BreakdownTable
                        columns=vec![
                            Column::text("Produit"),
                            Column::text("EAN-13"),
                            Column::number("Stock"),
                            Column::number("Vendu"),
                            Column::number("Couverture"),
                        ]
                        rows=coverage_rows(&data)
                    />
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d300_stock::StockCoverageRow;

    #[test]
    fn test_coverage_without_sales() {
        let data = StockCoverageResponse {
            products: vec![StockCoverageRow {
                name: "Pansements".to_string(),
                code: "3401000000007".to_string(),
                stock_quantity: 40,
                quantity_sold: 0,
                coverage_days: None,
            }],
        };
        assert_eq!(coverage_rows(&data)[0][4], "—");
    }

    #[test]
    fn test_monthly_stock_rows() {
        let data = MonthlyStockResponse {
            months: vec!["2024-05".to_string()],
            stock_quantities: vec![1500],
            stock_values: vec![7300.25],
        };
        assert_eq!(
            monthly_rows(&data),
            vec![vec![
                "2024-05".to_string(),
                "1\u{202f}500".to_string(),
                "7\u{202f}300,25\u{a0}€".to_string(),
            ]]
        );
    }
}
