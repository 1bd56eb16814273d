use contracts::dashboards::d100_sales::{
    MonthlySalesResponse, PeakSalesResponse, SalesByCategoryResponse,
    SalesByLabDistributorResponse, SalesByPharmacyResponse, SalesByUniverseResponse,
};
use contracts::metrics::{
    PeakSales, SalesByCategory, SalesByLabDistributor, SalesByMonth, SalesByPharmacy,
    SalesByUniverse, SalesSummary,
};
use leptos::prelude::*;

use crate::shared::components::table::{
    format_money, format_number_int, BreakdownTable, Column,
};
use crate::shared::components::{MetricFrame, StatCard, ValueFormat};
use crate::shared::metric_source::use_metric_context;

const BREAKDOWN_COLUMNS: [Column; 4] = [
    Column::text(""),
    Column::number("Quantité"),
    Column::number("CA TTC"),
    Column::number("Marge"),
];

fn breakdown_columns(first: &'static str) -> Vec<Column> {
    let mut columns = BREAKDOWN_COLUMNS.to_vec();
    columns[0] = Column::text(first);
    columns
}

fn sales_row(label: &str, quantity: i64, revenue: f64, margin: f64) -> Vec<String> {
    vec![
        label.to_string(),
        format_number_int(quantity as f64),
        format_money(revenue),
        format_money(margin),
    ]
}

pub(crate) fn monthly_rows(data: &MonthlySalesResponse) -> Vec<Vec<String>> {
    data.months
        .iter()
        .zip(&data.quantities)
        .zip(&data.revenues)
        .zip(&data.margins)
        .map(|(((month, quantity), revenue), margin)| {
            sales_row(month, *quantity, *revenue, *margin)
        })
        .collect()
}

fn category_rows(data: &SalesByCategoryResponse) -> Vec<Vec<String>> {
    data.categories
        .iter()
        .map(|r| sales_row(&r.category, r.quantity, r.revenue, r.margin))
        .collect()
}

fn universe_rows(data: &SalesByUniverseResponse) -> Vec<Vec<String>> {
    data.universes
        .iter()
        .map(|r| sales_row(&r.universe, r.quantity, r.revenue, r.margin))
        .collect()
}

fn lab_rows(data: &SalesByLabDistributorResponse) -> Vec<Vec<String>> {
    data.lab_distributors
        .iter()
        .map(|r| sales_row(&r.lab_distributor, r.quantity, r.revenue, r.margin))
        .collect()
}

fn pharmacy_rows(data: &SalesByPharmacyResponse) -> Vec<Vec<String>> {
    data.pharmacies
        .iter()
        .map(|r| sales_row(&r.pharmacy_name, r.quantity, r.revenue, r.margin))
        .collect()
}

fn peak_rows(data: &PeakSalesResponse) -> Vec<Vec<String>> {
    data.peaks
        .iter()
        .map(|p| {
            vec![
                p.date.format("%d/%m/%Y").to_string(),
                format_number_int(p.quantity as f64),
                format_money(p.revenue),
            ]
        })
        .collect()
}

/// Sales tab: summary cards and breakdowns by month and dimension
#[component]
pub fn SalesDashboard() -> impl IntoView {
    let summary = use_metric_context::<SalesSummary>();
    let by_month = use_metric_context::<SalesByMonth>();
    let by_category = use_metric_context::<SalesByCategory>();
    let by_universe = use_metric_context::<SalesByUniverse>();
    let by_lab = use_metric_context::<SalesByLabDistributor>();
    let by_pharmacy = use_metric_context::<SalesByPharmacy>();
    let peaks = use_metric_context::<PeakSales>();

    let summary_data = summary.data();
    let summary_error = summary.error();

    view! {
        <div class="dashboard dashboard--sales">
            <div class="dashboard__cards">
                <StatCard
                    label="Chiffre d'affaires"
                    icon_name="revenue"
                    value=Signal::derive(move || summary_data.get().map(|s| s.revenue))
                    format=ValueFormat::Money
                    subtitle=summary_error
                />
                <StatCard
                    label="Marge"
                    icon_name="margin"
                    value=Signal::derive(move || summary_data.get().map(|s| s.margin))
                    format=ValueFormat::Money
                />
                <StatCard
                    label="Taux de marge"
                    icon_name="margin"
                    value=Signal::derive(move || summary_data.get().map(|s| s.margin_rate))
                    format=ValueFormat::Percent
                />
                <StatCard
                    label="Quantité vendue"
                    icon_name="sales"
                    value=Signal::derive(move || summary_data.get().map(|s| s.quantity as f64))
                    format=ValueFormat::Integer
                />
            </div>

            <MetricFrame
                title="Ventes par mois"
                state=by_month.state()
                render=|data: MonthlySalesResponse| view! {
                    <BreakdownTable columns=breakdown_columns("Mois") rows=monthly_rows(&data) />
                }
            />

            <div class="dashboard__grid">
                <MetricFrame
                    title="Par catégorie"
                    state=by_category.state()
                    render=|data: SalesByCategoryResponse| view! {
                        <BreakdownTable columns=breakdown_columns("Catégorie") rows=category_rows(&data) />
                    }
                />
                <MetricFrame
                    title="Par univers"
                    state=by_universe.state()
                    render=|data: SalesByUniverseResponse| view! {
                        <BreakdownTable columns=breakdown_columns("Univers") rows=universe_rows(&data) />
                    }
                />
                <MetricFrame
                    title="Par laboratoire"
                    state=by_lab.state()
                    render=|data: SalesByLabDistributorResponse| view! {
                        <BreakdownTable columns=breakdown_columns("Laboratoire") rows=lab_rows(&data) />
                    }
                />
                <MetricFrame
                    title="Par pharmacie"
                    state=by_pharmacy.state()
                    render=|data: SalesByPharmacyResponse| view! {
                        <BreakdownTable columns=breakdown_columns("Pharmacie") rows=pharmacy_rows(&data) />
                    }
                />
            </div>

            <MetricFrame
                title="Pics de ventes"
                state=peaks.state()
                render=|data: PeakSalesResponse| view! {
                    <BreakdownTable
                        columns=vec![Column::text("Jour"), Column::number("Quantité"), Column::number("CA TTC")]
                        rows=peak_rows(&data)
                    />
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::dashboards::d100_sales::PeakSale;

    #[test]
    fn test_monthly_rows_follow_series_order() {
        let data = MonthlySalesResponse {
            months: vec!["2024-01".to_string(), "2024-02".to_string()],
            quantities: vec![10, 2500],
            revenues: vec![99.5, 12000.0],
            margins: vec![30.0, 3600.0],
        };
        let rows = monthly_rows(&data);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], "2024-02");
        assert_eq!(rows[1][1], "2\u{202f}500");
        assert_eq!(rows[0][2], "99,50\u{a0}€");
    }

    #[test]
    fn test_peak_rows_format_date() {
        let data = PeakSalesResponse {
            peaks: vec![PeakSale {
                date: NaiveDate::from_ymd_opt(2024, 12, 24).unwrap(),
                quantity: 340,
                revenue: 5120.0,
            }],
        };
        assert_eq!(peak_rows(&data)[0][0], "24/12/2024");
    }

    #[test]
    fn test_breakdown_columns_title() {
        let columns = breakdown_columns("Univers");
        assert_eq!(columns[0].title, "Univers");
        assert!(!columns[0].numeric);
        assert!(columns[3].numeric);
    }
}
