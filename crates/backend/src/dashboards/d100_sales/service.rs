use anyhow::{Context, Result};
use chrono::NaiveDate;
use contracts::dashboards::d100_sales::{
    CategorySalesRow, LabDistributorSalesRow, MonthlySalesResponse, PeakSale, PeakSalesResponse,
    PharmacySalesRow, SalesByCategoryResponse, SalesByLabDistributorResponse,
    SalesByPharmacyResponse, SalesByUniverseResponse, SalesSummaryResponse, UniverseSalesRow,
};
use contracts::shared::filters::FilterSet;
use sea_orm::DatabaseConnection;

use super::repository::{self, MonthlyAggregation, SalesDimension, TotalsAggregation};

/// Number of best days reported by the peaks metric
pub const PEAK_DAYS: i64 = 10;

pub async fn sales_by_month(db: &DatabaseConnection, filters: &FilterSet) -> Result<MonthlySalesResponse> {
    let rows = repository::sales_by_month(db, filters).await?;
    Ok(monthly_series(rows))
}

/// Pivot monthly rows into the parallel-vector series
pub fn monthly_series(rows: Vec<MonthlyAggregation>) -> MonthlySalesResponse {
    let mut response = MonthlySalesResponse {
        months: Vec::with_capacity(rows.len()),
        quantities: Vec::with_capacity(rows.len()),
        revenues: Vec::with_capacity(rows.len()),
        margins: Vec::with_capacity(rows.len()),
    };
    for row in rows {
        response.months.push(row.month);
        response.quantities.push(row.quantity);
        response.revenues.push(row.revenue);
        response.margins.push(row.margin);
    }
    response
}

pub async fn sales_by_category(db: &DatabaseConnection, filters: &FilterSet) -> Result<SalesByCategoryResponse> {
    let rows = repository::sales_by_dimension(db, filters, SalesDimension::Category).await?;
    Ok(SalesByCategoryResponse {
        categories: rows
            .into_iter()
            .map(|r| CategorySalesRow {
                category: r.label,
                quantity: r.quantity,
                revenue: r.revenue,
                margin: r.margin,
            })
            .collect(),
    })
}

pub async fn sales_by_universe(db: &DatabaseConnection, filters: &FilterSet) -> Result<SalesByUniverseResponse> {
    let rows = repository::sales_by_dimension(db, filters, SalesDimension::Universe).await?;
    Ok(SalesByUniverseResponse {
        universes: rows
            .into_iter()
            .map(|r| UniverseSalesRow {
                universe: r.label,
                quantity: r.quantity,
                revenue: r.revenue,
                margin: r.margin,
            })
            .collect(),
    })
}

pub async fn sales_by_lab_distributor(
    db: &DatabaseConnection,
    filters: &FilterSet,
) -> Result<SalesByLabDistributorResponse> {
    let rows = repository::sales_by_dimension(db, filters, SalesDimension::LabDistributor).await?;
    Ok(SalesByLabDistributorResponse {
        lab_distributors: rows
            .into_iter()
            .map(|r| LabDistributorSalesRow {
                lab_distributor: r.label,
                quantity: r.quantity,
                revenue: r.revenue,
                margin: r.margin,
            })
            .collect(),
    })
}

pub async fn sales_by_pharmacy(db: &DatabaseConnection, filters: &FilterSet) -> Result<SalesByPharmacyResponse> {
    let rows = repository::sales_by_pharmacy(db, filters).await?;
    Ok(SalesByPharmacyResponse {
        pharmacies: rows
            .into_iter()
            .map(|r| PharmacySalesRow {
                pharmacy_id: r.pharmacy_id,
                pharmacy_name: r.pharmacy_name,
                quantity: r.quantity,
                revenue: r.revenue,
                margin: r.margin,
            })
            .collect(),
    })
}

pub async fn sales_summary(db: &DatabaseConnection, filters: &FilterSet) -> Result<SalesSummaryResponse> {
    let totals = repository::sales_totals(db, filters).await?;
    Ok(summary(totals))
}

fn summary(totals: TotalsAggregation) -> SalesSummaryResponse {
    SalesSummaryResponse {
        quantity: totals.quantity,
        revenue: totals.revenue,
        margin: totals.margin,
        margin_rate: margin_rate(totals.margin, totals.revenue),
    }
}

/// Margin as a percentage of revenue, 0 without revenue
pub fn margin_rate(margin: f64, revenue: f64) -> f64 {
    if revenue > 0.0 {
        (margin / revenue * 100.0).clamp(-100.0, 100.0)
    } else {
        0.0
    }
}

pub async fn peak_sales(db: &DatabaseConnection, filters: &FilterSet) -> Result<PeakSalesResponse> {
    let rows = repository::peak_days(db, filters, PEAK_DAYS).await?;
    let peaks = rows
        .into_iter()
        .map(|r| {
            let date = NaiveDate::parse_from_str(&r.sale_date, "%Y-%m-%d")
                .with_context(|| format!("invalid sale date in database: '{}'", r.sale_date))?;
            Ok(PeakSale {
                date,
                quantity: r.quantity,
                revenue: r.revenue,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(PeakSalesResponse { peaks })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support::seeded_connection;
    use contracts::shared::filters::{FilterField, FilterPatch, SelectedCategory};

    #[test]
    fn test_margin_rate() {
        assert_eq!(margin_rate(25.0, 100.0), 25.0);
        assert_eq!(margin_rate(10.0, 0.0), 0.0);
        assert_eq!(margin_rate(-500.0, 100.0), -100.0);
    }

    #[tokio::test]
    async fn test_summary_over_all_sales() {
        let db = seeded_connection().await;
        let summary = sales_summary(&db, &FilterSet::session_default()).await.unwrap();
        assert_eq!(summary.quantity, 20);
        assert_eq!(summary.revenue, 120.0);
        assert_eq!(summary.margin, 47.0);
        assert!((summary.margin_rate - 39.1666).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_monthly_series_is_parallel_and_ordered() {
        let db = seeded_connection().await;
        let series = sales_by_month(&db, &FilterSet::default()).await.unwrap();
        assert_eq!(series.months, ["2024-01", "2024-02"]);
        assert_eq!(series.quantities, [15, 5]);
        assert_eq!(series.revenues, [60.0, 60.0]);
    }

    #[tokio::test]
    async fn test_category_filter_and_scope() {
        let db = seeded_connection().await;
        let mut filters = FilterSet::session_default();
        filters.merge(FilterPatch::new().with_values(FilterField::Category, ["Vitamines"]));
        let summary = sales_summary(&db, &filters).await.unwrap();
        assert_eq!((summary.quantity, summary.revenue, summary.margin), (8, 70.0, 30.0));

        let mut filters = FilterSet::default();
        filters.merge(FilterPatch::new().with_selected_category(Some(SelectedCategory::Medicaments)));
        let by_category = sales_by_category(&db, &filters).await.unwrap();
        assert_eq!(by_category.categories.len(), 1);
        assert_eq!(by_category.categories[0].category, "Douleur");
    }

    #[tokio::test]
    async fn test_by_pharmacy_uses_names() {
        let db = seeded_connection().await;
        let response = sales_by_pharmacy(&db, &FilterSet::default()).await.unwrap();
        let names: Vec<&str> = response.pharmacies.iter().map(|p| p.pharmacy_name.as_str()).collect();
        // Equal revenue: ordered by name
        assert_eq!(names, ["Pharmacie de la Gare", "Pharmacie du Centre"]);
    }

    #[tokio::test]
    async fn test_peaks_best_day_first() {
        let db = seeded_connection().await;
        let response = peak_sales(&db, &FilterSet::default()).await.unwrap();
        assert_eq!(response.peaks.len(), 4);
        assert_eq!(response.peaks[0].date, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
        assert_eq!(response.peaks[0].revenue, 40.0);
    }

    #[tokio::test]
    async fn test_unknown_pharmacy_gives_empty_results() {
        let db = seeded_connection().await;
        let mut filters = FilterSet::default();
        filters.merge(FilterPatch::new().with_values(FilterField::Pharmacy, ["unknown"]));
        let summary = sales_summary(&db, &filters).await.unwrap();
        assert_eq!(summary.quantity, 0);
        assert!(sales_by_month(&db, &filters).await.unwrap().months.is_empty());
    }
}
