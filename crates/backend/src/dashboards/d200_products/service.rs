use anyhow::Result;
use contracts::dashboards::d100_sales::MonthlySalesResponse;
use contracts::dashboards::d200_products::{
    PriceAnomaliesResponse, PriceAnomalyRow, ProductRankingResponse, ProductSalesRow,
};
use contracts::shared::filters::FilterSet;
use sea_orm::DatabaseConnection;

use super::repository::{self, PriceSpread, Ranking};
use crate::dashboards::d100_sales;

/// Length of the top and worst rankings
pub const RANKING_SIZE: i64 = 20;

/// Minimal (max - min) / average selling-price spread flagged as an anomaly
pub const PRICE_DEVIATION_THRESHOLD: f64 = 0.2;

pub async fn ranking(
    db: &DatabaseConnection,
    filters: &FilterSet,
    ranking: Ranking,
) -> Result<ProductRankingResponse> {
    let rows = repository::ranked_products(db, filters, ranking, RANKING_SIZE).await?;
    Ok(ProductRankingResponse {
        products: rows
            .into_iter()
            .map(|r| ProductSalesRow {
                name: r.name,
                code: r.code,
                quantity: r.quantity,
                revenue: r.revenue,
                margin: r.margin,
            })
            .collect(),
    })
}

/// Monthly series of the product selected in `filters`; the caller checks
/// that exactly one product is selected
pub async fn product_sales_by_month(
    db: &DatabaseConnection,
    filters: &FilterSet,
) -> Result<MonthlySalesResponse> {
    d100_sales::service::sales_by_month(db, filters).await
}

pub async fn price_anomalies(db: &DatabaseConnection, filters: &FilterSet) -> Result<PriceAnomaliesResponse> {
    let rows = repository::price_spreads(db, filters, PRICE_DEVIATION_THRESHOLD).await?;
    Ok(PriceAnomaliesResponse {
        anomalies: rows.into_iter().map(anomaly).collect(),
    })
}

fn anomaly(spread: PriceSpread) -> PriceAnomalyRow {
    let deviation = if spread.average_price > 0.0 {
        (spread.max_price - spread.min_price) / spread.average_price
    } else {
        0.0
    };
    PriceAnomalyRow {
        name: spread.name,
        code: spread.code,
        average_price: spread.average_price,
        min_price: spread.min_price,
        max_price: spread.max_price,
        deviation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support::{seeded_connection, CREAM, DOLIPRANE, VITAMIN_C};
    use contracts::shared::filters::{FilterField, FilterPatch};

    #[tokio::test]
    async fn test_top_and_worst_rankings() {
        let db = seeded_connection().await;
        let filters = FilterSet::session_default();

        let top = ranking(&db, &filters, Ranking::Top).await.unwrap();
        let codes: Vec<&str> = top.products.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, [VITAMIN_C, CREAM, DOLIPRANE]);
        assert_eq!(top.products[0].revenue, 70.0);

        let worst = ranking(&db, &filters, Ranking::Worst).await.unwrap();
        assert_eq!(worst.products[0].code, DOLIPRANE);
    }

    #[tokio::test]
    async fn test_price_anomaly_detected() {
        let db = seeded_connection().await;
        let response = price_anomalies(&db, &FilterSet::default()).await.unwrap();
        assert_eq!(response.anomalies.len(), 1);

        let row = &response.anomalies[0];
        assert_eq!(row.code, VITAMIN_C);
        assert_eq!((row.min_price, row.max_price), (8.0, 10.0));
        assert!((row.deviation - 2.0 / 9.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_single_product_monthly_series() {
        let db = seeded_connection().await;
        let mut filters = FilterSet::default();
        filters.merge(FilterPatch::new().with_values(FilterField::Product, [VITAMIN_C]));

        let series = product_sales_by_month(&db, &filters).await.unwrap();
        assert_eq!(series.months, ["2024-01", "2024-02"]);
        assert_eq!(series.quantities, [5, 3]);
    }
}
