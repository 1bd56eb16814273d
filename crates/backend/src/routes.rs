use axum::http::{header, Method};
use axum::{middleware, routing::get, Router};
use contracts::metrics::*;
use contracts::shared::metric::Metric;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::shared::app_state::AppState;
use crate::system;

/// All API routes, keyed by the endpoint each metric declares
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // Sales
        .route(SalesByMonth::ENDPOINT, get(handlers::d100_sales::by_month))
        .route(SalesByCategory::ENDPOINT, get(handlers::d100_sales::by_category))
        .route(SalesByUniverse::ENDPOINT, get(handlers::d100_sales::by_universe))
        .route(
            SalesByLabDistributor::ENDPOINT,
            get(handlers::d100_sales::by_lab_distributor),
        )
        .route(SalesByPharmacy::ENDPOINT, get(handlers::d100_sales::by_pharmacy))
        .route(SalesSummary::ENDPOINT, get(handlers::d100_sales::summary))
        .route(PeakSales::ENDPOINT, get(handlers::d100_sales::peaks))
        // Products
        .route(TopProducts::ENDPOINT, get(handlers::d200_products::top))
        .route(WorstProducts::ENDPOINT, get(handlers::d200_products::worst))
        .route(
            ProductSalesByMonth::ENDPOINT,
            get(handlers::d200_products::sales_by_month),
        )
        .route(
            PriceAnomalies::ENDPOINT,
            get(handlers::d200_products::price_anomalies),
        )
        // Stock
        .route(StockByMonth::ENDPOINT, get(handlers::d300_stock::by_month))
        .route(StockByCategory::ENDPOINT, get(handlers::d300_stock::by_category))
        .route(StockCoverage::ENDPOINT, get(handlers::d300_stock::coverage))
        // Purchases
        .route(PurchasesByMonth::ENDPOINT, get(handlers::d400_purchases::by_month))
        .route(
            PurchasesByCategory::ENDPOINT,
            get(handlers::d400_purchases::by_category),
        )
        .route(
            PurchasesByLabDistributor::ENDPOINT,
            get(handlers::d400_purchases::by_lab_distributor),
        )
        // Reference lists
        .route(PharmacyList::ENDPOINT, get(handlers::reference::pharmacies))
        .route(UniverseTree::ENDPOINT, get(handlers::reference::universes))
        .route(FamilyTree::ENDPOINT, get(handlers::reference::families))
        .route(
            LabDistributorTree::ENDPOINT,
            get(handlers::reference::lab_distributors),
        )
        .route(ProductCodes::ENDPOINT, get(handlers::reference::product_codes))
        .layer(middleware::from_fn(system::middleware::request_logger))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::get;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health() {
        let (status, _) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, _) = get("/api/sales/by-week").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
