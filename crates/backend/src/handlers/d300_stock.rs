use axum::extract::State;
use axum::Json;
use contracts::dashboards::d300_stock::{
    MonthlyStockResponse, StockByCategoryResponse, StockCoverageResponse,
};
use contracts::metrics::{StockByCategory, StockByMonth, StockCoverage};

use super::{found, Filters};
use crate::dashboards::d300_stock::service;
use crate::shared::api_error::ApiError;
use crate::shared::app_state::AppState;

pub async fn by_month(
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<MonthlyStockResponse>, ApiError> {
    found::<StockByMonth>(service::stock_by_month(&state.db, &filters).await?)
}

pub async fn by_category(
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<StockByCategoryResponse>, ApiError> {
    found::<StockByCategory>(service::stock_by_category(&state.db, &filters).await?)
}

pub async fn coverage(
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<StockCoverageResponse>, ApiError> {
    found::<StockCoverage>(service::stock_coverage(&state.db, &filters).await?)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::get;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_stock_by_month() {
        let (status, body) = get("/api/stock/by-month").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stockQuantities"], json!([50, 60]));
        assert_eq!(body["stockValues"], json!([75.0, 160.0]));
    }

    #[tokio::test]
    async fn test_coverage_null_when_unsold() {
        let (status, body) =
            get("/api/stock/coverage?product=3400930000001&startDate=2024-02-01&endDate=2024-02-29").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["products"][0]["coverageDays"], json!(null));
    }
}
