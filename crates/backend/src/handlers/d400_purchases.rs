use axum::extract::State;
use axum::Json;
use contracts::dashboards::d400_purchases::{
    MonthlyPurchasesResponse, PurchasesByCategoryResponse, PurchasesByLabDistributorResponse,
};
use contracts::metrics::{PurchasesByCategory, PurchasesByLabDistributor, PurchasesByMonth};

use super::{found, Filters};
use crate::dashboards::d400_purchases::service;
use crate::shared::api_error::ApiError;
use crate::shared::app_state::AppState;

pub async fn by_month(
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<MonthlyPurchasesResponse>, ApiError> {
    found::<PurchasesByMonth>(service::purchases_by_month(&state.db, &filters).await?)
}

pub async fn by_category(
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<PurchasesByCategoryResponse>, ApiError> {
    found::<PurchasesByCategory>(service::purchases_by_category(&state.db, &filters).await?)
}

pub async fn by_lab_distributor(
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<PurchasesByLabDistributorResponse>, ApiError> {
    found::<PurchasesByLabDistributor>(
        service::purchases_by_lab_distributor(&state.db, &filters).await?,
    )
}

#[cfg(test)]
mod tests {
    use super::super::test_support::get;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_purchases_outside_period_not_found() {
        let (status, _) = get("/api/purchases/by-month?startDate=2024-02-01").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_purchases_by_category() {
        let (status, body) = get("/api/purchases/by-category").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["categories"][0]["category"], json!("Vitamines"));
        assert_eq!(body["categories"][0]["amount"], json!(150.0));
    }
}
