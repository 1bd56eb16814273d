use axum::extract::State;
use axum::Json;
use contracts::dashboards::d100_sales::MonthlySalesResponse;
use contracts::dashboards::d200_products::{PriceAnomaliesResponse, ProductRankingResponse};
use contracts::metrics::{PriceAnomalies, ProductSalesByMonth, TopProducts, WorstProducts};

use super::{found, Filters};
use crate::dashboards::d200_products::repository::Ranking;
use crate::dashboards::d200_products::service;
use crate::shared::api_error::ApiError;
use crate::shared::app_state::AppState;

pub async fn top(
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<ProductRankingResponse>, ApiError> {
    found::<TopProducts>(service::ranking(&state.db, &filters, Ranking::Top).await?)
}

pub async fn worst(
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<ProductRankingResponse>, ApiError> {
    found::<WorstProducts>(service::ranking(&state.db, &filters, Ranking::Worst).await?)
}

/// Requires exactly one `product` in the query
pub async fn sales_by_month(
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<MonthlySalesResponse>, ApiError> {
    if filters.single_product().is_none() {
        return Err(ApiError::BadRequest(
            "Sélectionnez un seul produit.".to_string(),
        ));
    }
    found::<ProductSalesByMonth>(service::product_sales_by_month(&state.db, &filters).await?)
}

pub async fn price_anomalies(
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<PriceAnomaliesResponse>, ApiError> {
    found::<PriceAnomalies>(service::price_anomalies(&state.db, &filters).await?)
}
