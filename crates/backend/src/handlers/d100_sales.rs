use axum::extract::State;
use axum::Json;
use contracts::dashboards::d100_sales::{
    MonthlySalesResponse, PeakSalesResponse, SalesByCategoryResponse,
    SalesByLabDistributorResponse, SalesByPharmacyResponse, SalesByUniverseResponse,
    SalesSummaryResponse,
};
use contracts::metrics::{
    PeakSales, SalesByCategory, SalesByLabDistributor, SalesByMonth, SalesByPharmacy,
    SalesByUniverse, SalesSummary,
};

use super::{found, Filters};
use crate::dashboards::d100_sales::service;
use crate::shared::api_error::ApiError;
use crate::shared::app_state::AppState;

/// GET /api/sales/by-month
pub async fn by_month(
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<MonthlySalesResponse>, ApiError> {
    found::<SalesByMonth>(service::sales_by_month(&state.db, &filters).await?)
}

/// GET /api/sales/by-category
pub async fn by_category(
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<SalesByCategoryResponse>, ApiError> {
    found::<SalesByCategory>(service::sales_by_category(&state.db, &filters).await?)
}

/// GET /api/sales/by-universe
pub async fn by_universe(
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<SalesByUniverseResponse>, ApiError> {
    found::<SalesByUniverse>(service::sales_by_universe(&state.db, &filters).await?)
}

/// GET /api/sales/by-lab-distributor
pub async fn by_lab_distributor(
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<SalesByLabDistributorResponse>, ApiError> {
    found::<SalesByLabDistributor>(service::sales_by_lab_distributor(&state.db, &filters).await?)
}

/// GET /api/sales/by-pharmacy
pub async fn by_pharmacy(
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<SalesByPharmacyResponse>, ApiError> {
    found::<SalesByPharmacy>(service::sales_by_pharmacy(&state.db, &filters).await?)
}

/// GET /api/sales/summary
pub async fn summary(
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<SalesSummaryResponse>, ApiError> {
    found::<SalesSummary>(service::sales_summary(&state.db, &filters).await?)
}

/// GET /api/sales/peaks
pub async fn peaks(
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<PeakSalesResponse>, ApiError> {
    found::<PeakSales>(service::peak_sales(&state.db, &filters).await?)
}
