pub mod d100_sales;
pub mod d200_products;
pub mod d300_stock;
pub mod d400_purchases;
pub mod reference;

use axum::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::Json;
use contracts::shared::filters::FilterSet;
use contracts::shared::metric::{Metric, MetricResponse};
use contracts::shared::query::from_query_pairs;

use crate::shared::api_error::ApiError;

/// Filter Set decoded from the query string (`category=A&category=B&startDate=...`)
#[derive(Debug, Clone)]
pub struct Filters(pub FilterSet);

#[async_trait]
impl<S> FromRequestParts<S> for Filters
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        Ok(Filters(from_query_pairs(pairs)?))
    }
}

/// Wrap a metric result, turning an empty aggregation into `404`
pub fn found<M: Metric>(response: M::Response) -> Result<Json<M::Response>, ApiError> {
    if response.is_empty() {
        tracing::info!(endpoint = M::ENDPOINT, "no data for selection");
        Err(ApiError::NotFound)
    } else {
        Ok(Json(response))
    }
}
