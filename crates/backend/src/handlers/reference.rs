//! Picker reference lists. They ignore the filter selection.

use axum::extract::State;
use axum::Json;
use contracts::metrics::{FamilyTree, LabDistributorTree, PharmacyList, ProductCodes, UniverseTree};
use contracts::reference::{
    FamilyTreeResponse, LabDistributorTreeResponse, PharmacyListResponse, ProductCodesResponse,
    UniverseTreeResponse,
};

use super::found;
use crate::dashboards::reference::service;
use crate::shared::api_error::ApiError;
use crate::shared::app_state::AppState;

pub async fn pharmacies(State(state): State<AppState>) -> Result<Json<PharmacyListResponse>, ApiError> {
    found::<PharmacyList>(service::pharmacies(&state.db).await?)
}

pub async fn universes(State(state): State<AppState>) -> Result<Json<UniverseTreeResponse>, ApiError> {
    found::<UniverseTree>(service::universe_tree(&state.db).await?)
}

pub async fn families(State(state): State<AppState>) -> Result<Json<FamilyTreeResponse>, ApiError> {
    found::<FamilyTree>(service::family_tree(&state.db).await?)
}

pub async fn lab_distributors(
    State(state): State<AppState>,
) -> Result<Json<LabDistributorTreeResponse>, ApiError> {
    found::<LabDistributorTree>(service::lab_distributor_tree(&state.db).await?)
}

pub async fn product_codes(State(state): State<AppState>) -> Result<Json<ProductCodesResponse>, ApiError> {
    found::<ProductCodes>(service::product_codes(&state.db).await?)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::get;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_pharmacy_list() {
        let (status, body) = get("/api/reference/pharmacies").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["pharmacies"][1],
            json!({ "id": "ph-1", "name": "Pharmacie du Centre" })
        );
    }

    #[tokio::test]
    async fn test_universe_tree_nesting() {
        let (status, body) = get("/api/reference/universes").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["universes"][0],
            json!({
                "universe": "Beauté",
                "categories": [{ "category": "Soins visage", "subCategories": ["Crèmes"] }]
            })
        );
    }
}
