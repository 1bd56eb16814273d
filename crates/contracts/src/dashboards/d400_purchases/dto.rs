use serde::{Deserialize, Serialize};

use crate::shared::metric::MetricResponse;
use crate::shared::validation::{ensure_parallel, ShapeError, Validate};

/// Monthly purchase series. All three vectors are parallel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPurchasesResponse {
    pub months: Vec<String>,
    pub quantities: Vec<i64>,
    pub amounts: Vec<f64>,
}

impl Validate for MonthlyPurchasesResponse {
    fn validate(&self) -> Result<(), ShapeError> {
        ensure_parallel(
            ("months", self.months.len()),
            &[
                ("quantities", self.quantities.len()),
                ("amounts", self.amounts.len()),
            ],
        )
    }
}

impl MetricResponse for MonthlyPurchasesResponse {
    fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPurchasesRow {
    pub category: String,
    pub quantity: i64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasesByCategoryResponse {
    pub categories: Vec<CategoryPurchasesRow>,
}

impl Validate for PurchasesByCategoryResponse {}

impl MetricResponse for PurchasesByCategoryResponse {
    fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabDistributorPurchasesRow {
    pub lab_distributor: String,
    pub quantity: i64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasesByLabDistributorResponse {
    pub lab_distributors: Vec<LabDistributorPurchasesRow>,
}

impl Validate for PurchasesByLabDistributorResponse {}

impl MetricResponse for PurchasesByLabDistributorResponse {
    fn is_empty(&self) -> bool {
        self.lab_distributors.is_empty()
    }
}
