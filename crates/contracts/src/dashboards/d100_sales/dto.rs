use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::metric::MetricResponse;
use crate::shared::validation::{ensure_parallel, ShapeError, Validate};

/// Monthly sales series. All four vectors are parallel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySalesResponse {
    /// Months in format "YYYY-MM"
    pub months: Vec<String>,
    pub quantities: Vec<i64>,
    pub revenues: Vec<f64>,
    pub margins: Vec<f64>,
}

impl Validate for MonthlySalesResponse {
    fn validate(&self) -> Result<(), ShapeError> {
        ensure_parallel(
            ("months", self.months.len()),
            &[
                ("quantities", self.quantities.len()),
                ("revenues", self.revenues.len()),
                ("margins", self.margins.len()),
            ],
        )
    }
}

impl MetricResponse for MonthlySalesResponse {
    fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySalesRow {
    pub category: String,
    pub quantity: i64,
    pub revenue: f64,
    pub margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesByCategoryResponse {
    pub categories: Vec<CategorySalesRow>,
}

impl Validate for SalesByCategoryResponse {}

impl MetricResponse for SalesByCategoryResponse {
    fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniverseSalesRow {
    pub universe: String,
    pub quantity: i64,
    pub revenue: f64,
    pub margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesByUniverseResponse {
    pub universes: Vec<UniverseSalesRow>,
}

impl Validate for SalesByUniverseResponse {}

impl MetricResponse for SalesByUniverseResponse {
    fn is_empty(&self) -> bool {
        self.universes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabDistributorSalesRow {
    pub lab_distributor: String,
    pub quantity: i64,
    pub revenue: f64,
    pub margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesByLabDistributorResponse {
    pub lab_distributors: Vec<LabDistributorSalesRow>,
}

impl Validate for SalesByLabDistributorResponse {}

impl MetricResponse for SalesByLabDistributorResponse {
    fn is_empty(&self) -> bool {
        self.lab_distributors.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PharmacySalesRow {
    pub pharmacy_id: String,
    pub pharmacy_name: String,
    pub quantity: i64,
    pub revenue: f64,
    pub margin: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesByPharmacyResponse {
    pub pharmacies: Vec<PharmacySalesRow>,
}

impl Validate for SalesByPharmacyResponse {}

impl MetricResponse for SalesByPharmacyResponse {
    fn is_empty(&self) -> bool {
        self.pharmacies.is_empty()
    }
}

/// Headline figures for the selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummaryResponse {
    pub quantity: i64,
    pub revenue: f64,
    pub margin: f64,
    /// Margin / revenue, in percent
    pub margin_rate: f64,
}

impl Validate for SalesSummaryResponse {
    fn validate(&self) -> Result<(), ShapeError> {
        if !(-100.0..=100.0).contains(&self.margin_rate) {
            return Err(ShapeError::invalid(
                "marginRate",
                format!("{} is not a percentage", self.margin_rate),
            ));
        }
        Ok(())
    }
}

impl MetricResponse for SalesSummaryResponse {
    fn is_empty(&self) -> bool {
        self.quantity == 0 && self.revenue == 0.0
    }
}

/// One of the best-selling days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakSale {
    pub date: NaiveDate,
    pub quantity: i64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakSalesResponse {
    pub peaks: Vec<PeakSale>,
}

impl Validate for PeakSalesResponse {}

impl MetricResponse for PeakSalesResponse {
    fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }
}
