use serde::{Deserialize, Serialize};

use crate::shared::metric::MetricResponse;
use crate::shared::validation::{ShapeError, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSalesRow {
    pub name: String,
    /// CIP13 / EAN-13
    pub code: String,
    pub quantity: i64,
    pub revenue: f64,
    pub margin: f64,
}

/// Top or bottom of the product ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRankingResponse {
    pub products: Vec<ProductSalesRow>,
}

impl Validate for ProductRankingResponse {}

impl MetricResponse for ProductRankingResponse {
    fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// A product whose selling price varies abnormally across sales
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAnomalyRow {
    pub name: String,
    pub code: String,
    pub average_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    /// (max - min) / average
    pub deviation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAnomaliesResponse {
    pub anomalies: Vec<PriceAnomalyRow>,
}

impl Validate for PriceAnomaliesResponse {
    fn validate(&self) -> Result<(), ShapeError> {
        for (index, row) in self.anomalies.iter().enumerate() {
            if row.min_price > row.max_price {
                return Err(ShapeError::invalid(
                    format!("anomalies[{}]", index),
                    format!(
                        "minPrice {} is greater than maxPrice {}",
                        row.min_price, row.max_price
                    ),
                ));
            }
        }
        Ok(())
    }
}

impl MetricResponse for PriceAnomaliesResponse {
    fn is_empty(&self) -> bool {
        self.anomalies.is_empty()
    }
}
