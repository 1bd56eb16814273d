use serde::{Deserialize, Serialize};

use crate::shared::metric::MetricResponse;
use crate::shared::validation::{ensure_parallel, ShapeError, Validate};

/// Month-end stock series. All three vectors are parallel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStockResponse {
    pub months: Vec<String>,
    pub stock_quantities: Vec<i64>,
    pub stock_values: Vec<f64>,
}

impl Validate for MonthlyStockResponse {
    fn validate(&self) -> Result<(), ShapeError> {
        ensure_parallel(
            ("months", self.months.len()),
            &[
                ("stockQuantities", self.stock_quantities.len()),
                ("stockValues", self.stock_values.len()),
            ],
        )
    }
}

impl MetricResponse for MonthlyStockResponse {
    fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStockRow {
    pub category: String,
    pub stock_quantity: i64,
    pub stock_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockByCategoryResponse {
    pub categories: Vec<CategoryStockRow>,
}

impl Validate for StockByCategoryResponse {}

impl MetricResponse for StockByCategoryResponse {
    fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockCoverageRow {
    pub name: String,
    pub code: String,
    pub stock_quantity: i64,
    pub quantity_sold: i64,
    /// Days of sales the current stock covers; `None` when nothing was sold
    pub coverage_days: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockCoverageResponse {
    pub products: Vec<StockCoverageRow>,
}

impl Validate for StockCoverageResponse {
    fn validate(&self) -> Result<(), ShapeError> {
        for (index, row) in self.products.iter().enumerate() {
            if matches!(row.coverage_days, Some(days) if days < 0.0) {
                return Err(ShapeError::invalid(
                    format!("products[{}].coverageDays", index),
                    "negative coverage",
                ));
            }
        }
        Ok(())
    }
}

impl MetricResponse for StockCoverageResponse {
    fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::decode;
    use serde_json::json;

    #[test]
    fn test_monthly_stock_length_mismatch() {
        let result = decode::<MonthlyStockResponse>(json!({
            "months": ["2024-01", "2024-02"],
            "stockQuantities": [10, 12],
            "stockValues": [100.0]
        }));
        assert!(matches!(result, Err(ShapeError::LengthMismatch { field: "stockValues", .. })));
    }

    #[test]
    fn test_coverage_without_sales() {
        let response: StockCoverageResponse = decode(json!({
            "products": [{
                "name": "Sérum physiologique",
                "code": "3400930000002",
                "stockQuantity": 40,
                "quantitySold": 0,
                "coverageDays": null
            }]
        }))
        .unwrap();
        assert_eq!(response.products[0].coverage_days, None);
    }
}
