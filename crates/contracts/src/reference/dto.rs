//! Reference/dimension lists used to populate the filter pickers.
//!
//! Nested lists keep the parent/child grouping exactly as the API returns it.

use serde::{Deserialize, Serialize};

use crate::shared::metric::MetricResponse;
use crate::shared::validation::{ensure_product_code, ShapeError, Validate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pharmacy {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PharmacyListResponse {
    pub pharmacies: Vec<Pharmacy>,
}

impl Validate for PharmacyListResponse {}

impl MetricResponse for PharmacyListResponse {
    fn is_empty(&self) -> bool {
        self.pharmacies.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    pub category: String,
    pub sub_categories: Vec<String>,
}

/// Universe → Category → SubCategory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniverseNode {
    pub universe: String,
    pub categories: Vec<CategoryNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniverseTreeResponse {
    pub universes: Vec<UniverseNode>,
}

impl Validate for UniverseTreeResponse {}

impl MetricResponse for UniverseTreeResponse {
    fn is_empty(&self) -> bool {
        self.universes.is_empty()
    }
}

/// Family → SubFamily
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyNode {
    pub family: String,
    pub sub_families: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyTreeResponse {
    pub families: Vec<FamilyNode>,
}

impl Validate for FamilyTreeResponse {}

impl MetricResponse for FamilyTreeResponse {
    fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandLabNode {
    pub brand_lab: String,
    pub range_names: Vec<String>,
}

/// LabDistributor → BrandLab → RangeName
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabDistributorNode {
    pub lab_distributor: String,
    pub brand_labs: Vec<BrandLabNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabDistributorTreeResponse {
    pub lab_distributors: Vec<LabDistributorNode>,
}

impl Validate for LabDistributorTreeResponse {}

impl MetricResponse for LabDistributorTreeResponse {
    fn is_empty(&self) -> bool {
        self.lab_distributors.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCodesResponse {
    pub codes: Vec<String>,
}

impl Validate for ProductCodesResponse {
    fn validate(&self) -> Result<(), ShapeError> {
        for (index, code) in self.codes.iter().enumerate() {
            ensure_product_code(&format!("codes[{}]", index), code)?;
        }
        Ok(())
    }
}

impl MetricResponse for ProductCodesResponse {
    fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::decode;
    use serde_json::json;

    #[test]
    fn test_universe_tree_keeps_grouping() {
        let tree: UniverseTreeResponse = decode(json!({
            "universes": [{
                "universe": "Santé",
                "categories": [
                    { "category": "Douleur", "subCategories": ["Paracétamol", "Ibuprofène"] },
                    { "category": "Vitamines", "subCategories": [] }
                ]
            }]
        }))
        .unwrap();
        let categories: Vec<&str> = tree.universes[0]
            .categories
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(categories, ["Douleur", "Vitamines"]);
        assert_eq!(tree.universes[0].categories[0].sub_categories[1], "Ibuprofène");
    }

    #[test]
    fn test_product_codes_reject_short_code() {
        let result = decode::<ProductCodesResponse>(json!({ "codes": ["3400930000001", "123"] }));
        assert!(matches!(
            result,
            Err(ShapeError::Invalid { ref field, .. }) if field == "codes[1]"
        ));
    }
}
