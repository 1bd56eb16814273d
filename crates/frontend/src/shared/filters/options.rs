//! Picker options derived from the reference lists.
//!
//! Child dimensions are narrowed to the selected parents; with no parent
//! selected every child is offered. Order follows the API.

use contracts::reference::{
    FamilyTreeResponse, LabDistributorTreeResponse, PharmacyListResponse, ProductCodesResponse,
    UniverseTreeResponse,
};
use contracts::shared::filters::{FilterField, FilterSet};

/// `(value, label)` pairs for a select
pub type PickerOptions = Vec<(String, String)>;

fn selected(parents: Option<&[String]>, name: &str) -> bool {
    match parents {
        Some(parents) if !parents.is_empty() => parents.iter().any(|p| p == name),
        _ => true,
    }
}

fn same_label(values: impl IntoIterator<Item = String>) -> PickerOptions {
    let mut options: PickerOptions = Vec::new();
    for value in values {
        if !options.iter().any(|(v, _)| v == &value) {
            options.push((value.clone(), value));
        }
    }
    options
}

pub fn pharmacy_options(list: &PharmacyListResponse) -> PickerOptions {
    list.pharmacies
        .iter()
        .map(|p| (p.id.clone(), p.name.clone()))
        .collect()
}

pub fn product_options(codes: &ProductCodesResponse) -> PickerOptions {
    same_label(codes.codes.iter().cloned())
}

/// Options of one hierarchical dimension given the current selection
pub fn tree_options(
    field: FilterField,
    filters: &FilterSet,
    universes: Option<&UniverseTreeResponse>,
    families: Option<&FamilyTreeResponse>,
    labs: Option<&LabDistributorTreeResponse>,
) -> PickerOptions {
    let values: Vec<String> = match field {
        FilterField::Universe => universes
            .map(|t| t.universes.iter().map(|u| u.universe.clone()).collect())
            .unwrap_or_default(),
        FilterField::Category => universes
            .map(|t| {
                t.universes
                    .iter()
                    .filter(|u| selected(filters.list(FilterField::Universe), &u.universe))
                    .flat_map(|u| u.categories.iter().map(|c| c.category.clone()))
                    .collect()
            })
            .unwrap_or_default(),
        FilterField::SubCategory => universes
            .map(|t| {
                t.universes
                    .iter()
                    .filter(|u| selected(filters.list(FilterField::Universe), &u.universe))
                    .flat_map(|u| u.categories.iter())
                    .filter(|c| selected(filters.list(FilterField::Category), &c.category))
                    .flat_map(|c| c.sub_categories.iter().cloned())
                    .collect()
            })
            .unwrap_or_default(),
        FilterField::Family => families
            .map(|t| t.families.iter().map(|f| f.family.clone()).collect())
            .unwrap_or_default(),
        FilterField::SubFamily => families
            .map(|t| {
                t.families
                    .iter()
                    .filter(|f| selected(filters.list(FilterField::Family), &f.family))
                    .flat_map(|f| f.sub_families.iter().cloned())
                    .collect()
            })
            .unwrap_or_default(),
        FilterField::LabDistributor => labs
            .map(|t| {
                t.lab_distributors
                    .iter()
                    .map(|l| l.lab_distributor.clone())
                    .collect()
            })
            .unwrap_or_default(),
        FilterField::BrandLab => labs
            .map(|t| {
                t.lab_distributors
                    .iter()
                    .filter(|l| {
                        selected(filters.list(FilterField::LabDistributor), &l.lab_distributor)
                    })
                    .flat_map(|l| l.brand_labs.iter().map(|b| b.brand_lab.clone()))
                    .collect()
            })
            .unwrap_or_default(),
        FilterField::RangeName => labs
            .map(|t| {
                t.lab_distributors
                    .iter()
                    .filter(|l| {
                        selected(filters.list(FilterField::LabDistributor), &l.lab_distributor)
                    })
                    .flat_map(|l| l.brand_labs.iter())
                    .filter(|b| selected(filters.list(FilterField::BrandLab), &b.brand_lab))
                    .flat_map(|b| b.range_names.iter().cloned())
                    .collect()
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    };
    same_label(values)
}

/// Drop values that are already selected
pub fn without_selected(options: PickerOptions, current: &[String]) -> PickerOptions {
    options
        .into_iter()
        .filter(|(value, _)| !current.contains(value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::reference::{CategoryNode, UniverseNode};
    use contracts::shared::filters::FilterPatch;

    fn universes() -> UniverseTreeResponse {
        UniverseTreeResponse {
            universes: vec![
                UniverseNode {
                    universe: "Santé".to_string(),
                    categories: vec![
                        CategoryNode {
                            category: "Vitamines".to_string(),
                            sub_categories: vec!["Vitamine C".to_string(), "Vitamine D".to_string()],
                        },
                        CategoryNode {
                            category: "Douleur".to_string(),
                            sub_categories: vec!["Paracétamol".to_string()],
                        },
                    ],
                },
                UniverseNode {
                    universe: "Beauté".to_string(),
                    categories: vec![CategoryNode {
                        category: "Soins visage".to_string(),
                        sub_categories: vec!["Crèmes".to_string()],
                    }],
                },
            ],
        }
    }

    fn labels(options: &PickerOptions) -> Vec<&str> {
        options.iter().map(|(value, _)| value.as_str()).collect()
    }

    #[test]
    fn test_categories_without_universe_selected() {
        let tree = universes();
        let options = tree_options(
            FilterField::Category,
            &FilterSet::session_default(),
            Some(&tree),
            None,
            None,
        );
        assert_eq!(labels(&options), vec!["Vitamines", "Douleur", "Soins visage"]);
    }

    #[test]
    fn test_sub_categories_narrowed_by_parents() {
        let tree = universes();
        let mut filters = FilterSet::session_default();
        filters.merge(
            FilterPatch::new()
                .with_values(FilterField::Universe, ["Santé"])
                .with_values(FilterField::Category, ["Vitamines"]),
        );
        let options = tree_options(FilterField::SubCategory, &filters, Some(&tree), None, None);
        assert_eq!(labels(&options), vec!["Vitamine C", "Vitamine D"]);
    }

    #[test]
    fn test_missing_reference_list_gives_no_options() {
        let options = tree_options(
            FilterField::BrandLab,
            &FilterSet::session_default(),
            None,
            None,
            None,
        );
        assert!(options.is_empty());
    }

    #[test]
    fn test_without_selected() {
        let options = same_label(["A".to_string(), "B".to_string(), "A".to_string()]);
        assert_eq!(labels(&options), vec!["A", "B"]);
        let remaining = without_selected(options, &["A".to_string()]);
        assert_eq!(labels(&remaining), vec!["B"]);
    }
}
