use anyhow::Result;
use contracts::reference::{
    BrandLabNode, CategoryNode, FamilyNode, FamilyTreeResponse, LabDistributorNode,
    LabDistributorTreeResponse, Pharmacy, PharmacyListResponse, ProductCodesResponse,
    UniverseNode, UniverseTreeResponse,
};
use sea_orm::DatabaseConnection;

use super::repository::{self, Hierarchy, HierarchyRow};

pub async fn pharmacies(db: &DatabaseConnection) -> Result<PharmacyListResponse> {
    let rows = repository::pharmacies(db).await?;
    Ok(PharmacyListResponse {
        pharmacies: rows
            .into_iter()
            .map(|r| Pharmacy {
                id: r.id,
                name: r.name,
            })
            .collect(),
    })
}

pub async fn universe_tree(db: &DatabaseConnection) -> Result<UniverseTreeResponse> {
    let rows = repository::hierarchy(db, Hierarchy::Universe).await?;
    let universes = three_levels(rows)
        .into_iter()
        .map(|(universe, categories)| UniverseNode {
            universe,
            categories: categories
                .into_iter()
                .map(|(category, sub_categories)| CategoryNode {
                    category,
                    sub_categories,
                })
                .collect(),
        })
        .collect();
    Ok(UniverseTreeResponse { universes })
}

pub async fn family_tree(db: &DatabaseConnection) -> Result<FamilyTreeResponse> {
    let rows = repository::hierarchy(db, Hierarchy::Family).await?;
    let families = group_ordered(rows.into_iter().map(|r| (r.level1, r.level2)))
        .into_iter()
        .map(|(family, subs)| FamilyNode {
            family,
            sub_families: subs.into_iter().flatten().collect(),
        })
        .collect();
    Ok(FamilyTreeResponse { families })
}

pub async fn lab_distributor_tree(db: &DatabaseConnection) -> Result<LabDistributorTreeResponse> {
    let rows = repository::hierarchy(db, Hierarchy::LabDistributor).await?;
    let lab_distributors = three_levels(rows)
        .into_iter()
        .map(|(lab_distributor, brands)| LabDistributorNode {
            lab_distributor,
            brand_labs: brands
                .into_iter()
                .map(|(brand_lab, range_names)| BrandLabNode {
                    brand_lab,
                    range_names,
                })
                .collect(),
        })
        .collect();
    Ok(LabDistributorTreeResponse { lab_distributors })
}

pub async fn product_codes(db: &DatabaseConnection) -> Result<ProductCodesResponse> {
    Ok(ProductCodesResponse {
        codes: repository::product_codes(db).await?,
    })
}

/// Group `(key, value)` pairs by key, keeping first-seen order of keys and values
pub fn group_ordered<K: PartialEq, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Vec<(K, Vec<V>)> {
    let mut groups: Vec<(K, Vec<V>)> = Vec::new();
    for (key, value) in pairs {
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => groups.push((key, vec![value])),
        }
    }
    groups
}

/// Nest sorted hierarchy rows; missing lower levels leave empty lists
fn three_levels(rows: Vec<HierarchyRow>) -> Vec<(String, Vec<(String, Vec<String>)>)> {
    group_ordered(rows.into_iter().map(|r| (r.level1, (r.level2, r.level3))))
        .into_iter()
        .map(|(top, children)| {
            let middle = group_ordered(
                children
                    .into_iter()
                    .filter_map(|(second, third)| second.map(|second| (second, third))),
            )
            .into_iter()
            .map(|(second, thirds)| (second, thirds.into_iter().flatten().collect()))
            .collect();
            (top, middle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support::seeded_connection;

    #[test]
    fn test_group_ordered_keeps_first_seen_order() {
        let groups = group_ordered([("b", 1), ("a", 2), ("b", 3)]);
        assert_eq!(groups, vec![("b", vec![1, 3]), ("a", vec![2])]);
    }

    #[test]
    fn test_three_levels_with_missing_children() {
        let row = |a: &str, b: Option<&str>, c: Option<&str>| HierarchyRow {
            level1: a.to_string(),
            level2: b.map(String::from),
            level3: c.map(String::from),
        };
        let tree = three_levels(vec![
            row("Santé", None, None),
            row("Santé", Some("Douleur"), Some("Paracétamol")),
            row("Santé", Some("Douleur"), Some("Ibuprofène")),
            row("Santé", Some("Vitamines"), None),
        ]);
        assert_eq!(
            tree,
            vec![(
                "Santé".to_string(),
                vec![
                    (
                        "Douleur".to_string(),
                        vec!["Paracétamol".to_string(), "Ibuprofène".to_string()]
                    ),
                    ("Vitamines".to_string(), vec![]),
                ]
            )]
        );
    }

    #[tokio::test]
    async fn test_reference_lists() {
        let db = seeded_connection().await;

        let pharmacies = pharmacies(&db).await.unwrap();
        assert_eq!(pharmacies.pharmacies[0].name, "Pharmacie de la Gare");

        let universes = universe_tree(&db).await.unwrap();
        let names: Vec<&str> = universes.universes.iter().map(|u| u.universe.as_str()).collect();
        assert_eq!(names, ["Beauté", "Santé"]);
        let sante = &universes.universes[1];
        assert_eq!(sante.categories.len(), 2);
        assert_eq!(sante.categories[0].category, "Douleur");

        let labs = lab_distributor_tree(&db).await.unwrap();
        let fabre = &labs.lab_distributors[0];
        assert_eq!(fabre.lab_distributor, "Pierre Fabre");
        assert_eq!(fabre.brand_labs.len(), 2);

        let families = family_tree(&db).await.unwrap();
        assert_eq!(families.families.len(), 3);

        let codes = product_codes(&db).await.unwrap();
        assert_eq!(codes.codes.len(), 3);
    }
}
