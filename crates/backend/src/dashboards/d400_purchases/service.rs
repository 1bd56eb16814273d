use anyhow::Result;
use contracts::dashboards::d400_purchases::{
    CategoryPurchasesRow, LabDistributorPurchasesRow, MonthlyPurchasesResponse,
    PurchasesByCategoryResponse, PurchasesByLabDistributorResponse,
};
use contracts::shared::filters::FilterSet;
use sea_orm::DatabaseConnection;

use super::repository::{self, PurchaseDimension};

pub async fn purchases_by_month(
    db: &DatabaseConnection,
    filters: &FilterSet,
) -> Result<MonthlyPurchasesResponse> {
    let rows = repository::purchases_by_month(db, filters).await?;
    let (months, (quantities, amounts)) = rows
        .into_iter()
        .map(|r| (r.month, (r.quantity, r.amount)))
        .unzip();
    Ok(MonthlyPurchasesResponse {
        months,
        quantities,
        amounts,
    })
}

pub async fn purchases_by_category(
    db: &DatabaseConnection,
    filters: &FilterSet,
) -> Result<PurchasesByCategoryResponse> {
    let rows = repository::purchases_by_dimension(db, filters, PurchaseDimension::Category).await?;
    Ok(PurchasesByCategoryResponse {
        categories: rows
            .into_iter()
            .map(|r| CategoryPurchasesRow {
                category: r.label,
                quantity: r.quantity,
                amount: r.amount,
            })
            .collect(),
    })
}

pub async fn purchases_by_lab_distributor(
    db: &DatabaseConnection,
    filters: &FilterSet,
) -> Result<PurchasesByLabDistributorResponse> {
    let rows =
        repository::purchases_by_dimension(db, filters, PurchaseDimension::LabDistributor).await?;
    Ok(PurchasesByLabDistributorResponse {
        lab_distributors: rows
            .into_iter()
            .map(|r| LabDistributorPurchasesRow {
                lab_distributor: r.label,
                quantity: r.quantity,
                amount: r.amount,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support::seeded_connection;
    use contracts::shared::filters::{FilterField, FilterPatch};

    #[tokio::test]
    async fn test_purchases_by_month() {
        let db = seeded_connection().await;
        let response = purchases_by_month(&db, &FilterSet::default()).await.unwrap();
        assert_eq!(response.months, ["2024-01"]);
        assert_eq!(response.quantities, [90]);
        assert_eq!(response.amounts, [240.0]);
    }

    #[tokio::test]
    async fn test_purchases_by_lab_distributor_with_pharmacy_filter() {
        let db = seeded_connection().await;
        let mut filters = FilterSet::default();
        filters.merge(FilterPatch::new().with_values(FilterField::Pharmacy, ["ph-2"]));

        let response = purchases_by_lab_distributor(&db, &filters).await.unwrap();
        assert_eq!(response.lab_distributors.len(), 1);
        assert_eq!(response.lab_distributors[0].lab_distributor, "Pierre Fabre");
        assert_eq!(response.lab_distributors[0].amount, 150.0);
    }
}
