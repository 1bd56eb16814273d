use anyhow::Result;
use contracts::shared::filters::FilterSet;
use sea_orm::{DatabaseConnection, FromQueryResult, Value};

use crate::dashboards::UNLABELLED;
use crate::shared::filter_clause::FilterClause;

const PURCHASES_FROM: &str = "FROM purchases f JOIN products p ON p.code13 = f.product_code";

const MEASURES: &str = "CAST(COALESCE(SUM(f.quantity), 0) AS INTEGER) AS quantity, \
    CAST(COALESCE(SUM(f.quantity * f.unit_cost), 0) AS REAL) AS amount";

#[derive(Debug, Clone, FromQueryResult)]
pub struct MonthlyPurchases {
    pub month: String,
    pub quantity: i64,
    pub amount: f64,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct DimensionPurchases {
    pub label: String,
    pub quantity: i64,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseDimension {
    Category,
    LabDistributor,
}

impl PurchaseDimension {
    fn column(self) -> &'static str {
        match self {
            PurchaseDimension::Category => "p.category",
            PurchaseDimension::LabDistributor => "p.lab_distributor",
        }
    }
}

pub async fn purchases_by_month(
    db: &DatabaseConnection,
    filters: &FilterSet,
) -> Result<Vec<MonthlyPurchases>> {
    let clause = FilterClause::build(filters, Some("f.purchase_date"));
    let sql = format!(
        "SELECT strftime('%Y-%m', f.purchase_date) AS month, {} {} {{where}} \
         GROUP BY month ORDER BY month",
        MEASURES, PURCHASES_FROM
    );

    let stmt = clause.statement(&sql, [], []);
    Ok(MonthlyPurchases::find_by_statement(stmt).all(db).await?)
}

/// Purchase totals per value of `dimension`, largest amount first
pub async fn purchases_by_dimension(
    db: &DatabaseConnection,
    filters: &FilterSet,
    dimension: PurchaseDimension,
) -> Result<Vec<DimensionPurchases>> {
    let clause = FilterClause::build(filters, Some("f.purchase_date"));
    let sql = format!(
        "SELECT COALESCE(NULLIF({}, ''), ?) AS label, {} {} {{where}} \
         GROUP BY label ORDER BY amount DESC, label",
        dimension.column(),
        MEASURES,
        PURCHASES_FROM
    );

    let stmt = clause.statement(&sql, [Value::from(UNLABELLED.to_string())], []);
    Ok(DimensionPurchases::find_by_statement(stmt).all(db).await?)
}
