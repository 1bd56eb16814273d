//! Stock snapshots are point-in-time counts. Each query keeps, for every
//! pharmacy and product, only the most recent snapshot of the window it
//! looks at (a month, or the selected period).

use anyhow::Result;
use contracts::shared::filters::FilterSet;
use sea_orm::{DatabaseConnection, FromQueryResult, Value};

use crate::dashboards::UNLABELLED;
use crate::shared::filter_clause::FilterClause;

const STOCK_FROM: &str = "FROM stock_snapshots f JOIN products p ON p.code13 = f.product_code";

#[derive(Debug, Clone, FromQueryResult)]
pub struct MonthlyStock {
    pub month: String,
    pub stock_quantity: i64,
    pub stock_value: f64,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct CategoryStock {
    pub category: String,
    pub stock_quantity: i64,
    pub stock_value: f64,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct ProductStock {
    pub code: String,
    pub name: String,
    pub stock_quantity: i64,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct ProductSold {
    pub code: String,
    pub quantity_sold: i64,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct SalesSpan {
    pub first_sale: Option<String>,
    pub last_sale: Option<String>,
}

/// `f.snapshot_date` is the latest snapshot of its pharmacy and product
/// inside the selected period, optionally within the same month
fn latest_snapshot(filters: &FilterSet, same_month: bool) -> (String, Vec<Value>) {
    let mut period = FilterClause::new();
    period.push_period("s.snapshot_date", filters);
    if same_month {
        period.push("strftime('%Y-%m', s.snapshot_date) = strftime('%Y-%m', f.snapshot_date)", []);
    }
    let bounds: String = period
        .conditions()
        .iter()
        .map(|condition| format!(" AND {}", condition))
        .collect();

    let sql = format!(
        "f.snapshot_date = (SELECT MAX(s.snapshot_date) FROM stock_snapshots s \
         WHERE s.pharmacy_id = f.pharmacy_id AND s.product_code = f.product_code{})",
        bounds
    );
    (sql, period.values().to_vec())
}

/// Filter clause restricted to the latest snapshot within the selected period
fn latest_in_period(filters: &FilterSet) -> FilterClause {
    let mut clause = FilterClause::build(filters, None);
    let (sql, values) = latest_snapshot(filters, false);
    clause.push(sql, values);
    clause
}

/// Month-end stock quantity and value, oldest first
pub async fn stock_by_month(db: &DatabaseConnection, filters: &FilterSet) -> Result<Vec<MonthlyStock>> {
    // Last snapshot of each month, cut at the period bounds
    let mut clause = FilterClause::build(filters, Some("f.snapshot_date"));
    let (sql, values) = latest_snapshot(filters, true);
    clause.push(sql, values);

    let sql = format!(
        "SELECT strftime('%Y-%m', f.snapshot_date) AS month, \
            CAST(COALESCE(SUM(f.quantity), 0) AS INTEGER) AS stock_quantity, \
            CAST(COALESCE(SUM(f.quantity * f.unit_cost), 0) AS REAL) AS stock_value \
         {} {{where}} GROUP BY month ORDER BY month",
        STOCK_FROM
    );

    let stmt = clause.statement(&sql, [], []);
    Ok(MonthlyStock::find_by_statement(stmt).all(db).await?)
}

/// Current stock per category, highest value first
pub async fn stock_by_category(db: &DatabaseConnection, filters: &FilterSet) -> Result<Vec<CategoryStock>> {
    let clause = latest_in_period(filters);
    let sql = format!(
        "SELECT COALESCE(NULLIF(p.category, ''), ?) AS category, \
            CAST(COALESCE(SUM(f.quantity), 0) AS INTEGER) AS stock_quantity, \
            CAST(COALESCE(SUM(f.quantity * f.unit_cost), 0) AS REAL) AS stock_value \
         {} {{where}} GROUP BY 1 ORDER BY stock_value DESC, 1",
        STOCK_FROM
    );

    let stmt = clause.statement(&sql, [Value::from(UNLABELLED.to_string())], []);
    Ok(CategoryStock::find_by_statement(stmt).all(db).await?)
}

/// Current stock per product, summed over pharmacies
pub async fn stock_by_product(db: &DatabaseConnection, filters: &FilterSet) -> Result<Vec<ProductStock>> {
    let clause = latest_in_period(filters);
    let sql = format!(
        "SELECT p.code13 AS code, p.name AS name, \
            CAST(COALESCE(SUM(f.quantity), 0) AS INTEGER) AS stock_quantity \
         {} {{where}} GROUP BY p.code13, p.name",
        STOCK_FROM
    );

    let stmt = clause.statement(&sql, [], []);
    Ok(ProductStock::find_by_statement(stmt).all(db).await?)
}

/// Quantity sold per product over the selection
pub async fn sold_by_product(db: &DatabaseConnection, filters: &FilterSet) -> Result<Vec<ProductSold>> {
    let clause = FilterClause::build(filters, Some("f.sale_date"));
    let sql = "SELECT f.product_code AS code, \
            CAST(COALESCE(SUM(f.quantity), 0) AS INTEGER) AS quantity_sold \
         FROM sales f JOIN products p ON p.code13 = f.product_code {where} \
         GROUP BY f.product_code";

    let stmt = clause.statement(sql, [], []);
    Ok(ProductSold::find_by_statement(stmt).all(db).await?)
}

/// First and last sale date of the selection
pub async fn sales_span(db: &DatabaseConnection, filters: &FilterSet) -> Result<SalesSpan> {
    let clause = FilterClause::build(filters, Some("f.sale_date"));
    let sql = "SELECT MIN(f.sale_date) AS first_sale, MAX(f.sale_date) AS last_sale \
         FROM sales f JOIN products p ON p.code13 = f.product_code {where}";

    let stmt = clause.statement(sql, [], []);
    let span = SalesSpan::find_by_statement(stmt).one(db).await?;
    Ok(span.unwrap_or(SalesSpan {
        first_sale: None,
        last_sale: None,
    }))
}
