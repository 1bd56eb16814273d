use anyhow::Result;
use contracts::shared::filters::FilterSet;
use sea_orm::{DatabaseConnection, FromQueryResult, Value};

use crate::shared::filter_clause::FilterClause;

#[derive(Debug, Clone, FromQueryResult)]
pub struct ProductAggregation {
    pub name: String,
    pub code: String,
    pub quantity: i64,
    pub revenue: f64,
    pub margin: f64,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct PriceSpread {
    pub name: String,
    pub code: String,
    pub average_price: f64,
    pub min_price: f64,
    pub max_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    Top,
    Worst,
}

impl Ranking {
    fn order(self) -> &'static str {
        match self {
            Ranking::Top => "DESC",
            Ranking::Worst => "ASC",
        }
    }
}

/// Products ranked by revenue over the selection
pub async fn ranked_products(
    db: &DatabaseConnection,
    filters: &FilterSet,
    ranking: Ranking,
    limit: i64,
) -> Result<Vec<ProductAggregation>> {
    let clause = FilterClause::build(filters, Some("f.sale_date"));
    let sql = format!(
        r#"
        SELECT
            p.name AS name,
            p.code13 AS code,
            CAST(COALESCE(SUM(f.quantity), 0) AS INTEGER) AS quantity,
            CAST(COALESCE(SUM(f.quantity * f.unit_price), 0) AS REAL) AS revenue,
            CAST(COALESCE(SUM(f.quantity * (f.unit_price - f.unit_cost)), 0) AS REAL) AS margin
        FROM sales f
        JOIN products p ON p.code13 = f.product_code
        {{where}}
        GROUP BY p.code13, p.name
        ORDER BY revenue {order}, p.code13
        LIMIT ?
        "#,
        order = ranking.order()
    );

    let stmt = clause.statement(&sql, [], [Value::from(limit)]);
    Ok(ProductAggregation::find_by_statement(stmt).all(db).await?)
}

/// Products whose selling-price spread relative to the mean exceeds `threshold`
pub async fn price_spreads(
    db: &DatabaseConnection,
    filters: &FilterSet,
    threshold: f64,
) -> Result<Vec<PriceSpread>> {
    let clause = FilterClause::build(filters, Some("f.sale_date"));
    let sql = r#"
        SELECT
            p.name AS name,
            p.code13 AS code,
            CAST(AVG(f.unit_price) AS REAL) AS average_price,
            CAST(MIN(f.unit_price) AS REAL) AS min_price,
            CAST(MAX(f.unit_price) AS REAL) AS max_price
        FROM sales f
        JOIN products p ON p.code13 = f.product_code
        {where}
        GROUP BY p.code13, p.name
        HAVING AVG(f.unit_price) > 0
            AND (MAX(f.unit_price) - MIN(f.unit_price)) / AVG(f.unit_price) > ?
        ORDER BY (MAX(f.unit_price) - MIN(f.unit_price)) / AVG(f.unit_price) DESC, p.code13
    "#;

    let stmt = clause.statement(sql, [], [Value::from(threshold)]);
    Ok(PriceSpread::find_by_statement(stmt).all(db).await?)
}
