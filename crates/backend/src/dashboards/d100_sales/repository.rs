use anyhow::Result;
use contracts::shared::filters::FilterSet;
use sea_orm::{DatabaseConnection, FromQueryResult, Value};

use crate::dashboards::UNLABELLED;
use crate::shared::filter_clause::FilterClause;

/// Sales joined to their product
const SALES_FROM: &str = "FROM sales f JOIN products p ON p.code13 = f.product_code";

#[derive(Debug, Clone, FromQueryResult)]
pub struct MonthlyAggregation {
    pub month: String,
    pub quantity: i64,
    pub revenue: f64,
    pub margin: f64,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct DimensionAggregation {
    pub label: String,
    pub quantity: i64,
    pub revenue: f64,
    pub margin: f64,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct PharmacyAggregation {
    pub pharmacy_id: String,
    pub pharmacy_name: String,
    pub quantity: i64,
    pub revenue: f64,
    pub margin: f64,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct TotalsAggregation {
    pub quantity: i64,
    pub revenue: f64,
    pub margin: f64,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct DailyAggregation {
    pub sale_date: String,
    pub quantity: i64,
    pub revenue: f64,
}

/// Product attribute a sales breakdown groups by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalesDimension {
    Category,
    Universe,
    LabDistributor,
}

impl SalesDimension {
    fn column(self) -> &'static str {
        match self {
            SalesDimension::Category => "p.category",
            SalesDimension::Universe => "p.universe",
            SalesDimension::LabDistributor => "p.lab_distributor",
        }
    }
}

const MEASURES: &str = r#"
    CAST(COALESCE(SUM(f.quantity), 0) AS INTEGER) AS quantity,
    CAST(COALESCE(SUM(f.quantity * f.unit_price), 0) AS REAL) AS revenue,
    CAST(COALESCE(SUM(f.quantity * (f.unit_price - f.unit_cost)), 0) AS REAL) AS margin
"#;

/// Quantity, revenue and margin per calendar month, oldest first
pub async fn sales_by_month(
    db: &DatabaseConnection,
    filters: &FilterSet,
) -> Result<Vec<MonthlyAggregation>> {
    let clause = FilterClause::build(filters, Some("f.sale_date"));
    let sql = format!(
        "SELECT strftime('%Y-%m', f.sale_date) AS month, {} {} {{where}} GROUP BY month ORDER BY month",
        MEASURES, SALES_FROM
    );

    let stmt = clause.statement(&sql, [], []);
    Ok(MonthlyAggregation::find_by_statement(stmt).all(db).await?)
}

/// Totals per value of `dimension`, best revenue first
pub async fn sales_by_dimension(
    db: &DatabaseConnection,
    filters: &FilterSet,
    dimension: SalesDimension,
) -> Result<Vec<DimensionAggregation>> {
    let clause = FilterClause::build(filters, Some("f.sale_date"));
    let sql = format!(
        "SELECT COALESCE(NULLIF({col}, ''), ?) AS label, {measures} {from} {{where}} \
         GROUP BY label ORDER BY revenue DESC, label",
        col = dimension.column(),
        measures = MEASURES,
        from = SALES_FROM,
    );

    let stmt = clause.statement(&sql, [Value::from(UNLABELLED.to_string())], []);
    Ok(DimensionAggregation::find_by_statement(stmt).all(db).await?)
}

pub async fn sales_by_pharmacy(
    db: &DatabaseConnection,
    filters: &FilterSet,
) -> Result<Vec<PharmacyAggregation>> {
    let clause = FilterClause::build(filters, Some("f.sale_date"));
    let sql = format!(
        "SELECT f.pharmacy_id AS pharmacy_id, ph.name AS pharmacy_name, {} {} \
         JOIN pharmacies ph ON ph.id = f.pharmacy_id {{where}} \
         GROUP BY f.pharmacy_id, ph.name ORDER BY revenue DESC, ph.name",
        MEASURES, SALES_FROM
    );

    let stmt = clause.statement(&sql, [], []);
    Ok(PharmacyAggregation::find_by_statement(stmt).all(db).await?)
}

/// Grand totals; always one row, zeros when nothing matches
pub async fn sales_totals(db: &DatabaseConnection, filters: &FilterSet) -> Result<TotalsAggregation> {
    let clause = FilterClause::build(filters, Some("f.sale_date"));
    let sql = format!("SELECT {} {} {{where}}", MEASURES, SALES_FROM);

    let stmt = clause.statement(&sql, [], []);
    let totals = TotalsAggregation::find_by_statement(stmt).one(db).await?;
    Ok(totals.unwrap_or(TotalsAggregation {
        quantity: 0,
        revenue: 0.0,
        margin: 0.0,
    }))
}

/// Best days by revenue
pub async fn peak_days(
    db: &DatabaseConnection,
    filters: &FilterSet,
    limit: i64,
) -> Result<Vec<DailyAggregation>> {
    let clause = FilterClause::build(filters, Some("f.sale_date"));
    let sql = format!(
        "SELECT f.sale_date AS sale_date, \
            CAST(COALESCE(SUM(f.quantity), 0) AS INTEGER) AS quantity, \
            CAST(COALESCE(SUM(f.quantity * f.unit_price), 0) AS REAL) AS revenue \
         {} {{where}} GROUP BY f.sale_date ORDER BY revenue DESC, f.sale_date LIMIT ?",
        SALES_FROM
    );

    let stmt = clause.statement(&sql, [], [Value::from(limit)]);
    Ok(DailyAggregation::find_by_statement(stmt).all(db).await?)
}
