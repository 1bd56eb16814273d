use anyhow::Result;
use sea_orm::{DatabaseBackend, DatabaseConnection, FromQueryResult, Statement};

#[derive(Debug, Clone, FromQueryResult)]
pub struct PharmacyRow {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct HierarchyRow {
    pub level1: String,
    pub level2: Option<String>,
    pub level3: Option<String>,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct CodeRow {
    pub code13: String,
}

/// Product attribute chain behind one picker tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hierarchy {
    /// universe → category → sub_category
    Universe,
    /// family → sub_family
    Family,
    /// lab_distributor → brand_lab → range_name
    LabDistributor,
}

impl Hierarchy {
    fn columns(self) -> [&'static str; 3] {
        match self {
            Hierarchy::Universe => ["universe", "category", "sub_category"],
            Hierarchy::Family => ["family", "sub_family", "NULL"],
            Hierarchy::LabDistributor => ["lab_distributor", "brand_lab", "range_name"],
        }
    }
}

fn statement(sql: &str) -> Statement {
    Statement::from_string(DatabaseBackend::Sqlite, sql.to_string())
}

pub async fn pharmacies(db: &DatabaseConnection) -> Result<Vec<PharmacyRow>> {
    let stmt = statement("SELECT id, name FROM pharmacies ORDER BY name, id");
    Ok(PharmacyRow::find_by_statement(stmt).all(db).await?)
}

/// Distinct non-empty paths of `hierarchy`, sorted level by level
pub async fn hierarchy(db: &DatabaseConnection, hierarchy: Hierarchy) -> Result<Vec<HierarchyRow>> {
    let [first, second, third] = hierarchy.columns();
    let sql = format!(
        "SELECT DISTINCT \
            NULLIF(TRIM({first}), '') AS level1, \
            NULLIF(TRIM({second}), '') AS level2, \
            NULLIF(TRIM({third}), '') AS level3 \
         FROM products \
         WHERE NULLIF(TRIM({first}), '') IS NOT NULL \
         ORDER BY level1, level2, level3",
    );
    Ok(HierarchyRow::find_by_statement(statement(&sql)).all(db).await?)
}

pub async fn product_codes(db: &DatabaseConnection) -> Result<Vec<String>> {
    let stmt = statement("SELECT code13 FROM products ORDER BY code13");
    let rows = CodeRow::find_by_statement(stmt).all(db).await?;
    Ok(rows.into_iter().map(|r| r.code13).collect())
}
