use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

use super::schema::SCHEMA;

/// Open (creating if needed) the SQLite database file and bootstrap the schema
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };

    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Opening database: {}", absolute_path.display());
    connect(db_url).await
}

/// Connect to `url` and create missing tables
pub async fn connect(url: String) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(url);
    options.sqlx_logging(false);
    if options.get_url().contains(":memory:") {
        // Every pooled connection would otherwise get its own empty database
        options.max_connections(1).min_connections(1);
    }

    let conn = Database::connect(options).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for statement in SCHEMA {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            statement.to_string(),
        ))
        .await?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// In-memory database with the fixture data set
    pub async fn seeded_connection() -> DatabaseConnection {
        let conn = connect("sqlite::memory:".to_string()).await.unwrap();
        for statement in FIXTURES {
            conn.execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                statement.to_string(),
            ))
            .await
            .unwrap();
        }
        conn
    }

    pub const DOLIPRANE: &str = "3400930000001";
    pub const VITAMIN_C: &str = "3400930000002";
    pub const CREAM: &str = "3400930000003";

    const FIXTURES: &[&str] = &[
        r#"INSERT INTO pharmacies (id, name) VALUES
            ('ph-1', 'Pharmacie du Centre'),
            ('ph-2', 'Pharmacie de la Gare')"#,
        r#"INSERT INTO products (code13, name, universe, category, sub_category, family, sub_family,
                lab_distributor, brand_lab, range_name, is_medicament) VALUES
            ('3400930000001', 'Doliprane 1000mg', 'Santé', 'Douleur', 'Paracétamol', 'Antalgiques', 'Paracétamol',
                'Sanofi', 'Doliprane', 'Doliprane Adulte', 1),
            ('3400930000002', 'Vitamine C 500', 'Santé', 'Vitamines', 'Vitamine C', 'Compléments', 'Vitamines',
                'Pierre Fabre', 'Arkopharma', 'Arkovital', 0),
            ('3400930000003', 'Crème hydratante', 'Beauté', 'Soins visage', 'Crèmes', 'Dermocosmétique', 'Hydratants',
                'Pierre Fabre', 'Avène', 'Hydrance', 0)"#,
        r#"INSERT INTO sales (pharmacy_id, product_code, sale_date, quantity, unit_price, unit_cost) VALUES
            ('ph-1', '3400930000001', '2024-01-15', 10, 2.0, 1.5),
            ('ph-1', '3400930000002', '2024-01-20', 5, 8.0, 5.0),
            ('ph-2', '3400930000002', '2024-02-03', 3, 10.0, 5.0),
            ('ph-2', '3400930000003', '2024-02-10', 2, 15.0, 9.0)"#,
        r#"INSERT INTO stock_snapshots (pharmacy_id, product_code, snapshot_date, quantity, unit_cost) VALUES
            ('ph-1', '3400930000001', '2024-01-31', 50, 1.5),
            ('ph-1', '3400930000001', '2024-02-29', 40, 1.5),
            ('ph-2', '3400930000002', '2024-02-29', 20, 5.0)"#,
        r#"INSERT INTO purchases (pharmacy_id, product_code, purchase_date, quantity, unit_cost) VALUES
            ('ph-1', '3400930000001', '2024-01-05', 60, 1.5),
            ('ph-2', '3400930000002', '2024-01-25', 30, 5.0)"#,
    ];
}
