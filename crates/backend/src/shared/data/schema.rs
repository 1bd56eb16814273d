//! SQLite schema, created with `CREATE TABLE IF NOT EXISTS` on start-up.
//!
//! Dates are stored as `YYYY-MM-DD` text. Revenue is `quantity * unit_price`,
//! margin `quantity * (unit_price - unit_cost)`.

pub const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS pharmacies (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        code13 TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        universe TEXT,
        category TEXT,
        sub_category TEXT,
        family TEXT,
        sub_family TEXT,
        lab_distributor TEXT,
        brand_lab TEXT,
        range_name TEXT,
        is_medicament INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sales (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        pharmacy_id TEXT NOT NULL REFERENCES pharmacies(id),
        product_code TEXT NOT NULL REFERENCES products(code13),
        sale_date TEXT NOT NULL,
        quantity INTEGER NOT NULL,
        unit_price REAL NOT NULL,
        unit_cost REAL NOT NULL DEFAULT 0
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_sales_date ON sales (sale_date)",
    "CREATE INDEX IF NOT EXISTS idx_sales_product ON sales (product_code)",
    r#"
    CREATE TABLE IF NOT EXISTS stock_snapshots (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        pharmacy_id TEXT NOT NULL REFERENCES pharmacies(id),
        product_code TEXT NOT NULL REFERENCES products(code13),
        snapshot_date TEXT NOT NULL,
        quantity INTEGER NOT NULL,
        unit_cost REAL NOT NULL DEFAULT 0
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_stock_product_date ON stock_snapshots (product_code, pharmacy_id, snapshot_date)",
    r#"
    CREATE TABLE IF NOT EXISTS purchases (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        pharmacy_id TEXT NOT NULL REFERENCES pharmacies(id),
        product_code TEXT NOT NULL REFERENCES products(code13),
        purchase_date TEXT NOT NULL,
        quantity INTEGER NOT NULL,
        unit_cost REAL NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_purchases_date ON purchases (purchase_date)",
];
