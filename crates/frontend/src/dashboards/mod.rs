pub mod d100_sales;
pub mod d200_products;
pub mod d300_stock;
pub mod d400_purchases;

pub use d100_sales::ui::SalesDashboard;
pub use d200_products::ui::ProductsDashboard;
pub use d300_stock::ui::StockDashboard;
pub use d400_purchases::ui::PurchasesDashboard;

/// Dashboard tabs; only the visible one fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DashboardTab {
    #[default]
    Sales,
    Products,
    Stock,
    Purchases,
}

impl DashboardTab {
    pub fn all() -> [DashboardTab; 4] {
        [
            DashboardTab::Sales,
            DashboardTab::Products,
            DashboardTab::Stock,
            DashboardTab::Purchases,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            DashboardTab::Sales => "Ventes",
            DashboardTab::Products => "Produits",
            DashboardTab::Stock => "Stocks",
            DashboardTab::Purchases => "Achats",
        }
    }

    pub fn icon_name(self) -> &'static str {
        match self {
            DashboardTab::Sales => "sales",
            DashboardTab::Products => "products",
            DashboardTab::Stock => "stock",
            DashboardTab::Purchases => "purchases",
        }
    }
}
