pub mod dashboard;

pub use dashboard::PurchasesDashboard;
