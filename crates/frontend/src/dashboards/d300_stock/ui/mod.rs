pub mod dashboard;

pub use dashboard::StockDashboard;
