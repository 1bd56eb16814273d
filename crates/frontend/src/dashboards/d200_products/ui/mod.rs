pub mod dashboard;

pub use dashboard::ProductsDashboard;
