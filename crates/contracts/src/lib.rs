pub mod dashboards;
pub mod metrics;
pub mod reference;
pub mod shared;
