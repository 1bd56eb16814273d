pub mod error;
pub mod filters;
pub mod metric;
pub mod query;
pub mod validation;
