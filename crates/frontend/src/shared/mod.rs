pub mod api_utils;
pub mod components;
pub mod fetch;
pub mod filters;
pub mod icons;
pub mod metric_source;
