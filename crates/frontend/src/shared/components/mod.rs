pub mod date_input;
pub mod filter_panel;
pub mod metric_frame;
pub mod stat_card;
pub mod table;
pub mod ui;

pub use metric_frame::MetricFrame;
pub use stat_card::{StatCard, ValueFormat};
