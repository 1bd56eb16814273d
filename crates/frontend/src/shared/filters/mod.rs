//! Filter Context: the shared Filter Set every metric subscribes to

pub mod context;
pub mod filter_bar;
pub mod options;

pub use context::{use_filters, FilterContext, FilterProvider};
pub use filter_bar::FilterBar;
