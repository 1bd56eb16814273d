pub mod breakdown_table;
pub mod number_format;

pub use breakdown_table::{BreakdownTable, Column};
pub use number_format::*;
