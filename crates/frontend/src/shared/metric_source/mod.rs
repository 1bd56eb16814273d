//! Generic metric source: accessor + hook + context, parameterized by a
//! [`contracts::shared::metric::Metric`] catalogue entry.

pub mod accessor;
pub mod context;
pub mod hook;
pub mod state;

pub use accessor::{fetch_metric, metric_path};
pub use context::{provide_metric, use_metric_context};
pub use hook::{use_metric, MetricHandle};
pub use state::{FetchState, MetricLifecycle, RequestToken};
