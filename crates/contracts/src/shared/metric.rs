//! Metric descriptor shared by the frontend accessor and the backend router.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::filters::{FilterField, FilterSet};
use super::query::to_query_string;
use super::validation::{decode, ShapeError, Validate};

/// Port the API is served on. The frontend always calls this port, so
/// `[server] port` in config.toml must keep the same value.
pub const API_PORT: u16 = 3000;

/// Typed body of a metric endpoint
pub trait MetricResponse:
    Serialize + DeserializeOwned + Validate + Clone + PartialEq + std::fmt::Debug + Send + Sync + 'static
{
    /// An empty aggregation, answered by the API with `404`
    fn is_empty(&self) -> bool;
}

/// One named analytical result: endpoint + response shape + relevant filters
pub trait Metric: 'static {
    /// Path under the API base, e.g. `/api/sales/by-month`
    const ENDPOINT: &'static str;
    /// French label used in user-facing messages ("ventes par mois")
    const LABEL: &'static str;
    /// Filter fields this metric depends on
    const FIELDS: &'static [FilterField];

    type Response: MetricResponse;

    /// Query key derived from the filter set; a change triggers a re-fetch
    fn query_string(filters: &FilterSet) -> String {
        to_query_string(filters, Self::FIELDS)
    }

    fn decode(raw: serde_json::Value) -> Result<Self::Response, ShapeError> {
        decode::<Self::Response>(raw)
    }
}

/// Declares a metric marker type in one line
#[macro_export]
macro_rules! metric {
    ($(#[$meta:meta])* $name:ident, $endpoint:literal, $label:literal, $response:ty, $fields:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl $crate::shared::metric::Metric for $name {
            const ENDPOINT: &'static str = $endpoint;
            const LABEL: &'static str = $label;
            const FIELDS: &'static [$crate::shared::filters::FilterField] = $fields;
            type Response = $response;
        }
    };
}
