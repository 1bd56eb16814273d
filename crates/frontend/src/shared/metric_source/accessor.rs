use contracts::shared::filters::FilterSet;
use contracts::shared::metric::Metric;
use contracts::shared::query::with_query;

use crate::shared::api_utils::api_url;
use crate::shared::fetch::{fetch_json, FetchError};

/// Endpoint path with the metric's query string
pub fn metric_path<M: Metric>(query: &str) -> String {
    with_query(M::ENDPOINT, query)
}

/// Fetch a metric for the given filters. Errors propagate unchanged.
pub async fn fetch_metric<M: Metric>(filters: &FilterSet) -> Result<M::Response, FetchError> {
    fetch_metric_query::<M>(&M::query_string(filters)).await
}

/// Fetch a metric for an already-derived query key
pub async fn fetch_metric_query<M: Metric>(query: &str) -> Result<M::Response, FetchError> {
    fetch_json(&api_url(&metric_path::<M>(query)), M::decode).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::metrics::{PharmacyList, SalesByCategory};
    use contracts::shared::filters::{FilterField, FilterPatch};

    #[test]
    fn test_category_filter_path() {
        let mut filters = FilterSet::default();
        filters.merge(FilterPatch::new().with_values(FilterField::Category, ["Vitamines"]));

        let path = metric_path::<SalesByCategory>(&SalesByCategory::query_string(&filters));
        assert_eq!(path, "/api/sales/by-category?category=Vitamines");
    }

    #[test]
    fn test_session_default_path() {
        let filters = FilterSet::session_default();
        let path = metric_path::<SalesByCategory>(&SalesByCategory::query_string(&filters));
        assert_eq!(path, "/api/sales/by-category?selectedCategory=global");
    }

    #[test]
    fn test_reference_path_has_no_query() {
        let mut filters = FilterSet::session_default();
        filters.merge(FilterPatch::new().with_values(FilterField::Pharmacy, ["ph-1"]));
        let path = metric_path::<PharmacyList>(&PharmacyList::query_string(&filters));
        assert_eq!(path, "/api/reference/pharmacies");
    }
}
