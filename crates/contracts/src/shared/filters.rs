//! The Filter Set: the shared selection criteria driving every metric query.
//!
//! Every dimension is multi-valued. An absent dimension is stored as `None`;
//! merging never leaves `Some(vec![])` behind, so two filter sets describing
//! the same selection compare equal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product scope toggle shown above every dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectedCategory {
    #[default]
    Global,
    Medicaments,
    Parapharmacie,
}

impl SelectedCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectedCategory::Global => "global",
            SelectedCategory::Medicaments => "medicaments",
            SelectedCategory::Parapharmacie => "parapharmacie",
        }
    }

    /// Returns the display name for the UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            SelectedCategory::Global => "Global",
            SelectedCategory::Medicaments => "Médicaments",
            SelectedCategory::Parapharmacie => "Parapharmacie",
        }
    }

    pub fn all() -> [SelectedCategory; 3] {
        [
            SelectedCategory::Global,
            SelectedCategory::Medicaments,
            SelectedCategory::Parapharmacie,
        ]
    }
}

impl fmt::Display for SelectedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectedCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(SelectedCategory::Global),
            "medicaments" => Ok(SelectedCategory::Medicaments),
            "parapharmacie" => Ok(SelectedCategory::Parapharmacie),
            other => Err(format!("unknown selected category '{}'", other)),
        }
    }
}

/// One field of the Filter Set, in canonical serialization order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Pharmacy,
    Universe,
    Category,
    SubCategory,
    LabDistributor,
    BrandLab,
    RangeName,
    Family,
    SubFamily,
    Product,
    StartDate,
    EndDate,
    SelectedCategory,
}

impl FilterField {
    pub const ALL: &'static [FilterField] = &[
        FilterField::Pharmacy,
        FilterField::Universe,
        FilterField::Category,
        FilterField::SubCategory,
        FilterField::LabDistributor,
        FilterField::BrandLab,
        FilterField::RangeName,
        FilterField::Family,
        FilterField::SubFamily,
        FilterField::Product,
        FilterField::StartDate,
        FilterField::EndDate,
        FilterField::SelectedCategory,
    ];

    /// Metrics that do not depend on the selection (reference lists)
    pub const NONE: &'static [FilterField] = &[];

    /// Query-string key
    pub fn key(self) -> &'static str {
        match self {
            FilterField::Pharmacy => "pharmacy",
            FilterField::Universe => "universe",
            FilterField::Category => "category",
            FilterField::SubCategory => "subCategory",
            FilterField::LabDistributor => "labDistributor",
            FilterField::BrandLab => "brandLab",
            FilterField::RangeName => "rangeName",
            FilterField::Family => "family",
            FilterField::SubFamily => "subFamily",
            FilterField::Product => "product",
            FilterField::StartDate => "startDate",
            FilterField::EndDate => "endDate",
            FilterField::SelectedCategory => "selectedCategory",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.key() == key)
    }

    pub fn is_list(self) -> bool {
        !matches!(
            self,
            FilterField::StartDate | FilterField::EndDate | FilterField::SelectedCategory
        )
    }
}

/// Current filter selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pharmacy: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub universe: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lab_distributor: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_lab: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_name: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_family: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_category: Option<SelectedCategory>,
}

impl FilterSet {
    /// State at session start and after "clear filters"
    pub fn session_default() -> Self {
        Self {
            selected_category: Some(SelectedCategory::Global),
            ..Default::default()
        }
    }

    /// Shallow merge: every field present in `patch` replaces the current value
    pub fn merge(&mut self, patch: FilterPatch) {
        let FilterPatch {
            pharmacy,
            universe,
            category,
            sub_category,
            lab_distributor,
            brand_lab,
            range_name,
            family,
            sub_family,
            product,
            start_date,
            end_date,
            selected_category,
        } = patch;

        let lists = [
            (FilterField::Pharmacy, pharmacy),
            (FilterField::Universe, universe),
            (FilterField::Category, category),
            (FilterField::SubCategory, sub_category),
            (FilterField::LabDistributor, lab_distributor),
            (FilterField::BrandLab, brand_lab),
            (FilterField::RangeName, range_name),
            (FilterField::Family, family),
            (FilterField::SubFamily, sub_family),
            (FilterField::Product, product),
        ];
        for (field, values) in lists {
            if let (Some(values), Some(slot)) = (values, self.list_slot_mut(field)) {
                *slot = normalize(values);
            }
        }

        if let Some(start_date) = start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = end_date {
            self.end_date = end_date;
        }
        if let Some(selected_category) = selected_category {
            self.selected_category = selected_category;
        }
    }

    /// Values of a list field, `None` for date/category fields
    pub fn list(&self, field: FilterField) -> Option<&[String]> {
        let slot = match field {
            FilterField::Pharmacy => &self.pharmacy,
            FilterField::Universe => &self.universe,
            FilterField::Category => &self.category,
            FilterField::SubCategory => &self.sub_category,
            FilterField::LabDistributor => &self.lab_distributor,
            FilterField::BrandLab => &self.brand_lab,
            FilterField::RangeName => &self.range_name,
            FilterField::Family => &self.family,
            FilterField::SubFamily => &self.sub_family,
            FilterField::Product => &self.product,
            FilterField::StartDate | FilterField::EndDate | FilterField::SelectedCategory => {
                return None
            }
        };
        slot.as_deref()
    }

    pub(crate) fn list_slot_mut(&mut self, field: FilterField) -> Option<&mut Option<Vec<String>>> {
        match field {
            FilterField::Pharmacy => Some(&mut self.pharmacy),
            FilterField::Universe => Some(&mut self.universe),
            FilterField::Category => Some(&mut self.category),
            FilterField::SubCategory => Some(&mut self.sub_category),
            FilterField::LabDistributor => Some(&mut self.lab_distributor),
            FilterField::BrandLab => Some(&mut self.brand_lab),
            FilterField::RangeName => Some(&mut self.range_name),
            FilterField::Family => Some(&mut self.family),
            FilterField::SubFamily => Some(&mut self.sub_family),
            FilterField::Product => Some(&mut self.product),
            FilterField::StartDate | FilterField::EndDate | FilterField::SelectedCategory => None,
        }
    }

    /// Serialized values of one field; empty when the field is absent
    pub fn values(&self, field: FilterField) -> Vec<String> {
        match field {
            FilterField::StartDate => self.start_date.map(format_date).into_iter().collect(),
            FilterField::EndDate => self.end_date.map(format_date).into_iter().collect(),
            FilterField::SelectedCategory => self
                .selected_category
                .map(|c| c.as_str().to_string())
                .into_iter()
                .collect(),
            list => self
                .list(list)
                .unwrap_or_default()
                .iter()
                .filter(|value| !value.is_empty())
                .cloned()
                .collect(),
        }
    }

    /// The product code when exactly one product is selected
    pub fn single_product(&self) -> Option<&str> {
        match self.product.as_deref() {
            Some([code]) => Some(code.as_str()),
            _ => None,
        }
    }

    /// Number of active dimension filters, dates and scope excluded
    pub fn active_dimension_count(&self) -> usize {
        FilterField::ALL
            .iter()
            .filter(|field| field.is_list())
            .filter(|field| !self.values(**field).is_empty())
            .count()
    }
}

/// Partial Filter Set applied with [`FilterSet::merge`].
///
/// `None` leaves a field untouched. For lists `Some(vec![])` clears the
/// field; dates and scope use `Some(None)` to clear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub pharmacy: Option<Vec<String>>,
    pub universe: Option<Vec<String>>,
    pub category: Option<Vec<String>>,
    pub sub_category: Option<Vec<String>>,
    pub lab_distributor: Option<Vec<String>>,
    pub brand_lab: Option<Vec<String>>,
    pub range_name: Option<Vec<String>>,
    pub family: Option<Vec<String>>,
    pub sub_family: Option<Vec<String>>,
    pub product: Option<Vec<String>>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
    pub selected_category: Option<Option<SelectedCategory>>,
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a list field; ignored for date and scope fields
    pub fn with_values<I, S>(mut self, field: FilterField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        let slot = match field {
            FilterField::Pharmacy => &mut self.pharmacy,
            FilterField::Universe => &mut self.universe,
            FilterField::Category => &mut self.category,
            FilterField::SubCategory => &mut self.sub_category,
            FilterField::LabDistributor => &mut self.lab_distributor,
            FilterField::BrandLab => &mut self.brand_lab,
            FilterField::RangeName => &mut self.range_name,
            FilterField::Family => &mut self.family,
            FilterField::SubFamily => &mut self.sub_family,
            FilterField::Product => &mut self.product,
            FilterField::StartDate | FilterField::EndDate | FilterField::SelectedCategory => {
                return self
            }
        };
        *slot = Some(values);
        self
    }

    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn with_selected_category(mut self, category: Option<SelectedCategory>) -> Self {
        self.selected_category = Some(category);
        self
    }
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn normalize(values: Vec<String>) -> Option<Vec<String>> {
    let values: Vec<String> = values.into_iter().filter(|v| !v.is_empty()).collect();
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_default_is_global() {
        let filters = FilterSet::session_default();
        assert_eq!(filters.selected_category, Some(SelectedCategory::Global));
        assert_eq!(filters.active_dimension_count(), 0);
    }

    #[test]
    fn test_merge_is_shallow() {
        let mut filters = FilterSet::session_default();
        filters.merge(FilterPatch::new().with_values(FilterField::Category, ["Vitamines"]));
        filters.merge(FilterPatch::new().with_values(FilterField::Pharmacy, ["ph-1", "ph-2"]));

        assert_eq!(filters.category, Some(vec!["Vitamines".to_string()]));
        assert_eq!(
            filters.pharmacy,
            Some(vec!["ph-1".to_string(), "ph-2".to_string()])
        );
        assert_eq!(filters.selected_category, Some(SelectedCategory::Global));
    }

    #[test]
    fn test_merge_empty_list_clears_field() {
        let mut filters = FilterSet::session_default();
        filters.merge(FilterPatch::new().with_values(FilterField::Family, ["Soins"]));
        filters.merge(FilterPatch::new().with_values(FilterField::Family, Vec::<String>::new()));
        assert_eq!(filters, FilterSet::session_default());
    }

    #[test]
    fn test_merge_clears_dates_explicitly() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1);
        let mut filters = FilterSet::default();
        filters.merge(FilterPatch::new().with_dates(start, None));
        assert_eq!(filters.start_date, start);

        filters.merge(FilterPatch::new());
        assert_eq!(filters.start_date, start);

        filters.merge(FilterPatch::new().with_dates(None, None));
        assert_eq!(filters.start_date, None);
    }

    #[test]
    fn test_with_values_ignores_scalar_fields() {
        let patch = FilterPatch::new().with_values(FilterField::StartDate, ["2024-01-01"]);
        assert_eq!(patch, FilterPatch::default());
    }

    #[test]
    fn test_single_product() {
        let mut filters = FilterSet::default();
        assert_eq!(filters.single_product(), None);
        filters.product = Some(vec!["3400930000001".to_string()]);
        assert_eq!(filters.single_product(), Some("3400930000001"));
        filters.product = Some(vec!["3400930000001".into(), "3400930000002".into()]);
        assert_eq!(filters.single_product(), None);
    }

    #[test]
    fn test_selected_category_parse() {
        assert_eq!(
            "parapharmacie".parse::<SelectedCategory>(),
            Ok(SelectedCategory::Parapharmacie)
        );
        assert!("otc".parse::<SelectedCategory>().is_err());
    }
}
