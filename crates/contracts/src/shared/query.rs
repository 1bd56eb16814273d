//! Query-string codec for the Filter Set.
//!
//! Multi-valued fields use repeated keys (`category=A&category=B`). Keys are
//! emitted in [`FilterField::ALL`] order, values in selection order, and
//! absent fields produce nothing at all.

use chrono::NaiveDate;
use thiserror::Error;

use super::filters::{FilterField, FilterSet, SelectedCategory};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterParseError {
    #[error("invalid date for `{key}`: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { key: &'static str, value: String },

    #[error("invalid value for `selectedCategory`: '{0}'")]
    InvalidSelectedCategory(String),
}

/// Key/value pairs for the given fields
pub fn query_pairs(filters: &FilterSet, fields: &[FilterField]) -> Vec<(&'static str, String)> {
    FilterField::ALL
        .iter()
        .copied()
        .filter(|field| fields.contains(field))
        .flat_map(|field| {
            filters
                .values(field)
                .into_iter()
                .map(move |value| (field.key(), value))
        })
        .collect()
}

/// Form-encoded query string (without the leading `?`)
pub fn to_query_string(filters: &FilterSet, fields: &[FilterField]) -> String {
    query_pairs(filters, fields)
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Append a query string to an endpoint, omitting `?` when it is empty
pub fn with_query(endpoint: &str, query: &str) -> String {
    if query.is_empty() {
        endpoint.to_string()
    } else {
        format!("{}?{}", endpoint, query)
    }
}

/// Rebuild a Filter Set from already-decoded query pairs.
///
/// Unknown keys and empty values are ignored. A repeated scalar key keeps
/// the last value.
pub fn from_query_pairs<I, K, V>(pairs: I) -> Result<FilterSet, FilterParseError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut filters = FilterSet::default();

    for (key, value) in pairs {
        let Some(field) = FilterField::from_key(key.as_ref()) else {
            continue;
        };
        let value: String = value.into();
        if value.is_empty() {
            continue;
        }

        match field {
            FilterField::StartDate => filters.start_date = Some(parse_date(field, value)?),
            FilterField::EndDate => filters.end_date = Some(parse_date(field, value)?),
            FilterField::SelectedCategory => {
                let category = value
                    .parse::<SelectedCategory>()
                    .map_err(|_| FilterParseError::InvalidSelectedCategory(value))?;
                filters.selected_category = Some(category);
            }
            list => {
                if let Some(slot) = filters.list_slot_mut(list) {
                    slot.get_or_insert_with(Vec::new).push(value);
                }
            }
        }
    }

    Ok(filters)
}

fn parse_date(field: FilterField, value: String) -> Result<NaiveDate, FilterParseError> {
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| FilterParseError::InvalidDate {
        key: field.key(),
        value,
    })
}
