//! Shape validation for metric responses.
//!
//! A response is trusted only after it has been decoded into its typed
//! struct (serde rejects missing or mistyped fields) and its [`Validate`]
//! impl has accepted the cross-field invariants.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Parsed JSON does not match the expected metric schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("response does not match the expected shape: {0}")]
    Decode(String),

    #[error("`{field}` has {actual} entries but `{reference}` has {expected}")]
    LengthMismatch {
        reference: &'static str,
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("`{field}` is invalid: {reason}")]
    Invalid { field: String, reason: String },
}

impl ShapeError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Cross-field invariants that serde alone cannot express
pub trait Validate {
    fn validate(&self) -> Result<(), ShapeError> {
        Ok(())
    }
}

/// Decode a raw JSON value into `T` and run its invariants
pub fn decode<T>(raw: serde_json::Value) -> Result<T, ShapeError>
where
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_value(raw).map_err(|e| ShapeError::Decode(e.to_string()))?;
    value.validate()?;
    Ok(value)
}

/// Parallel series (one entry per month, etc.) must all have the same length
pub fn ensure_parallel(
    reference: (&'static str, usize),
    others: &[(&'static str, usize)],
) -> Result<(), ShapeError> {
    let (reference_name, expected) = reference;
    for &(field, actual) in others {
        if actual != expected {
            return Err(ShapeError::LengthMismatch {
                reference: reference_name,
                field,
                expected,
                actual,
            });
        }
    }
    Ok(())
}

/// A product code (CIP13 / EAN-13) is exactly 13 ASCII digits
pub fn ensure_product_code(field: &str, code: &str) -> Result<(), ShapeError> {
    if code.len() == 13 && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ShapeError::invalid(
            field,
            format!("'{}' is not a 13-digit product code", code),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Series {
        months: Vec<String>,
        values: Vec<f64>,
    }

    impl Validate for Series {
        fn validate(&self) -> Result<(), ShapeError> {
            ensure_parallel(
                ("months", self.months.len()),
                &[("values", self.values.len())],
            )
        }
    }

    #[test]
    fn test_decode_missing_field_is_shape_error() {
        let result = decode::<Series>(json!({ "months": ["2024-01"] }));
        assert!(matches!(result, Err(ShapeError::Decode(_))));
    }

    #[test]
    fn test_decode_runs_invariants() {
        let result = decode::<Series>(json!({ "months": ["2024-01", "2024-02"], "values": [1.0] }));
        assert_eq!(
            result.unwrap_err(),
            ShapeError::LengthMismatch {
                reference: "months",
                field: "values",
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_product_code() {
        assert!(ensure_product_code("code", "3400930000001").is_ok());
        assert!(ensure_product_code("code", "340093000000").is_err());
        assert!(ensure_product_code("code", "34009300000AB").is_err());
    }
}
