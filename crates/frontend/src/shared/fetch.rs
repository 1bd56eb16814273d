//! Typed fetch client
//!
//! One GET per call: transport and HTTP-status failures, malformed JSON and
//! shape violations are all normalized into [`FetchError`]. No retry, no
//! cache, no timeout.

use contracts::shared::error::ErrorResponse;
use contracts::shared::validation::ShapeError;
use gloo_net::http::Request;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Network failure or non-success HTTP status
    #[error("request failed: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// The API answered 404: the selection has no data
    #[error("no data: {message}")]
    NotFound { message: String },

    /// The body is not valid JSON
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Valid JSON with the wrong shape
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// GET `url`, parse the body as JSON and hand it to `validate`
pub async fn fetch_json<T, F>(url: &str, validate: F) -> Result<T, FetchError>
where
    F: FnOnce(serde_json::Value) -> Result<T, ShapeError>,
{
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| FetchError::Transport {
            status: None,
            message: format!("Request failed: {}", e),
        })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| FetchError::Transport {
        status: Some(status),
        message: format!("Failed to read response body: {}", e),
    })?;

    decode_response(status, &body, validate)
}

/// Classify an HTTP response and decode its body
pub fn decode_response<T, F>(status: u16, body: &str, validate: F) -> Result<T, FetchError>
where
    F: FnOnce(serde_json::Value) -> Result<T, ShapeError>,
{
    if status == 404 {
        return Err(FetchError::NotFound {
            message: api_error_message(body).unwrap_or_else(|| "HTTP error: 404".to_string()),
        });
    }

    if !(200..300).contains(&status) {
        return Err(FetchError::Transport {
            status: Some(status),
            message: api_error_message(body)
                .unwrap_or_else(|| format!("HTTP error: {}", status)),
        });
    }

    let raw: serde_json::Value =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    validate(raw).map_err(FetchError::Shape)
}

/// `{ "error": "..." }` body of a failed API call, if any
fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|response| response.error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d200_products::ProductRankingResponse;
    use contracts::shared::validation::decode;

    fn decode_ranking(status: u16, body: &str) -> Result<ProductRankingResponse, FetchError> {
        decode_response(status, body, decode::<ProductRankingResponse>)
    }

    #[test]
    fn test_success_with_empty_list() {
        let response = decode_ranking(200, r#"{"products": []}"#).unwrap();
        assert!(response.products.is_empty());
    }

    #[test]
    fn test_server_error_keeps_api_message() {
        let err = decode_ranking(500, r#"{"error": "database is locked"}"#).unwrap_err();
        assert_eq!(
            err,
            FetchError::Transport {
                status: Some(500),
                message: "database is locked".to_string(),
            }
        );
    }

    #[test]
    fn test_server_error_without_body() {
        let err = decode_ranking(502, "Bad Gateway").unwrap_err();
        assert_eq!(
            err,
            FetchError::Transport {
                status: Some(502),
                message: "HTTP error: 502".to_string(),
            }
        );
    }

    #[test]
    fn test_not_found_is_distinct() {
        let err = decode_ranking(404, r#"{"error": "Aucune donnée"}"#).unwrap_err();
        assert!(matches!(err, FetchError::NotFound { .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = decode_ranking(200, "{products: [").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn test_wrong_shape_is_shape_error() {
        let err = decode_ranking(200, r#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, FetchError::Shape(ShapeError::Decode(_))));
    }
}
