//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use contracts::shared::metric::API_PORT;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using the backend port.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, API_PORT)
}

/// Build a full API URL from a path
///
/// # Arguments
/// * `path` - The API path (should start with "/api/"), query string included
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/sales/by-month?category=Vitamines");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
