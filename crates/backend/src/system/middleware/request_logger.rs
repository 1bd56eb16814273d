use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Logs every API call: method, path, query, status, duration and body size
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Buffer the body to report its real size
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(
                %method,
                path = uri.path(),
                status = parts.status.as_u16(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "failed to read response body: {}",
                e
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let status = parts.status.as_u16();
    let elapsed_ms = start.elapsed().as_millis() as u64;
    let query = uri.query().unwrap_or("");

    if parts.status.is_server_error() {
        tracing::error!(%method, path = uri.path(), query, status, elapsed_ms, bytes = bytes.len(), "request");
    } else if parts.status.is_client_error() {
        tracing::warn!(%method, path = uri.path(), query, status, elapsed_ms, bytes = bytes.len(), "request");
    } else {
        tracing::info!(%method, path = uri.path(), query, status, elapsed_ms, bytes = bytes.len(), "request");
    }

    Response::from_parts(parts, Body::from(bytes))
}
