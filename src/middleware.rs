use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Request logging middleware
///
/// Emits one line per inbound request with method, path, status and
/// duration.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = std::time::Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = %response.status().as_u16(),
        duration_ms = %start.elapsed().as_millis(),
        "request"
    );

    response
}
