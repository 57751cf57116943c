use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

/// Request logging middleware.
///
/// Logs method, path and status of every request under a fresh request id.
/// Bodies are never logged, so patient values and predictions stay out of
/// the logs.
pub async fn request_log(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = req.method().clone();
    let uri = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %uri,
        status = status,
        "http_request"
    );

    response
}
