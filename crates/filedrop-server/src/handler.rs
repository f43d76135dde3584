use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{Json, Response};

use filedrop_protocol::{HealthResponse, ServiceInfo};

/// Liveness only: the blob store is not probed.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Route listing served at `/`.
pub async fn info_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}

/// Records the outcome of each `/files` lookup.
pub async fn log_retrieval(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;
    tracing::debug!(%path, status = response.status().as_u16(), "file retrieval");
    response
}
