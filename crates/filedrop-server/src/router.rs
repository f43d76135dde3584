use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use filedrop_protocol::endpoints;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handler, ingest};

/// Build the axum router with all filedrop endpoints.
///
/// `GET /files/{name}` is served straight from the store root.
pub fn build_router(state: AppState) -> Router {
    let files = Router::new()
        .nest_service(endpoints::FILES, ServeDir::new(state.store.root()))
        .layer(middleware::from_fn(handler::log_retrieval));
    Router::new()
        .route(endpoints::ROOT, get(handler::info_handler))
        .route(endpoints::HEALTH, get(handler::health_handler))
        .route(endpoints::UPLOAD, post(ingest::upload_multipart))
        .route(endpoints::UPLOAD_BASE64, post(ingest::upload_base64))
        .merge(files)
        .layer(DefaultBodyLimit::max(state.config.max_upload_size))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
