use std::sync::Arc;

use axum::http::{header, HeaderMap};
use filedrop_protocol::endpoints;
use filedrop_store::BlobStore;

use crate::config::ServerConfig;

/// State shared by all routes.
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: BlobStore,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            store: BlobStore::new(config.storage_root.clone()),
            config: Arc::new(config),
        }
    }

    /// Download URL for a stored file.
    ///
    /// A configured `public_base_url` wins. Otherwise the request's `Host`
    /// header is combined with `public_scheme`, and the bind address stands in
    /// when there is no `Host` header. The filename is percent-encoded as a
    /// single path segment.
    pub fn public_url(&self, headers: &HeaderMap, filename: &str) -> String {
        let base = match &self.config.public_base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => {
                let host = headers
                    .get(header::HOST)
                    .and_then(|h| h.to_str().ok())
                    .map(str::to_owned)
                    .unwrap_or_else(|| self.config.bind_addr.to_string());
                format!("{}://{host}", self.config.public_scheme)
            }
        };
        format!("{base}{}/{}", endpoints::FILES, urlencoding::encode(filename))
    }
}
