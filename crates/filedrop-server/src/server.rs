use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::router::build_router;
use crate::state::AppState;

/// filedrop HTTP server.
pub struct FiledropServer {
    state: AppState,
}

impl FiledropServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { state: AppState::new(config) }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.state.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Create the storage directory, bind, and serve until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        self.state.store.ensure_ready().await?;
        let listener = TcpListener::bind(self.config().bind_addr).await?;
        tracing::info!(
            addr = %listener.local_addr()?,
            root = %self.state.store.root().display(),
            max_upload_size = self.config().max_upload_size,
            "filedrop server listening"
        );
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("filedrop server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
