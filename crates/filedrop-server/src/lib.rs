//! HTTP server for filedrop.
//!
//! Accepts uploads as multipart forms or base64 JSON, stores them in a local
//! directory under timestamped names and serves them back from `/files`.

pub mod config;
pub mod error;
pub mod handler;
pub mod ingest;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::build_router;
pub use server::FiledropServer;
pub use state::AppState;
