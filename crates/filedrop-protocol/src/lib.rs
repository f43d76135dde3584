//! HTTP wire types for filedrop.
//!
//! Defines the endpoint paths and the JSON bodies exchanged between clients
//! and the filedrop server.

pub mod endpoint;
pub mod message;

pub use endpoint::{endpoints, HealthResponse, ServiceEndpoints, ServiceInfo, UPLOAD_FIELD};
pub use message::{Base64UploadRequest, ErrorResponse, UploadResponse, DEFAULT_MIME_TYPE};
