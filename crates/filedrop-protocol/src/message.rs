use serde::{Deserialize, Serialize};

/// MIME type reported for uploads whose content type is unknown.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Body of `POST /upload-base64`.
///
/// Both fields are optional on the wire so that a missing field can be
/// reported with the JSON error shape instead of a deserializer rejection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base64UploadRequest {
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

impl Base64UploadRequest {
    pub fn new(data: impl Into<String>, filename: impl Into<String>) -> Self {
        Self { data: Some(data.into()), filename: Some(filename.into()) }
    }

    /// Both fields, if present and non-empty.
    pub fn fields(&self) -> Option<(&str, &str)> {
        let data = self.data.as_deref().filter(|s| !s.is_empty())?;
        let filename = self.filename.as_deref().filter(|s| !s.is_empty())?;
        Some((data, filename))
    }
}

/// Successful response of either upload endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub url: String,
    pub size: u64,
    pub mimetype: String,
}

impl UploadResponse {
    pub fn new(filename: String, url: String, size: u64, mimetype: String) -> Self {
        Self { success: true, filename, url, size, mimetype }
    }
}

/// Failure response of either upload endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into() }
    }
}
