use serde::{Deserialize, Serialize};

/// HTTP endpoint paths served by filedrop.
pub mod endpoints {
    pub const ROOT: &str = "/";
    pub const UPLOAD: &str = "/upload";
    pub const UPLOAD_BASE64: &str = "/upload-base64";
    pub const FILES: &str = "/files";
    pub const HEALTH: &str = "/health";
}

/// Name of the multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

/// Health check response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok".into() }
    }
}

/// Self-description served at `/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub endpoints: ServiceEndpoints,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoints {
    pub upload: String,
    pub upload_base64: String,
    pub download: String,
    pub health: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "File Upload Service".into(),
            endpoints: ServiceEndpoints {
                upload: format!("POST {}", endpoints::UPLOAD),
                upload_base64: format!("POST {}", endpoints::UPLOAD_BASE64),
                download: format!("GET {}/:filename", endpoints::FILES),
                health: format!("GET {}", endpoints::HEALTH),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_defaults() {
        assert_eq!(HealthResponse::default().status, "ok");
    }

    #[test]
    fn endpoint_paths() {
        assert_eq!(endpoints::UPLOAD, "/upload");
        assert_eq!(endpoints::UPLOAD_BASE64, "/upload-base64");
        assert_eq!(endpoints::FILES, "/files");
        assert_eq!(endpoints::HEALTH, "/health");
    }

    #[test]
    fn service_info_describes_routes() {
        let value = serde_json::to_value(ServiceInfo::default()).unwrap();
        assert_eq!(value["service"], "File Upload Service");
        assert_eq!(value["endpoints"]["upload"], "POST /upload");
        assert_eq!(value["endpoints"]["download"], "GET /files/:filename");
        assert_eq!(value["endpoints"]["health"], "GET /health");
    }
}
