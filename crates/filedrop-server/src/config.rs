use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

pub const ENV_PORT: &str = "PORT";
pub const ENV_STORAGE_ROOT: &str = "FILEDROP_STORAGE_ROOT";
pub const ENV_PUBLIC_BASE_URL: &str = "FILEDROP_PUBLIC_BASE_URL";
pub const ENV_MAX_UPLOAD_SIZE: &str = "FILEDROP_MAX_UPLOAD_SIZE";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding uploaded files.
    pub storage_root: PathBuf,
    /// Request body ceiling for both upload routes, in bytes.
    pub max_upload_size: usize,
    /// Base for download links, e.g. `https://files.example.com`. When unset,
    /// links are built from `public_scheme` and the request's `Host` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_base_url: Option<String>,
    pub public_scheme: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            storage_root: PathBuf::from("uploads"),
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            public_base_url: None,
            public_scheme: "http".into(),
        }
    }
}

impl ServerConfig {
    /// Defaults, overlaid with `path` (if any) and then the process environment.
    pub fn load(path: Option<&Path>) -> ServerResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.apply_env_with(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> ServerResult<String> {
        toml::to_string_pretty(self).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Overlay environment settings read through `lookup`.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> ServerResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_PORT) {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| ServerError::Config(format!("{ENV_PORT}={port:?}: {e}")))?;
            self.bind_addr.set_port(port);
        }
        if let Some(root) = lookup(ENV_STORAGE_ROOT) {
            self.storage_root = PathBuf::from(root);
        }
        if let Some(url) = lookup(ENV_PUBLIC_BASE_URL) {
            self.public_base_url = Some(url).filter(|u| !u.is_empty());
        }
        if let Some(size) = lookup(ENV_MAX_UPLOAD_SIZE) {
            self.max_upload_size = size
                .trim()
                .parse()
                .map_err(|e| ServerError::Config(format!("{ENV_MAX_UPLOAD_SIZE}={size:?}: {e}")))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> ServerResult<()> {
        if self.max_upload_size == 0 {
            return Err(ServerError::Config("max_upload_size must be greater than zero".into()));
        }
        if !matches!(self.public_scheme.as_str(), "http" | "https") {
            return Err(ServerError::Config(format!(
                "public_scheme must be http or https, got {:?}",
                self.public_scheme
            )));
        }
        if let Some(url) = &self.public_base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ServerError::Config(format!(
                    "public_base_url must start with http:// or https://, got {url:?}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr.port(), 3000);
        assert_eq!(c.storage_root, PathBuf::from("uploads"));
        assert_eq!(c.max_upload_size, 10 * 1024 * 1024);
        assert!(c.public_base_url.is_none());
        assert_eq!(c.public_scheme, "http");
        c.validate().unwrap();
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = ServerConfig::from_toml_str(
            r#"
            storage_root = "/srv/files"
            public_base_url = "https://files.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(c.storage_root, PathBuf::from("/srv/files"));
        assert_eq!(c.public_base_url.as_deref(), Some("https://files.example.com"));
        assert_eq!(c.bind_addr.port(), 3000);
    }

    #[test]
    fn bad_toml_is_config_error() {
        let err = ServerConfig::from_toml_str("max_upload_size = \"lots\"").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let c = ServerConfig { max_upload_size: 1024, ..Default::default() };
        let parsed = ServerConfig::from_toml_str(&c.to_toml_string().unwrap()).unwrap();
        assert_eq!(parsed, c);
    }

    #[test]
    fn env_overrides() {
        let vars = env(&[
            ("PORT", "8080"),
            ("FILEDROP_STORAGE_ROOT", "/tmp/drop"),
            ("FILEDROP_PUBLIC_BASE_URL", "https://cdn.example.com"),
            ("FILEDROP_MAX_UPLOAD_SIZE", "2048"),
        ]);
        let mut c = ServerConfig::default();
        c.apply_env_with(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(c.bind_addr.port(), 8080);
        assert_eq!(c.storage_root, PathBuf::from("/tmp/drop"));
        assert_eq!(c.public_base_url.as_deref(), Some("https://cdn.example.com"));
        assert_eq!(c.max_upload_size, 2048);
    }

    #[test]
    fn env_bad_port() {
        let vars = env(&[("PORT", "http")]);
        let mut c = ServerConfig::default();
        assert!(matches!(c.apply_env_with(|k| vars.get(k).cloned()), Err(ServerError::Config(_))));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let zero = ServerConfig { max_upload_size: 0, ..Default::default() };
        assert!(zero.validate().is_err());

        let ftp = ServerConfig { public_base_url: Some("ftp://x".into()), ..Default::default() };
        assert!(ftp.validate().is_err());

        let scheme = ServerConfig { public_scheme: "gopher".into(), ..Default::default() };
        assert!(scheme.validate().is_err());
    }
}
