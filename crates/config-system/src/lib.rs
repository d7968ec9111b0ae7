//! Configuration system for Plotboard
//! Backend routes, control limits and page behaviour

use plotboard_shared::{ControlLimits, Endpoint};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub mod parser;
pub mod validation;

pub use parser::{ConfigFormat, ConfigParser};
pub use validation::ConfigValidator;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL '{url}': {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Complete Plotboard configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotboardConfig {
    pub backend: BackendConfig,
    pub controls: ControlLimits,
    pub page: PageConfig,
}

/// Where the backend lives and how its routes are named
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub csrf_token_path: String,
    pub upload_path: String,
    pub data_path: String,
    pub upload_field: String,
    pub csrf_header: String,
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            csrf_token_path: "/api/get-csrf-token/".to_string(),
            upload_path: "/api/upload/".to_string(),
            data_path: "/api/data".to_string(),
            upload_field: "file".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
            timeout_ms: 30_000,
        }
    }
}

impl BackendConfig {
    /// Backend rooted at `base_url` with the default routes
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    pub fn csrf_token_url(&self) -> Result<Url> {
        self.route(&self.csrf_token_path)
    }

    pub fn upload_url(&self) -> Result<Url> {
        self.route(&self.upload_path)
    }

    /// `<base>/api/data<endpoint>?page=<page>`
    pub fn data_url(&self, endpoint: Endpoint, page: u32) -> Result<Url> {
        let mut url = self.route(&format!("{}{}", self.data_path, endpoint.as_path()))?;
        url.query_pairs_mut()
            .clear()
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    // Concatenate rather than `Url::join` so a base with a path prefix keeps it
    fn route(&self, path: &str) -> Result<Url> {
        let raw = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|source| ConfigError::Url { url: raw, source })
    }
}

/// Page behaviour knobs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Keep at most this many shape snapshots; `None` keeps all of them
    pub shape_history_limit: Option<usize>,
}

impl PlotboardConfig {
    /// Parse, then validate
    pub fn load(content: &str, format: ConfigFormat) -> Result<Self> {
        let config = ConfigParser::parse_string(content, format)?;
        ConfigValidator::validate(&config)?;
        log::info!("Loaded configuration for backend {}", config.backend.base_url);
        Ok(config)
    }

    pub fn load_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let config = ConfigParser::parse_file(path)?;
        ConfigValidator::validate(&config)?;
        log::info!("Loaded configuration for backend {}", config.backend.base_url);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routes() {
        let backend = BackendConfig::default();
        assert_eq!(
            backend.csrf_token_url().unwrap().as_str(),
            "http://localhost:8000/api/get-csrf-token/"
        );
        assert_eq!(
            backend.upload_url().unwrap().as_str(),
            "http://localhost:8000/api/upload/"
        );
    }

    #[test]
    fn test_data_url_per_endpoint() {
        let backend = BackendConfig::default();
        assert_eq!(
            backend.data_url(Endpoint::Primary, 1).unwrap().as_str(),
            "http://localhost:8000/api/data?page=1"
        );
        assert_eq!(
            backend.data_url(Endpoint::ButtonTwo, 3).unwrap().as_str(),
            "http://localhost:8000/api/data/buttontwo?page=3"
        );
        assert_eq!(
            backend.data_url(Endpoint::ButtonThree, 2).unwrap().as_str(),
            "http://localhost:8000/api/data/buttonthree?page=2"
        );
    }

    #[test]
    fn test_base_url_prefix_kept() {
        let backend = BackendConfig::with_base_url("https://example.com/backend/");
        assert_eq!(
            backend.upload_url().unwrap().as_str(),
            "https://example.com/backend/api/upload/"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let backend = BackendConfig::with_base_url("not a url");
        assert!(matches!(
            backend.csrf_token_url(),
            Err(ConfigError::Url { .. })
        ));
    }
}
