//! Common error types used across all Plotboard crates
//! Provides consistent error handling and reporting

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base error type for all Plotboard operations
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum PlotboardError {
    // Network errors
    #[error("Network request failed: {message}")]
    Network { message: String },

    #[error("Request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request timeout: {message}")]
    Timeout { message: String, duration_ms: u64 },

    // Data-related errors
    #[error("Response decode error: {message}")]
    Decode { message: String },

    // Input errors
    #[error("Invalid input for {field}: {message}")]
    InvalidInput { field: String, message: String },

    // Configuration errors
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        message: String,
        field: Option<String>,
    },

    // WASM-specific errors
    #[error("JavaScript interop error: {message}")]
    JsInterop { message: String },
}

impl PlotboardError {
    pub fn network(message: impl Into<String>) -> Self {
        PlotboardError::Network {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        PlotboardError::Decode {
            message: message.into(),
        }
    }

    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        PlotboardError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True when the server answered but with a non-success status
    pub fn is_status(&self) -> bool {
        matches!(self, PlotboardError::HttpStatus { .. })
    }
}

/// Result type alias for Plotboard operations
pub type PlotboardResult<T> = Result<T, PlotboardError>;

/// Error response structure for JavaScript interop
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: PlotboardError,
    pub timestamp: u64,
    pub context: Option<ErrorContext>,
}

/// Additional context for error reporting
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorContext {
    pub component: String,
    pub operation: String,
}

impl ErrorResponse {
    pub fn new(error: PlotboardError) -> Self {
        Self {
            success: false,
            error,
            timestamp: chrono::Utc::now().timestamp_millis() as u64,
            context: None,
        }
    }

    /// Add context to the error response
    pub fn with_context(mut self, component: &str, operation: &str) -> Self {
        self.context = Some(ErrorContext {
            component: component.to_string(),
            operation: operation.to_string(),
        });
        self
    }

    /// Convert to JSON string for JavaScript
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":{"type":"JsInterop","details":{"message":"Failed to serialize error"}}}"#.to_string()
        })
    }
}

impl From<serde_json::Error> for PlotboardError {
    fn from(err: serde_json::Error) -> Self {
        PlotboardError::Decode {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "wasm")]
impl From<wasm_bindgen::JsValue> for PlotboardError {
    fn from(err: wasm_bindgen::JsValue) -> Self {
        PlotboardError::JsInterop {
            message: format!("{err:?}"),
        }
    }
}

#[cfg(feature = "wasm")]
impl From<PlotboardError> for wasm_bindgen::JsValue {
    fn from(err: PlotboardError) -> Self {
        wasm_bindgen::JsValue::from_str(&ErrorResponse::new(err).to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = PlotboardError::HttpStatus {
            url: "http://localhost:8000/api/upload/".to_string(),
            status: 403,
        };

        let response = ErrorResponse::new(error).with_context("UploadPage", "submit");

        let json = response.to_json();
        assert!(json.contains("HttpStatus"));
        assert!(json.contains("403"));
        assert!(json.contains("UploadPage"));
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: PlotboardError = json_err.into();

        match err {
            PlotboardError::Decode { message } => assert!(!message.is_empty()),
            _ => panic!("Wrong error variant"),
        }
    }

    #[test]
    fn test_status_detection() {
        assert!(PlotboardError::HttpStatus {
            url: String::new(),
            status: 500
        }
        .is_status());
        assert!(!PlotboardError::network("connection refused").is_status());
    }
}
