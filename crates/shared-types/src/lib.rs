//! Shared types for Plotboard
//!
//! This crate contains the types exchanged between the data-manager,
//! page-state and wasm-bridge crates: remote records, annotation shapes,
//! control parameters, notifications and the common error type.

pub mod data_types;
pub mod errors;
pub mod events;
pub mod notifications;
pub mod params;
pub mod shapes;

pub use data_types::{DataPage, Endpoint, PaginationCursor, Record};
pub use errors::{ErrorResponse, PlotboardError, PlotboardResult};
pub use events::KeyEvent;
pub use notifications::{
    Notification, NotificationLevel, NotificationQueue, PendingToast, ToastMessages,
};
pub use params::{ControlLimits, ShapeColor, VisualizationParams};
pub use shapes::{DragMode, LineStyle, RelayoutEvent, Shape, ShapeKind};

use serde::{Deserialize, Serialize};

/// A file picked in the upload form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedFile {
    pub name: String,
    pub content_type: Option<String>,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: &str, content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            content_type: content_type
                .filter(|ct| !ct.is_empty())
                .map(str::to_string),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Body of the CSRF token endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsrfTokenResponse {
    #[serde(rename = "csrfToken")]
    pub csrf_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_file_drops_empty_content_type() {
        let file = SelectedFile::new("a.csv", Some(""), b"x,y".to_vec());
        assert_eq!(file.content_type, None);
        assert_eq!(file.len(), 3);
    }

    #[test]
    fn test_csrf_response_field_name() {
        let body: CsrfTokenResponse = serde_json::from_str(r#"{"csrfToken":"abc123"}"#).unwrap();
        assert_eq!(body.csrf_token, "abc123");
    }
}
