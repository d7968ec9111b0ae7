//! Configuration validation utilities

use crate::{BackendConfig, ConfigError, PageConfig, PlotboardConfig, Result};
use plotboard_shared::params::{LABEL_SIZE_MAX, LABEL_SIZE_MIN, NODE_SIZE_MAX, NODE_SIZE_MIN};
use plotboard_shared::{ControlLimits, ShapeColor};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration
    pub fn validate(config: &PlotboardConfig) -> Result<()> {
        Self::validate_backend(&config.backend)?;
        Self::validate_controls(&config.controls)?;
        Self::validate_page(&config.page)?;
        Ok(())
    }

    fn validate_backend(backend: &BackendConfig) -> Result<()> {
        let base = backend.csrf_token_url()?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "Unsupported backend scheme: {}. Must be http or https",
                base.scheme()
            )));
        }

        for (name, path) in [
            ("csrf_token_path", &backend.csrf_token_path),
            ("upload_path", &backend.upload_path),
            ("data_path", &backend.data_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "Invalid {name}: '{path}'. Must start with '/'"
                )));
            }
        }

        if backend.upload_field.is_empty() {
            return Err(ConfigError::Validation(
                "Upload field name cannot be empty".to_string(),
            ));
        }

        if backend.csrf_header.is_empty() {
            return Err(ConfigError::Validation(
                "CSRF header name cannot be empty".to_string(),
            ));
        }

        if backend.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Invalid timeout_ms: 0. Must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Control ranges may narrow the hard slider ranges but never widen them
    fn validate_controls(controls: &ControlLimits) -> Result<()> {
        if controls.label_size_min < LABEL_SIZE_MIN
            || controls.label_size_max > LABEL_SIZE_MAX
            || controls.label_size_min > controls.label_size_max
        {
            return Err(ConfigError::Validation(format!(
                "Invalid label size range: {}..={}. Must lie within {}..={}",
                controls.label_size_min, controls.label_size_max, LABEL_SIZE_MIN, LABEL_SIZE_MAX
            )));
        }

        if !(controls.label_size_min..=controls.label_size_max)
            .contains(&controls.label_size_default)
        {
            return Err(ConfigError::Validation(format!(
                "Default label size {} is outside {}..={}",
                controls.label_size_default, controls.label_size_min, controls.label_size_max
            )));
        }

        if controls.node_size_min < NODE_SIZE_MIN
            || controls.node_size_max > NODE_SIZE_MAX
            || controls.node_size_min > controls.node_size_max
        {
            return Err(ConfigError::Validation(format!(
                "Invalid node size range: {}..={}. Must lie within {}..={}",
                controls.node_size_min, controls.node_size_max, NODE_SIZE_MIN, NODE_SIZE_MAX
            )));
        }

        if controls.node_size_step <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "Invalid node size step: {}. Must be positive",
                controls.node_size_step
            )));
        }

        if controls.node_size_default < controls.node_size_min
            || controls.node_size_default > controls.node_size_max
        {
            return Err(ConfigError::Validation(format!(
                "Default node size {} is outside {}..={}",
                controls.node_size_default, controls.node_size_min, controls.node_size_max
            )));
        }

        ShapeColor::parse(&controls.shape_color_default)
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        Ok(())
    }

    fn validate_page(page: &PageConfig) -> Result<()> {
        if page.shape_history_limit == Some(0) {
            return Err(ConfigError::Validation(
                "shape_history_limit must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}
