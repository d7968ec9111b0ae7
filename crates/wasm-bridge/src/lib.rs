//! WASM bridge for Plotboard
//! Exposes the upload and map page stores to the browser host

use plotboard_config::{ConfigFormat, PlotboardConfig};
use plotboard_shared::PlotboardError;
use serde::Serialize;
use std::sync::Once;
use wasm_bindgen::prelude::*;

pub mod keyboard;
pub mod map_handle;
pub mod report;
pub mod upload_handle;

pub use map_handle::MapPageHandle;
pub use upload_handle::UploadPageHandle;

static INIT: Once = Once::new();

/// Install the console logger and panic hook; later calls are ignored
#[wasm_bindgen]
pub fn init_logging(level: Option<String>) {
    INIT.call_once(|| {
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        let level = level
            .as_deref()
            .and_then(|l| l.parse::<log::Level>().ok())
            .unwrap_or(log::Level::Info);
        if console_log::init_with_level(level).is_err() {
            // Another logger got there first
            return;
        }
        log::info!("Plotboard logging initialised at {level}");
    });
}

/// Configuration handed over by the host as JSON, or the defaults
pub(crate) fn load_config(config_json: Option<String>) -> Result<PlotboardConfig, PlotboardError> {
    match config_json {
        Some(json) if !json.trim().is_empty() => PlotboardConfig::load(&json, ConfigFormat::Json)
            .map_err(|e| PlotboardError::InvalidConfig {
                message: e.to_string(),
                field: None,
            }),
        _ => Ok(PlotboardConfig::default()),
    }
}

/// Plain JS objects rather than ES `Map`s, so plotting libraries can read them
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from(PlotboardError::JsInterop {
            message: e.to_string(),
        }))
}
