//! Cosmetic chart parameters bound to the map page controls

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{PlotboardError, PlotboardResult};
use crate::shapes::DragMode;

pub const LABEL_SIZE_MIN: u8 = 8;
pub const LABEL_SIZE_MAX: u8 = 24;
pub const DEFAULT_LABEL_SIZE: u8 = 12;

pub const NODE_SIZE_MIN: f64 = 0.5;
pub const NODE_SIZE_MAX: f64 = 2.0;
pub const NODE_SIZE_STEP: f64 = 0.1;
pub const DEFAULT_NODE_SIZE: f64 = 1.0;

pub const DEFAULT_SHAPE_COLOR: &str = "#000000";

/// Ranges of the label and node size sliders
///
/// Keys are snake_case like the rest of the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlLimits {
    pub label_size_min: u8,
    pub label_size_max: u8,
    pub label_size_default: u8,
    pub node_size_min: f64,
    pub node_size_max: f64,
    pub node_size_step: f64,
    pub node_size_default: f64,
    pub shape_color_default: String,
}

impl Default for ControlLimits {
    fn default() -> Self {
        Self {
            label_size_min: LABEL_SIZE_MIN,
            label_size_max: LABEL_SIZE_MAX,
            label_size_default: DEFAULT_LABEL_SIZE,
            node_size_min: NODE_SIZE_MIN,
            node_size_max: NODE_SIZE_MAX,
            node_size_step: NODE_SIZE_STEP,
            node_size_default: DEFAULT_NODE_SIZE,
            shape_color_default: DEFAULT_SHAPE_COLOR.to_string(),
        }
    }
}

impl ControlLimits {
    /// Label range with its bounds in order
    pub fn label_range(&self) -> (u8, u8) {
        let (a, b) = (self.label_size_min, self.label_size_max);
        (a.min(b), a.max(b))
    }

    /// Node range with its bounds in order; non-finite bounds use the built-in range
    pub fn node_range(&self) -> (f64, f64) {
        let a = finite_or(self.node_size_min, NODE_SIZE_MIN);
        let b = finite_or(self.node_size_max, NODE_SIZE_MAX);
        (a.min(b), a.max(b))
    }

    pub fn clamp_label_size(&self, value: i64) -> u8 {
        let (min, max) = self.label_range();
        value.clamp(min as i64, max as i64) as u8
    }

    /// Clamp into range and snap to the slider step
    pub fn clamp_node_size(&self, value: f64) -> f64 {
        let (min, max) = self.node_range();
        let value = if value.is_finite() {
            value
        } else {
            finite_or(self.node_size_default, DEFAULT_NODE_SIZE)
        };
        let clamped = value.clamp(min, max);
        if !(self.node_size_step > 0.0 && self.node_size_step.is_finite()) {
            return clamped;
        }
        let steps = ((clamped - min) / self.node_size_step).round();
        let snapped = min + steps * self.node_size_step;
        // Round away float noise such as 1.2000000000000002
        ((snapped * 1e6).round() / 1e6).clamp(min, max)
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Stroke color for new shapes, always `#rrggbb` lowercase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShapeColor(String);

impl ShapeColor {
    pub fn parse(input: &str) -> PlotboardResult<Self> {
        let trimmed = input.trim();
        let hex = trimmed.strip_prefix('#').ok_or_else(|| {
            PlotboardError::invalid_input("shapeColor", format!("'{trimmed}' must start with '#'"))
        })?;

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PlotboardError::invalid_input(
                "shapeColor",
                format!("'{trimmed}' is not a hex color"),
            ));
        }

        let expanded = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => hex.to_string(),
            _ => {
                return Err(PlotboardError::invalid_input(
                    "shapeColor",
                    format!("'{trimmed}' must have 3 or 6 hex digits"),
                ))
            }
        };

        Ok(Self(format!("#{}", expanded.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ShapeColor {
    fn default() -> Self {
        Self(DEFAULT_SHAPE_COLOR.to_string())
    }
}

impl fmt::Display for ShapeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ShapeColor {
    type Err = PlotboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ShapeColor {
    type Error = PlotboardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ShapeColor> for String {
    fn from(color: ShapeColor) -> Self {
        color.0
    }
}

/// Current state of the map page controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationParams {
    pub label_size: u8,
    pub node_size_multiplier: f64,
    pub drag_mode: DragMode,
    pub shape_color: ShapeColor,
}

impl Default for VisualizationParams {
    fn default() -> Self {
        Self {
            label_size: DEFAULT_LABEL_SIZE,
            node_size_multiplier: DEFAULT_NODE_SIZE,
            drag_mode: DragMode::Pan,
            shape_color: ShapeColor::default(),
        }
    }
}

impl VisualizationParams {
    /// Initial values taken from the configured control limits
    pub fn from_limits(limits: &ControlLimits) -> Self {
        Self {
            label_size: limits.clamp_label_size(limits.label_size_default as i64),
            node_size_multiplier: limits.clamp_node_size(limits.node_size_default),
            drag_mode: DragMode::Pan,
            shape_color: ShapeColor::parse(&limits.shape_color_default).unwrap_or_default(),
        }
    }
}
