//! Annotation shapes and chart interaction modes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::PlotboardError;

/// Geometry family of a drawn annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Line,
    Circle,
    Rect,
    Path,
}

/// Stroke style of a shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
}

/// A drawn annotation as reported by the chart editing layer
///
/// Fields not modelled here (`xref`, `opacity`, `editable`, ...) are kept in
/// `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x0: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y0: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub line: LineStyle,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Shape {
    /// Shape spanning a bounding box (`line`, `circle`, `rect`)
    pub fn boxed(kind: ShapeKind, x0: f64, y0: f64, x1: f64, y1: f64, color: &str) -> Self {
        Self {
            kind,
            x0: Some(x0),
            y0: Some(y0),
            x1: Some(x1),
            y1: Some(y1),
            path: None,
            line: LineStyle {
                color: Some(color.to_string()),
                width: Some(2.0),
                dash: None,
            },
            extra: serde_json::Map::new(),
        }
    }

    /// Freehand shape described by an SVG path
    pub fn freehand(path: &str, color: &str) -> Self {
        Self {
            kind: ShapeKind::Path,
            x0: None,
            y0: None,
            x1: None,
            y1: None,
            path: Some(path.to_string()),
            line: LineStyle {
                color: Some(color.to_string()),
                width: Some(2.0),
                dash: None,
            },
            extra: serde_json::Map::new(),
        }
    }
}

/// What a drag gesture does on the chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragMode {
    #[default]
    #[serde(rename = "pan")]
    Pan,
    #[serde(rename = "drawline")]
    DrawLine,
    #[serde(rename = "drawcircle")]
    DrawCircle,
    #[serde(rename = "drawrect")]
    DrawRect,
    #[serde(rename = "drawopenpath")]
    DrawPath,
}

impl DragMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DragMode::Pan => "pan",
            DragMode::DrawLine => "drawline",
            DragMode::DrawCircle => "drawcircle",
            DragMode::DrawRect => "drawrect",
            DragMode::DrawPath => "drawopenpath",
        }
    }
}

impl fmt::Display for DragMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DragMode {
    type Err = PlotboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pan" => Ok(DragMode::Pan),
            "drawline" => Ok(DragMode::DrawLine),
            "drawcircle" => Ok(DragMode::DrawCircle),
            "drawrect" => Ok(DragMode::DrawRect),
            "drawopenpath" => Ok(DragMode::DrawPath),
            other => Err(PlotboardError::invalid_input(
                "dragmode",
                format!("unsupported drag mode '{other}'"),
            )),
        }
    }
}

/// Payload of the chart's relayout callback
///
/// Only whole-set `shapes` updates and `dragmode` changes are meaningful to
/// the page; axis ranges and partial `shapes[i].x0` keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelayoutEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shapes: Option<Vec<Shape>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dragmode: Option<serde_json::Value>,
}

impl RelayoutEvent {
    pub fn shapes(shapes: Vec<Shape>) -> Self {
        Self {
            shapes: Some(shapes),
            dragmode: None,
        }
    }

    pub fn dragmode(mode: &str) -> Self {
        Self {
            shapes: None,
            dragmode: Some(serde_json::Value::String(mode.to_string())),
        }
    }

    /// Drag mode named by the event, if it carried a string one
    pub fn dragmode_str(&self) -> Option<&str> {
        self.dragmode.as_ref().and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_preserves_unknown_fields() {
        let json = r##"{"type":"rect","x0":0.1,"y0":0.2,"x1":0.3,"y1":0.4,"xref":"x","line":{"color":"#00ff00","width":2}}"##;
        let shape: Shape = serde_json::from_str(json).unwrap();
        assert_eq!(shape.kind, ShapeKind::Rect);
        assert_eq!(shape.line.color.as_deref(), Some("#00ff00"));
        assert_eq!(shape.extra.get("xref").and_then(|v| v.as_str()), Some("x"));

        let back = serde_json::to_value(&shape).unwrap();
        assert_eq!(back["xref"], "x");
        assert_eq!(back["type"], "rect");
    }

    #[test]
    fn test_freehand_shape_json() {
        let shape = Shape::freehand("M0.1,0.1L0.2,0.3", "#ff0000");
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["type"], "path");
        assert_eq!(json["path"], "M0.1,0.1L0.2,0.3");
        assert_eq!(json["line"]["color"], "#ff0000");
        assert!(json.get("x0").is_none());
    }

    #[test]
    fn test_relayout_event_partial_keys_ignored() {
        let json = r#"{"xaxis.range[0]":0.1,"dragmode":"drawline"}"#;
        let event: RelayoutEvent = serde_json::from_str(json).unwrap();
        assert!(event.shapes.is_none());
        assert_eq!(event.dragmode_str(), Some("drawline"));
    }

    #[test]
    fn test_drag_mode_names() {
        for mode in [
            DragMode::Pan,
            DragMode::DrawLine,
            DragMode::DrawCircle,
            DragMode::DrawRect,
            DragMode::DrawPath,
        ] {
            assert_eq!(mode.as_str().parse::<DragMode>().unwrap(), mode);
        }
        assert!("lasso".parse::<DragMode>().is_err());
    }
}
