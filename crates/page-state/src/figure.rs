//! Plotly figure description for the map page
//!
//! The browser host passes `data`, `layout` and `config` straight to its
//! plotting component. One scatter trace is emitted per record so every
//! bubble keeps its own label, size and color.

use plotboard_shared::{Record, Shape, VisualizationParams};
use serde::Serialize;
use serde_json::{json, Value};

/// Scale from record `Size` to marker pixels before the user multiplier
pub const MARKER_SCALE: f64 = 10.0;

/// Stroke width of newly drawn shapes
pub const NEW_SHAPE_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextFont {
    pub size: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub size: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    pub mode: &'static str,
    pub text: String,
    pub textposition: &'static str,
    pub textfont: TextFont,
    pub x: [f64; 1],
    pub y: [f64; 1],
    pub marker: Marker,
}

impl ScatterTrace {
    pub fn from_record(record: &Record, params: &VisualizationParams) -> Self {
        Self {
            trace_type: "scatter",
            mode: "markers+text",
            text: record.label.clone(),
            textposition: "top center",
            textfont: TextFont {
                size: params.label_size,
            },
            x: [record.x],
            y: [record.y],
            marker: Marker {
                size: record.size * MARKER_SCALE * params.node_size_multiplier,
                color: record.color.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotFigure {
    pub data: Vec<ScatterTrace>,
    pub layout: Value,
    pub config: Value,
}

impl PlotFigure {
    pub fn build(records: &[Record], params: &VisualizationParams, shapes: &[Shape]) -> Self {
        Self {
            data: records
                .iter()
                .map(|record| ScatterTrace::from_record(record, params))
                .collect(),
            layout: layout(params, shapes),
            config: config(),
        }
    }
}

fn layout(params: &VisualizationParams, shapes: &[Shape]) -> Value {
    json!({
        "showlegend": false,
        "xaxis": { "range": [0, 1], "title": "X Axis", "color": "white" },
        "yaxis": { "range": [0, 1], "title": "Y Axis", "color": "white" },
        "margin": { "l": 0, "r": 0, "b": 0, "t": 0 },
        "plot_bgcolor": "black",
        "shapes": shapes,
        "dragmode": params.drag_mode.as_str(),
        "newshape": {
            "line": {
                "color": params.shape_color.as_str(),
                "width": NEW_SHAPE_WIDTH,
            }
        },
    })
}

fn config() -> Value {
    json!({
        "responsive": true,
        "displayModeBar": true,
        "displaylogo": false,
        "scrollZoom": true,
        "modeBarButtonsToAdd": ["drawline", "drawopenpath", "drawcircle", "drawrect"],
        "modeBarButtonsToRemove": ["select2d", "lasso2d", "toggleSpikelines"],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotboard_shared::{DragMode, ShapeColor, ShapeKind};

    #[test]
    fn test_trace_per_record() {
        let records = vec![
            Record::new("a", 0.1, 0.2, 1.5, "#ff0000"),
            Record::new("b", 0.3, 0.4, 2.0, "#00ff00"),
        ];
        let params = VisualizationParams {
            label_size: 16,
            node_size_multiplier: 2.0,
            ..Default::default()
        };

        let figure = PlotFigure::build(&records, &params, &[]);
        assert_eq!(figure.data.len(), 2);
        assert_eq!(figure.data[0].marker.size, 30.0);
        assert_eq!(figure.data[1].textfont.size, 16);

        let json = serde_json::to_value(&figure).unwrap();
        assert_eq!(json["data"][0]["type"], "scatter");
        assert_eq!(json["data"][0]["mode"], "markers+text");
        assert_eq!(json["data"][0]["x"][0], 0.1);
        assert_eq!(json["data"][1]["marker"]["color"], "#00ff00");
    }

    #[test]
    fn test_layout_carries_shapes_and_drawing_state() {
        let params = VisualizationParams {
            drag_mode: DragMode::DrawRect,
            shape_color: ShapeColor::parse("#336699").unwrap(),
            ..Default::default()
        };
        let shapes = vec![Shape::boxed(ShapeKind::Rect, 0.1, 0.1, 0.5, 0.5, "#336699")];

        let figure = PlotFigure::build(&[], &params, &shapes);
        assert_eq!(figure.layout["dragmode"], "drawrect");
        assert_eq!(figure.layout["newshape"]["line"]["color"], "#336699");
        assert_eq!(figure.layout["newshape"]["line"]["width"], 2.0);
        assert_eq!(figure.layout["shapes"][0]["type"], "rect");
        assert_eq!(figure.layout["plot_bgcolor"], "black");
        assert_eq!(figure.config["displaylogo"], false);
    }
}
