//! Remote record and pagination types

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::PlotboardError;

/// One data point served by `/api/data`
///
/// Field names are capitalized on the wire. Numeric fields arrive either as
/// JSON numbers or numeric strings; strings that do not parse become NaN,
/// which the plotting layer skips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Label")]
    pub label: String,
    #[serde(rename = "X", deserialize_with = "lenient_f64")]
    pub x: f64,
    #[serde(rename = "Y", deserialize_with = "lenient_f64")]
    pub y: f64,
    #[serde(rename = "Size", deserialize_with = "lenient_f64")]
    pub size: f64,
    #[serde(rename = "Color")]
    pub color: String,
}

impl Record {
    pub fn new(label: &str, x: f64, y: f64, size: f64, color: &str) -> Self {
        Self {
            label: label.to_string(),
            x,
            y,
            size,
            color: color.to_string(),
        }
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    Ok(match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n,
        NumberOrString::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
    })
}

/// Body of a `/api/data` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPage {
    pub data: Vec<Record>,
    pub total_pages: u32,
}

/// Data endpoints selectable from the map page buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Endpoint {
    #[default]
    Primary,
    ButtonTwo,
    ButtonThree,
}

impl Endpoint {
    /// Path suffix appended to the data route
    pub fn as_path(&self) -> &'static str {
        match self {
            Endpoint::Primary => "",
            Endpoint::ButtonTwo => "/buttontwo",
            Endpoint::ButtonThree => "/buttonthree",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Primary => write!(f, "/"),
            _ => write!(f, "{}", self.as_path()),
        }
    }
}

impl FromStr for Endpoint {
    type Err = PlotboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('/') {
            "" => Ok(Endpoint::Primary),
            "buttontwo" => Ok(Endpoint::ButtonTwo),
            "buttonthree" => Ok(Endpoint::ButtonThree),
            other => Err(PlotboardError::invalid_input(
                "endpoint",
                format!("unknown data endpoint '{other}'"),
            )),
        }
    }
}

/// Position in the paginated record stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationCursor {
    pub page: u32,
    pub total_pages: u32,
    pub endpoint: Endpoint,
}

impl Default for PaginationCursor {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
            endpoint: Endpoint::Primary,
        }
    }
}

impl PaginationCursor {
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    /// Start over on a different endpoint
    pub fn reset(&mut self, endpoint: Endpoint) {
        self.page = 1;
        self.endpoint = endpoint;
    }

    /// Move to the next page, returning it, or `None` when exhausted
    pub fn advance(&mut self) -> Option<u32> {
        if !self.has_more() {
            return None;
        }
        self.page += 1;
        Some(self.page)
    }

    /// Store a server-reported page count; zero is treated as one page
    pub fn set_total_pages(&mut self, total_pages: u32) {
        self.total_pages = total_pages.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accepts_numeric_strings() {
        let json = r##"{"Label":"a","X":"0.25","Y":0.5,"Size":"2","Color":"#ff0000"}"##;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.x, 0.25);
        assert_eq!(record.y, 0.5);
        assert_eq!(record.size, 2.0);
        assert_eq!(record.color, "#ff0000");
    }

    #[test]
    fn test_record_unparsable_number_is_nan() {
        let json = r#"{"Label":"a","X":"n/a","Y":1,"Size":1,"Color":"red"}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert!(record.x.is_nan());
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Primary.as_path(), "");
        assert_eq!(Endpoint::ButtonTwo.as_path(), "/buttontwo");
        assert_eq!("/buttonthree".parse::<Endpoint>().unwrap(), Endpoint::ButtonThree);
        assert_eq!("".parse::<Endpoint>().unwrap(), Endpoint::Primary);
        assert!("/buttonfour".parse::<Endpoint>().is_err());
    }

    #[test]
    fn test_cursor_advance() {
        let mut cursor = PaginationCursor::default();
        assert_eq!(cursor.advance(), None);

        cursor.set_total_pages(3);
        assert_eq!(cursor.advance(), Some(2));
        assert_eq!(cursor.advance(), Some(3));
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.page, 3);

        cursor.reset(Endpoint::ButtonTwo);
        assert_eq!(cursor.page, 1);
        assert_eq!(cursor.endpoint, Endpoint::ButtonTwo);
    }

    #[test]
    fn test_zero_total_pages_clamped() {
        let mut cursor = PaginationCursor::default();
        cursor.set_total_pages(0);
        assert_eq!(cursor.total_pages, 1);
    }
}
