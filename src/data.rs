//! Persisted block data.
//!
//! ```json
//! { "withHeadings": true,
//!   "content": [["plain", { "content": "rich", "backgroundColor": "#fee", "width": 1.5 }]],
//!   "stretched": false }
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::table::Cell;

/// A saved cell: bare HTML when it carries nothing else, an object otherwise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellData {
    Text(String),
    Rich {
        content: String,
        #[serde(rename = "backgroundColor", default, skip_serializing_if = "Option::is_none")]
        background_color: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_width")]
        width: Option<f64>,
    },
}

impl CellData {
    pub fn content(&self) -> &str {
        match self {
            CellData::Text(content) => content,
            CellData::Rich { content, .. } => content,
        }
    }

    pub fn background_color(&self) -> Option<&str> {
        match self {
            CellData::Text(_) => None,
            CellData::Rich { background_color, .. } => background_color.as_deref(),
        }
    }

    pub fn width(&self) -> Option<f64> {
        match self {
            CellData::Text(_) => None,
            CellData::Rich { width, .. } => *width,
        }
    }
}

impl From<&Cell> for CellData {
    fn from(cell: &Cell) -> Self {
        if cell.background_color.is_none() && cell.width.is_none() {
            return CellData::Text(cell.content.clone());
        }
        CellData::Rich {
            content: cell.content.clone(),
            background_color: cell.background_color.clone(),
            width: cell.width,
        }
    }
}

impl From<&str> for CellData {
    fn from(content: &str) -> Self {
        CellData::Text(content.to_string())
    }
}

/// Older saves wrote widths as strings ("1.2"); accept both, drop garbage
fn lenient_width<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Width {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Width>::deserialize(deserializer)? {
        Some(Width::Number(w)) => Some(w),
        Some(Width::Text(s)) => s.trim().parse().ok(),
        None => None,
    }
    .filter(|w: &f64| w.is_finite() && *w > 0.0))
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableData {
    #[serde(default)]
    pub with_headings: bool,
    #[serde(default)]
    pub content: Vec<Vec<CellData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stretched: Option<bool>,
}

impl TableData {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of rows and the widest row, or `None` when there is no content
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        if self.content.is_empty() {
            return None;
        }
        let cols = self.content.iter().map(Vec::len).max().unwrap_or(0);
        Some((self.content.len(), cols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_rich_cells_decode() {
        let data = TableData::from_json(
            r##"{"withHeadings":true,"content":[["a",{"content":"b","backgroundColor":"#abc","width":2}]]}"##,
        )
        .unwrap();
        assert!(data.with_headings);
        assert_eq!(data.content[0][0], CellData::Text("a".into()));
        assert_eq!(data.content[0][1].background_color(), Some("#abc"));
        assert_eq!(data.content[0][1].width(), Some(2.0));
        assert_eq!(data.stretched, None);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let data = TableData::from_json("{}").unwrap();
        assert!(!data.with_headings);
        assert!(data.content.is_empty());
        assert_eq!(data.dimensions(), None);
    }

    #[test]
    fn string_width_is_accepted() {
        let data = TableData::from_json(r#"{"content":[[{"content":"x","width":"1.3"}]]}"#).unwrap();
        assert_eq!(data.content[0][0].width(), Some(1.3));

        let data = TableData::from_json(r#"{"content":[[{"content":"x","width":"wide"}]]}"#).unwrap();
        assert_eq!(data.content[0][0].width(), None);
    }

    #[test]
    fn bare_cell_serializes_as_string() {
        let cell = Cell::with_content("hi");
        assert_eq!(serde_json::to_string(&CellData::from(&cell)).unwrap(), r#""hi""#);

        let mut cell = Cell::with_content("hi");
        cell.width = Some(1.5);
        assert_eq!(
            serde_json::to_string(&CellData::from(&cell)).unwrap(),
            r#"{"content":"hi","width":1.5}"#
        );
    }

    #[test]
    fn dimensions_use_widest_row() {
        let data = TableData {
            content: vec![vec!["a".into()], vec!["b".into(), "c".into(), "d".into()]],
            ..TableData::default()
        };
        assert_eq!(data.dimensions(), Some((2, 3)));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(TableData::from_json("{\"content\": 5}").is_err());
    }
}
