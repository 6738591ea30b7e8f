use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Tool configuration supplied by the host. Every key is optional.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableConfig {
    /// Initial row count of an empty table
    pub rows: Option<i64>,
    /// Initial column count of an empty table
    pub cols: Option<i64>,
    pub maxrows: Option<usize>,
    pub maxcols: Option<usize>,
    /// Quick-pick list for cell backgrounds
    pub preset_colors: Vec<String>,
    /// Heading row default when saved data doesn't say
    pub with_headings: Option<bool>,
    pub stretched: Option<bool>,
}

impl TableConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from disk; `.json` files are read as JSON, anything else as TOML
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }

    /// Configured initial row count, ignoring non-positive values
    pub fn initial_rows(&self) -> Option<usize> {
        self.rows.filter(|&n| n > 0).map(|n| n as usize)
    }

    pub fn initial_cols(&self) -> Option<usize> {
        self.cols.filter(|&n| n > 0).map(|n| n as usize)
    }

    /// Row limit; zero means unlimited
    pub fn max_rows(&self) -> Option<usize> {
        self.maxrows.filter(|&n| n > 0)
    }

    pub fn max_cols(&self) -> Option<usize> {
        self.maxcols.filter(|&n| n > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn toml_keys_match_host_names() {
        let config = TableConfig::from_toml_str(
            r##"
rows = 3
cols = 4
maxrows = 10
presetColors = ["#fff", "#000"]
withHeadings = true
"##,
        )
        .unwrap();
        assert_eq!(config.initial_rows(), Some(3));
        assert_eq!(config.initial_cols(), Some(4));
        assert_eq!(config.max_rows(), Some(10));
        assert_eq!(config.max_cols(), None);
        assert_eq!(config.preset_colors, vec!["#fff", "#000"]);
        assert_eq!(config.with_headings, Some(true));
    }

    #[test]
    fn non_positive_sizes_are_ignored() {
        let config = TableConfig::from_json_str(r#"{"rows": 0, "cols": -2, "maxcols": 0}"#).unwrap();
        assert_eq!(config.initial_rows(), None);
        assert_eq!(config.initial_cols(), None);
        assert_eq!(config.max_cols(), None);
    }

    #[test]
    fn from_file_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("table.toml");
        let mut file = std::fs::File::create(&toml_path).unwrap();
        writeln!(file, "maxcols = 5").unwrap();
        assert_eq!(TableConfig::from_file(&toml_path).unwrap().max_cols(), Some(5));

        let json_path = dir.path().join("table.json");
        std::fs::write(&json_path, r#"{"maxcols": 6}"#).unwrap();
        assert_eq!(TableConfig::from_file(&json_path).unwrap().max_cols(), Some(6));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TableConfig::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, crate::error::TableError::Io(_)));
    }
}
