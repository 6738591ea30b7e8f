use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use tableblock::data::TableData;
use tableblock::error::Result;

/// Result of loading a block file, including any warnings
pub struct LoadResult {
    /// `None` for a file that doesn't exist yet
    pub data: Option<TableData>,
    pub warnings: Vec<String>,
}

pub struct FileIO {
    pub file_path: Option<PathBuf>,
}

impl FileIO {
    pub fn new(file_path: Option<PathBuf>) -> Self {
        Self { file_path }
    }

    pub fn file_name(&self) -> String {
        self.file_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    }

    /// Read saved block data
    pub fn load(&self) -> Result<LoadResult> {
        let Some(path) = self.file_path.as_ref() else {
            return Ok(LoadResult {
                data: None,
                warnings: Vec::new(),
            });
        };

        if !path.exists() {
            return Ok(LoadResult {
                data: None,
                warnings: vec![format!("New file: {}", path.display())],
            });
        }

        let reader = BufReader::new(File::open(path)?);
        let data: TableData = serde_json::from_reader(reader)?;

        let mut warnings = Vec::new();
        if let Some((_, cols)) = data.dimensions() {
            let short = data.content.iter().filter(|row| row.len() < cols).count();
            if short > 0 {
                warnings.push(format!("Padded {} short row(s) to {} columns", short, cols));
            }
        }

        Ok(LoadResult {
            data: Some(data),
            warnings,
        })
    }

    pub fn write(&self, data: &TableData) -> Result<()> {
        let path = self
            .file_path
            .as_ref()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "No file path specified"))?;

        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "{}", data.to_json_pretty()?)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_is_new() {
        let dir = tempfile::tempdir().unwrap();
        let file_io = FileIO::new(Some(dir.path().join("fresh.json")));
        let result = file_io.load().unwrap();
        assert!(result.data.is_none());
        assert!(result.warnings[0].starts_with("New file"));
    }

    #[test]
    fn test_padding_warning() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        writeln!(file, r#"{{"content": [["a","b","c"],["1","2"]]}}"#).unwrap();

        let result = FileIO::new(Some(file.path().to_path_buf())).load().unwrap();
        assert_eq!(result.data.unwrap().dimensions(), Some((2, 3)));
        assert!(result.warnings[0].contains("Padded"));
    }

    #[test]
    fn test_write_then_load() {
        let file = NamedTempFile::with_suffix(".json").unwrap();
        let file_io = FileIO::new(Some(file.path().to_path_buf()));
        let data = TableData::from_json(r#"{"withHeadings":true,"content":[["x"]]}"#).unwrap();
        file_io.write(&data).unwrap();
        assert_eq!(file_io.load().unwrap().data, Some(data));
    }

    #[test]
    fn test_write_without_path_fails() {
        assert!(FileIO::new(None).write(&TableData::default()).is_err());
    }
}
