use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{ProcessingError, Result};
use crate::models::DashboardData;

/// Writes and reads the dashboard document as pretty-printed UTF-8 JSON
pub struct DashboardWriter;

impl DashboardWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write the document, creating parent directories as needed
    pub fn write(&self, data: &DashboardData, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, data)?;
        writer.flush()?;

        info!("Wrote dashboard document to {}", path.display());
        Ok(())
    }

    /// Serialize to a string; used for comparing runs
    pub fn render(&self, data: &DashboardData) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }

    /// Load a document for display. A missing or malformed file is
    /// reported as unavailable data, never as a partial document.
    pub fn read(&self, path: &Path) -> Result<DashboardData> {
        let file = File::open(path).map_err(|e| {
            ProcessingError::DataUnavailable(format!("{}: {}", path.display(), e))
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            ProcessingError::DataUnavailable(format!("{}: {}", path.display(), e))
        })
    }

    pub fn get_file_info(&self, path: &Path) -> Result<DashboardFileInfo> {
        let metadata = std::fs::metadata(path)?;
        let modified = metadata.modified().ok().map(DateTime::<Local>::from);

        Ok(DashboardFileInfo {
            path: path.to_path_buf(),
            file_size: metadata.len(),
            modified,
        })
    }
}

impl Default for DashboardWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct DashboardFileInfo {
    pub path: PathBuf,
    pub file_size: u64,
    pub modified: Option<DateTime<Local>>,
}

impl DashboardFileInfo {
    pub fn summary(&self) -> String {
        let modified = self
            .modified
            .map(|m| m.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown".to_string());

        format!(
            "Dashboard File Summary:\n\
            - Path: {}\n\
            - File size: {:.1} KB\n\
            - Modified: {}",
            self.path.display(),
            self.file_size as f64 / 1024.0,
            modified
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Brand, StorePoint};
    use crate::processors::ViewBuilder;
    use tempfile::TempDir;

    fn sample() -> DashboardData {
        let points = vec![StorePoint::new(
            Brand::Paik,
            "빽다방 종로점".to_string(),
            37.57,
            126.98,
            "11110615".to_string(),
        )];
        ViewBuilder::new().build(&[], points)
    }

    #[test]
    fn test_write_then_read() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("dashboard_data.json");
        let writer = DashboardWriter::new();

        let data = sample();
        writer.write(&data, &path)?;

        let text = std::fs::read_to_string(&path)?;
        assert!(text.contains("빽다방 종로점"));
        assert!(!text.contains("\\u"));

        let loaded = writer.read(&path)?;
        assert_eq!(loaded, data);
        Ok(())
    }

    #[test]
    fn test_missing_document_is_unavailable() {
        let result = DashboardWriter::new().read(Path::new("/nonexistent/dashboard_data.json"));
        assert!(matches!(result, Err(ProcessingError::DataUnavailable(_))));
    }

    #[test]
    fn test_malformed_document_is_unavailable() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("dashboard_data.json");
        std::fs::write(&path, "{\"brands\": [")?;

        let result = DashboardWriter::new().read(&path);
        assert!(matches!(result, Err(ProcessingError::DataUnavailable(_))));
        Ok(())
    }
}
