use chrono::{Datelike, Local};
use std::path::{Path, PathBuf};

use crate::utils::constants::DASHBOARD_FILE;

/// Default dashboard document location: `dashboard_data.json` next to the data directory
pub fn default_dashboard_path(data_dir: &Path) -> PathBuf {
    match data_dir.parent() {
        Some(parent) => parent.join(DASHBOARD_FILE),
        None => PathBuf::from(DASHBOARD_FILE),
    }
}

/// Generate default district export filename with format: dong-summary-{YYMMDD}.parquet
pub fn generate_default_parquet_filename() -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let filename = format!("dong-summary-{:02}{:02}{:02}.parquet", year, month, day);
    PathBuf::from("output").join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dashboard_path() {
        let path = default_dashboard_path(Path::new("project/data"));
        assert_eq!(path, PathBuf::from("project/dashboard_data.json"));
    }

    #[test]
    fn test_generate_default_parquet_filename() {
        let filename = generate_default_parquet_filename();
        let filename_str = filename.to_string_lossy();

        assert!(filename_str.starts_with("output/"));

        let parts: Vec<&str> = filename_str.split('/').collect();
        assert_eq!(parts.len(), 2);

        let file_part = parts[1];
        assert!(file_part.starts_with("dong-summary-"));
        assert!(file_part.ends_with(".parquet"));
        assert_eq!(file_part.len(), "dong-summary-YYMMDD.parquet".len());
    }
}
