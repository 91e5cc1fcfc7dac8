//! Pipeline configuration
//!
//! Layered: built-in defaults, then an optional TOML file, then
//! `CAFE_SITE_*` environment variables. CLI flags are applied on top by
//! the command layer.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::error::Result;
use crate::readers::SourceKind;
use crate::utils::constants::{
    ATTRACTIVENESS_FILE, BRAND_MASTER_FILE, DEFAULT_ENCODING, DEFAULT_MMAP_THRESHOLD,
    DEFAULT_RECOMMEND_CAP, ENV_PREFIX, STORES_WITH_BRAND_FILE, STORES_WITH_COORDS_FILE,
};
use crate::utils::default_dashboard_path;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PipelineConfig {
    /// Directory holding the four source tables
    pub data_dir: PathBuf,

    #[validate(length(min = 1))]
    pub brand_master_file: String,

    #[validate(length(min = 1))]
    pub attractiveness_file: String,

    #[validate(length(min = 1))]
    pub stores_with_coords_file: String,

    #[validate(length(min = 1))]
    pub stores_with_brand_file: String,

    /// Dashboard document path; defaults to `dashboard_data.json` beside `data_dir`
    #[serde(default)]
    pub output_file: Option<PathBuf>,

    /// Text encoding label of the source tables (e.g. `utf-8`, `euc-kr`)
    #[validate(length(min = 1))]
    pub encoding: String,

    /// Maximum number of recommendation candidates kept in the document
    #[validate(range(min = 1))]
    pub recommend_cap: usize,

    /// Files at or above this size are memory-mapped
    pub mmap_threshold_bytes: u64,

    #[validate(range(min = 1))]
    pub max_workers: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            brand_master_file: BRAND_MASTER_FILE.to_string(),
            attractiveness_file: ATTRACTIVENESS_FILE.to_string(),
            stores_with_coords_file: STORES_WITH_COORDS_FILE.to_string(),
            stores_with_brand_file: STORES_WITH_BRAND_FILE.to_string(),
            output_file: None,
            encoding: DEFAULT_ENCODING.to_string(),
            recommend_cap: DEFAULT_RECOMMEND_CAP,
            mmap_threshold_bytes: DEFAULT_MMAP_THRESHOLD,
            max_workers: num_cpus::get(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("data_dir", defaults.data_dir.to_string_lossy().to_string())?
            .set_default("brand_master_file", defaults.brand_master_file)?
            .set_default("attractiveness_file", defaults.attractiveness_file)?
            .set_default("stores_with_coords_file", defaults.stores_with_coords_file)?
            .set_default("stores_with_brand_file", defaults.stores_with_brand_file)?
            .set_default("encoding", defaults.encoding)?
            .set_default("recommend_cap", defaults.recommend_cap as i64)?
            .set_default("mmap_threshold_bytes", defaults.mmap_threshold_bytes as i64)?
            .set_default("max_workers", defaults.max_workers as i64)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let pipeline_config: PipelineConfig = config.try_deserialize()?;
        pipeline_config.validate()?;

        Ok(pipeline_config)
    }

    pub fn source_path(&self, kind: SourceKind) -> PathBuf {
        let file_name = match kind {
            SourceKind::BrandMaster => &self.brand_master_file,
            SourceKind::Attractiveness => &self.attractiveness_file,
            SourceKind::StoresWithCoords => &self.stores_with_coords_file,
            SourceKind::StoresWithBrand => &self.stores_with_brand_file,
        };
        self.data_dir.join(file_name)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_file
            .clone()
            .unwrap_or_else(|| default_dashboard_path(&self.data_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.recommend_cap, 200);
        assert_eq!(
            config.source_path(SourceKind::Attractiveness),
            PathBuf::from("data/seoul_dong_attractiveness.csv")
        );
        assert_eq!(config.output_path(), PathBuf::from("dashboard_data.json"));
    }

    #[test]
    fn test_zero_cap_is_rejected() {
        let config = PipelineConfig {
            recommend_cap: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml_file() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "data_dir = \"/srv/cafe/data\"")?;
        writeln!(file, "recommend_cap = 50")?;
        writeln!(file, "encoding = \"euc-kr\"")?;

        let config = PipelineConfig::load(Some(file.path()))?;

        assert_eq!(config.data_dir, PathBuf::from("/srv/cafe/data"));
        assert_eq!(config.recommend_cap, 50);
        assert_eq!(config.encoding, "euc-kr");
        assert_eq!(config.brand_master_file, BRAND_MASTER_FILE);
        assert_eq!(
            config.output_path(),
            PathBuf::from("/srv/cafe/dashboard_data.json")
        );

        Ok(())
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().with_extension("missing.toml");
        assert!(PipelineConfig::load(Some(&path)).is_err());
    }
}
