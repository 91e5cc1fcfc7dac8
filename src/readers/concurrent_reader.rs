use rayon::ThreadPool;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::{ProcessingError, Result};
use crate::models::{AttractivenessRow, BrandWorkforceRow, StoreLocationRow};
use crate::readers::{
    AttractivenessReader, BrandMasterReader, ParsedRows, SourceKind, SourceLoader, SourceTable,
    StoreReader,
};

/// All four source tables, mapped to typed rows
#[derive(Debug, Clone)]
pub struct SourceData {
    pub brand_rows: ParsedRows<BrandWorkforceRow>,
    pub attractiveness: ParsedRows<AttractivenessRow>,
    pub stores_with_coords: ParsedRows<StoreLocationRow>,
    pub stores_with_brand: ParsedRows<StoreLocationRow>,
}

/// Loads the four independent sources on blocking tasks
pub struct ConcurrentReader {
    loader: Arc<SourceLoader>,
    pool: Arc<ThreadPool>,
}

impl ConcurrentReader {
    pub fn new(loader: SourceLoader, max_workers: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(max_workers)
            .build()
            .map_err(|e| ProcessingError::Config(e.to_string()))?;

        Ok(Self {
            loader: Arc::new(loader),
            pool: Arc::new(pool),
        })
    }

    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        let loader = SourceLoader::new()
            .with_encoding(&config.encoding)?
            .with_mmap_threshold(config.mmap_threshold_bytes);
        Self::new(loader, config.max_workers)
    }

    /// Read every source; any unreadable file or missing required column fails the whole read
    pub async fn read_all(&self, config: &PipelineConfig) -> Result<SourceData> {
        let brand_handle = self.spawn_read(
            SourceKind::BrandMaster,
            config.source_path(SourceKind::BrandMaster),
            |table| BrandMasterReader::new().read(table),
        );
        let attractiveness_handle = self.spawn_read(
            SourceKind::Attractiveness,
            config.source_path(SourceKind::Attractiveness),
            |table| AttractivenessReader::new().read(table),
        );
        let coords_handle = self.spawn_read(
            SourceKind::StoresWithCoords,
            config.source_path(SourceKind::StoresWithCoords),
            |table| StoreReader::with_coordinates().read(table),
        );
        let brand_stores_handle = self.spawn_read(
            SourceKind::StoresWithBrand,
            config.source_path(SourceKind::StoresWithBrand),
            |table| StoreReader::without_coordinates().read(table),
        );

        let (brand_rows, attractiveness, stores_with_coords, stores_with_brand) = tokio::try_join!(
            brand_handle,
            attractiveness_handle,
            coords_handle,
            brand_stores_handle
        )?;

        Ok(SourceData {
            brand_rows: brand_rows?,
            attractiveness: attractiveness?,
            stores_with_coords: stores_with_coords?,
            stores_with_brand: stores_with_brand?,
        })
    }

    fn spawn_read<T, F>(
        &self,
        kind: SourceKind,
        path: PathBuf,
        read: F,
    ) -> JoinHandle<Result<ParsedRows<T>>>
    where
        T: Send + 'static,
        F: FnOnce(&SourceTable) -> Result<ParsedRows<T>> + Send + 'static,
    {
        let loader = Arc::clone(&self.loader);
        let pool = Arc::clone(&self.pool);

        tokio::task::spawn_blocking(move || {
            let table = loader.load(kind, &path)?;
            let parsed = pool.install(|| read(&table))?;
            info!(
                "Loaded {}: {} rows from {}",
                kind,
                parsed.len(),
                path.display()
            );
            Ok(parsed)
        })
    }
}
