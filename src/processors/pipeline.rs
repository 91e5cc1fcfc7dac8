use tracing::info;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::DashboardData;
use crate::processors::{
    DataMerger, DistrictAggregator, IntegrityChecker, IntegrityReport, StoreFilter, ViewBuilder,
};
use crate::readers::{ConcurrentReader, SourceData};
use crate::utils::progress::ProgressReporter;

/// Runs ingest, merge and view building end to end
pub struct SitePipeline {
    config: PipelineConfig,
}

impl SitePipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load every source and build the dashboard document
    pub async fn process(
        &self,
        progress: Option<&ProgressReporter>,
    ) -> Result<(DashboardData, IntegrityReport)> {
        if let Some(p) = progress {
            p.stage("Reading source tables...");
        }

        let reader = ConcurrentReader::from_config(&self.config)?;
        let sources = reader.read_all(&self.config).await?;

        let result = self.build(&sources, progress);

        if let Some(p) = progress {
            p.finish_with_message("Processing complete");
        }

        Ok(result)
    }

    /// Build the document from already loaded sources. Pure in its inputs.
    pub fn build(
        &self,
        sources: &SourceData,
        progress: Option<&ProgressReporter>,
    ) -> (DashboardData, IntegrityReport) {
        if let Some(p) = progress {
            p.stage("Aggregating districts...");
        }
        let districts = DistrictAggregator::new().aggregate(&sources.brand_rows.rows);
        info!(
            "Aggregated {} brand rows into {} districts",
            sources.brand_rows.len(),
            districts.len()
        );

        if let Some(p) = progress {
            p.stage("Joining attractiveness metrics...");
        }
        let merged = DataMerger::new().merge(districts, &sources.attractiveness.rows);

        if let Some(p) = progress {
            p.stage("Filtering store locations...");
        }
        let (points, filter_stats) = StoreFilter::new().filter(&sources.stores_with_coords.rows);
        info!(
            "Kept {} of {} located store rows",
            filter_stats.kept, filter_stats.total_rows
        );

        if let Some(p) = progress {
            p.stage("Building dashboard views...");
        }
        let dashboard = ViewBuilder::new()
            .with_recommend_cap(self.config.recommend_cap)
            .build(&merged, points);
        info!(
            "Built {} district rows, {} map points, {} recommendations",
            dashboard.dong_data.len(),
            dashboard.map_points.len(),
            dashboard.recommend_top.len()
        );

        if let Some(p) = progress {
            p.stage("Checking data integrity...");
        }
        let report =
            IntegrityChecker::new().check_integrity(sources, &merged, filter_stats, &dashboard);

        (dashboard, report)
    }
}
