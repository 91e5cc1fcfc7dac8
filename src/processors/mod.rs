pub mod data_merger;
pub mod district_aggregator;
pub mod integrity_checker;
pub mod pipeline;
pub mod store_filter;
pub mod view_builder;

pub use data_merger::DataMerger;
pub use district_aggregator::DistrictAggregator;
pub use integrity_checker::{IntegrityChecker, IntegrityReport};
pub use pipeline::SitePipeline;
pub use store_filter::{StoreFilter, StoreFilterStats};
pub use view_builder::ViewBuilder;
