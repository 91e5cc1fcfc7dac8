pub mod brand;
pub mod dashboard;
pub mod district;
pub mod recommendation;
pub mod source;
pub mod store;

pub use brand::{Brand, BrandCounts};
pub use dashboard::{BrandStats, DashboardData};
pub use district::{DistrictAggregate, DistrictSummary, MergedDistrict, SalesFigures};
pub use recommendation::RecommendationCandidate;
pub use source::{AttractivenessRow, BrandValues, BrandWorkforceRow, SalesCells, StoreLocationRow};
pub use store::StorePoint;
