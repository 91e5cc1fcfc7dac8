pub mod dashboard_views;

pub use dashboard_views::{
    BrandCard, DashboardOverview, DashboardViews, DistrictQuery, DistrictSortKey, DistrictView,
    MapView, RecommendQuery, RecommendSortKey,
};
