use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Brand, DistrictSummary, RecommendationCandidate, StorePoint};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandStats {
    pub color: String,
    /// Sum of the brand's per-district (MAX-aggregated) store counts
    pub total_stores: u64,
    /// Districts with at least one store of the brand
    pub dong_count: u64,
    /// Located store points of the brand
    pub map_count: u64,
    /// Sales over districts where the brand is present, per store, in 10,000 KRW.
    /// District sales are not brand-attributed, so this is a coarse signal.
    pub avg_monthly_sales: i64,
}

/// The document consumed by the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub brands: Vec<Brand>,
    pub brand_colors: BTreeMap<Brand, String>,
    pub brand_stats: BTreeMap<Brand, BrandStats>,
    pub dong_data: Vec<DistrictSummary>,
    pub map_points: Vec<StorePoint>,
    pub recommend_top: Vec<RecommendationCandidate>,
}

impl DashboardData {
    pub fn brand_colors() -> BTreeMap<Brand, String> {
        Brand::ALL
            .into_iter()
            .map(|b| (b, b.color().to_string()))
            .collect()
    }

    pub fn stats(&self, brand: Brand) -> Option<&BrandStats> {
        self.brand_stats.get(&brand)
    }

    pub fn district(&self, dong_code: &str) -> Option<&DistrictSummary> {
        self.dong_data.iter().find(|d| d.dong_code == dong_code)
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str(&format!("Districts: {}\n", self.dong_data.len()));
        summary.push_str(&format!("Store points: {}\n", self.map_points.len()));
        summary.push_str(&format!(
            "Recommendation candidates: {}\n",
            self.recommend_top.len()
        ));
        summary
    }
}
