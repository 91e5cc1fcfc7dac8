use std::collections::BTreeMap;

use crate::models::{
    Brand, BrandStats, DashboardData, DistrictSummary, MergedDistrict, RecommendationCandidate,
    StorePoint,
};
use crate::utils::constants::{DEFAULT_RECOMMEND_CAP, SALES_UNIT_MANWON};

/// Derives the presentation collections of the dashboard document
pub struct ViewBuilder {
    recommend_cap: usize,
}

impl ViewBuilder {
    pub fn new() -> Self {
        Self {
            recommend_cap: DEFAULT_RECOMMEND_CAP,
        }
    }

    pub fn with_recommend_cap(mut self, cap: usize) -> Self {
        self.recommend_cap = cap;
        self
    }

    pub fn district_summaries(&self, merged: &[MergedDistrict]) -> Vec<DistrictSummary> {
        merged.iter().map(DistrictSummary::from_merged).collect()
    }

    pub fn brand_stats(
        &self,
        districts: &[DistrictSummary],
        points: &[StorePoint],
    ) -> BTreeMap<Brand, BrandStats> {
        Brand::ALL
            .into_iter()
            .map(|brand| (brand, Self::stats_for_brand(brand, districts, points)))
            .collect()
    }

    fn stats_for_brand(
        brand: Brand,
        districts: &[DistrictSummary],
        points: &[StorePoint],
    ) -> BrandStats {
        let mut total_stores = 0u64;
        let mut dong_count = 0u64;
        let mut sales_where_present = 0.0f64;

        for district in districts {
            let count = district.brands.get(brand);
            total_stores = total_stores.saturating_add(count);
            if count > 0 {
                dong_count += 1;
                sales_where_present += district.monthly_sales;
            }
        }

        let avg_monthly_sales = if total_stores > 0 {
            (sales_where_present / total_stores as f64 / SALES_UNIT_MANWON) as i64
        } else {
            0
        };

        BrandStats {
            color: brand.color().to_string(),
            total_stores,
            dong_count,
            map_count: points.iter().filter(|p| p.brand == brand).count() as u64,
            avg_monthly_sales,
        }
    }

    /// Every (scored district, absent brand) pair, highest attractiveness
    /// first, truncated to the configured cap. Ties keep district order,
    /// then brand order.
    pub fn recommendations(&self, districts: &[DistrictSummary]) -> Vec<RecommendationCandidate> {
        let mut candidates: Vec<RecommendationCandidate> = districts
            .iter()
            .flat_map(|district| {
                Brand::ALL
                    .into_iter()
                    .filter_map(move |brand| RecommendationCandidate::for_district(district, brand))
            })
            .collect();

        candidates.sort_by(|a, b| b.attractiveness_score.total_cmp(&a.attractiveness_score));
        candidates.truncate(self.recommend_cap);
        candidates
    }

    /// Assemble the full document
    pub fn build(&self, merged: &[MergedDistrict], points: Vec<StorePoint>) -> DashboardData {
        let dong_data = self.district_summaries(merged);
        let brand_stats = self.brand_stats(&dong_data, &points);
        let recommend_top = self.recommendations(&dong_data);

        DashboardData {
            brands: Brand::ALL.to_vec(),
            brand_colors: DashboardData::brand_colors(),
            brand_stats,
            dong_data,
            map_points: points,
            recommend_top,
        }
    }
}

impl Default for ViewBuilder {
    fn default() -> Self {
        Self::new()
    }
}
