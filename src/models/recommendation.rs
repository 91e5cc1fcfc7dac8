use serde::{Deserialize, Serialize};

use crate::models::{Brand, DistrictSummary};

/// A (district, brand) expansion opportunity: the brand has no store in
/// a district that carries an attractiveness score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationCandidate {
    pub dong_name: String,
    pub dong_code: String,
    pub brand: Brand,
    pub attractiveness_score: f64,
    pub demand_score: Option<f64>,
    pub competition_score: Option<f64>,
    pub cost_score: Option<f64>,
    pub total_workers: u64,
    pub monthly_sales: f64,
    pub cafe_count: u64,
}

impl RecommendationCandidate {
    /// `None` unless the district is scored and the brand is absent from it
    pub fn for_district(district: &DistrictSummary, brand: Brand) -> Option<Self> {
        let attractiveness_score = district.attractiveness_score?;
        if district.brands.has(brand) {
            return None;
        }

        Some(Self {
            dong_name: district.dong_name.clone(),
            dong_code: district.dong_code.clone(),
            brand,
            attractiveness_score,
            demand_score: district.demand_score,
            competition_score: district.competition_score,
            cost_score: district.cost_score,
            total_workers: district.total_workers,
            monthly_sales: district.monthly_sales,
            cafe_count: district.cafe_count,
        })
    }
}
