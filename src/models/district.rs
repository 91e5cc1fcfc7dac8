use serde::{Deserialize, Serialize};

use crate::models::{AttractivenessRow, BrandCounts, BrandValues};
use crate::utils::numeric::{to_amount, to_count, to_score};

/// Summed sales figures for a district
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesFigures {
    pub monthly: f64,
    pub male: f64,
    pub female: f64,
    pub by_age: [f64; 6],
}

/// Brand/workforce rows grouped by (district code, district name)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictAggregate {
    pub dong_code: String,
    pub dong_name: String,
    /// MAX over the group; `None` when every row was missing
    pub brand_counts: BrandValues,
    pub total_workers: Option<f64>,
    pub female_workers: Option<f64>,
    /// SUM over the group; missing cells contribute nothing
    pub sales: SalesFigures,
}

/// Aggregated district left-joined with its attractiveness metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedDistrict {
    pub district: DistrictAggregate,
    pub attractiveness: Option<AttractivenessRow>,
}

impl MergedDistrict {
    pub fn is_matched(&self) -> bool {
        self.attractiveness.is_some()
    }

    fn metric(&self, pick: impl Fn(&AttractivenessRow) -> Option<f64>) -> Option<f64> {
        self.attractiveness.as_ref().and_then(pick)
    }
}

/// One `dong_data` entry of the dashboard document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictSummary {
    pub dong_code: String,
    pub dong_name: String,
    pub brands: BrandCounts,
    pub total_brand_count: u64,
    pub total_workers: u64,
    pub female_workers: u64,
    pub monthly_sales: f64,
    pub male_sales: f64,
    pub female_sales: f64,
    pub age_10: f64,
    pub age_20: f64,
    pub age_30: f64,
    pub age_40: f64,
    pub age_50: f64,
    pub age_60: f64,
    pub attractiveness_score: Option<f64>,
    pub demand_score: Option<f64>,
    pub competition_score: Option<f64>,
    pub cost_score: Option<f64>,
    pub cafe_count: u64,
    pub avg_price_per_m2: f64,
}

impl DistrictSummary {
    /// Map a merged row onto the display schema, applying the per-field
    /// missing-value policies.
    pub fn from_merged(merged: &MergedDistrict) -> Self {
        let district = &merged.district;

        let mut brands = BrandCounts::new();
        for brand in crate::models::Brand::ALL {
            brands.set(brand, to_count(district.brand_counts.get(brand)));
        }

        let sales = &district.sales;

        Self {
            dong_code: district.dong_code.clone(),
            dong_name: district.dong_name.clone(),
            total_brand_count: brands.total(),
            brands,
            total_workers: to_count(district.total_workers),
            female_workers: to_count(district.female_workers),
            monthly_sales: to_amount(Some(sales.monthly)),
            male_sales: to_amount(Some(sales.male)),
            female_sales: to_amount(Some(sales.female)),
            age_10: to_amount(Some(sales.by_age[0])),
            age_20: to_amount(Some(sales.by_age[1])),
            age_30: to_amount(Some(sales.by_age[2])),
            age_40: to_amount(Some(sales.by_age[3])),
            age_50: to_amount(Some(sales.by_age[4])),
            age_60: to_amount(Some(sales.by_age[5])),
            attractiveness_score: to_score(merged.metric(|a| a.attractiveness_score)),
            demand_score: to_score(merged.metric(|a| a.demand_score)),
            competition_score: to_score(merged.metric(|a| a.competition_score)),
            cost_score: to_score(merged.metric(|a| a.cost_score)),
            cafe_count: to_count(merged.metric(|a| a.cafe_count)),
            avg_price_per_m2: to_amount(merged.metric(|a| a.avg_price_per_m2)),
        }
    }

    pub fn age_sales(&self) -> [f64; 6] {
        [
            self.age_10,
            self.age_20,
            self.age_30,
            self.age_40,
            self.age_50,
            self.age_60,
        ]
    }
}
