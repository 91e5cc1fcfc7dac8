//! Read-only queries over a loaded dashboard document.
//!
//! These reproduce the dashboard's filters: district drill-down,
//! recommendation list, map brand selection and the brand overview.

use clap::ValueEnum;
use std::cmp::Ordering;

use crate::models::{Brand, BrandStats, DashboardData, DistrictSummary, RecommendationCandidate, StorePoint};
use crate::utils::constants::{DEFAULT_DISTRICT_VIEW_LIMIT, DEFAULT_RECOMMEND_VIEW_LIMIT};

const TOP_DISTRICTS: usize = 30;
const HUNDRED_MILLION_WON: f64 = 1e8;

/// Descending order with missing values after every present one
fn descending_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn matches_search(name: &str, search: Option<&str>) -> bool {
    match search {
        Some(term) if !term.is_empty() => name.contains(term),
        _ => true,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum DistrictSortKey {
    #[default]
    TotalBrandCount,
    AttractivenessScore,
    MonthlySales,
    TotalWorkers,
}

impl DistrictSortKey {
    fn value(&self, district: &DistrictSummary) -> Option<f64> {
        match self {
            DistrictSortKey::TotalBrandCount => Some(district.total_brand_count as f64),
            DistrictSortKey::AttractivenessScore => district.attractiveness_score,
            DistrictSortKey::MonthlySales => Some(district.monthly_sales),
            DistrictSortKey::TotalWorkers => Some(district.total_workers as f64),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum RecommendSortKey {
    #[default]
    AttractivenessScore,
    DemandScore,
    CostScore,
}

impl RecommendSortKey {
    fn value(&self, candidate: &RecommendationCandidate) -> Option<f64> {
        match self {
            RecommendSortKey::AttractivenessScore => Some(candidate.attractiveness_score),
            RecommendSortKey::DemandScore => candidate.demand_score,
            RecommendSortKey::CostScore => candidate.cost_score,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DistrictQuery {
    pub search: Option<String>,
    /// Keep only districts where this brand has at least one store
    pub brand: Option<Brand>,
    pub sort_by: DistrictSortKey,
    pub limit: usize,
}

impl Default for DistrictQuery {
    fn default() -> Self {
        Self {
            search: None,
            brand: None,
            sort_by: DistrictSortKey::default(),
            limit: DEFAULT_DISTRICT_VIEW_LIMIT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecommendQuery {
    pub brand: Option<Brand>,
    pub search: Option<String>,
    pub sort_by: RecommendSortKey,
    pub limit: usize,
}

impl Default for RecommendQuery {
    fn default() -> Self {
        Self {
            brand: None,
            search: None,
            sort_by: RecommendSortKey::default(),
            limit: DEFAULT_RECOMMEND_VIEW_LIMIT,
        }
    }
}

/// Rows shown after filtering; `matched` counts them before the limit
#[derive(Debug)]
pub struct DistrictView<'a> {
    pub matched: usize,
    pub rows: Vec<&'a DistrictSummary>,
}

#[derive(Debug)]
pub struct MapView<'a> {
    pub points: Vec<&'a StorePoint>,
    /// Point count per selected brand, in selection order
    pub counts: Vec<(Brand, usize)>,
}

#[derive(Debug)]
pub struct BrandCard<'a> {
    pub brand: Brand,
    pub stats: Option<&'a BrandStats>,
}

#[derive(Debug)]
pub struct DashboardOverview<'a> {
    pub cards: Vec<BrandCard<'a>>,
    pub district_count: usize,
    pub point_count: usize,
    pub candidate_count: usize,
    /// Districts with the most target-brand stores, excluding empty ones
    pub top_districts: Vec<&'a DistrictSummary>,
    /// Sales per age bracket over every district, in 100 million KRW
    pub age_totals: [f64; 6],
}

impl DashboardOverview<'_> {
    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str(&format!(
            "Districts: {} · Stores on map: {} · Recommendation candidates: {}\n",
            self.district_count, self.point_count, self.candidate_count
        ));

        summary.push_str("\nBrands:\n");
        for card in &self.cards {
            match card.stats {
                Some(stats) => {
                    let avg = if stats.avg_monthly_sales != 0 {
                        format!("{}만", stats.avg_monthly_sales)
                    } else {
                        "-".to_string()
                    };
                    summary.push_str(&format!(
                        "  {:<8} stores {:>5}  districts {:>4}  on map {:>5}  avg sales/store {}\n",
                        card.brand.name(),
                        stats.total_stores,
                        stats.dong_count,
                        stats.map_count,
                        avg
                    ));
                }
                None => summary.push_str(&format!("  {:<8} no statistics\n", card.brand.name())),
            }
        }

        summary.push_str("\nSales by age bracket (억):\n");
        let labels = ["10s", "20s", "30s", "40s", "50s", "60+"];
        for (label, total) in labels.iter().zip(self.age_totals) {
            summary.push_str(&format!("  {}: {:.0}\n", label, total));
        }

        if !self.top_districts.is_empty() {
            summary.push_str(&format!(
                "\nTop {} districts by brand store count:\n",
                self.top_districts.len()
            ));
            for (i, district) in self.top_districts.iter().enumerate() {
                summary.push_str(&format!(
                    "  {:>2}. {} ({}) {}\n",
                    i + 1,
                    district.dong_name,
                    district.dong_code,
                    district.total_brand_count
                ));
            }
        }

        summary
    }
}

pub struct DashboardViews<'a> {
    data: &'a DashboardData,
}

impl<'a> DashboardViews<'a> {
    pub fn new(data: &'a DashboardData) -> Self {
        Self { data }
    }

    pub fn overview(&self) -> DashboardOverview<'a> {
        let data = self.data;

        let cards = data
            .brands
            .iter()
            .map(|&brand| BrandCard {
                brand,
                stats: data.stats(brand),
            })
            .collect();

        let mut top_districts: Vec<&DistrictSummary> = data
            .dong_data
            .iter()
            .filter(|d| d.total_brand_count > 0)
            .collect();
        top_districts.sort_by(|a, b| b.total_brand_count.cmp(&a.total_brand_count));
        top_districts.truncate(TOP_DISTRICTS);

        let mut age_totals = [0.0; 6];
        for district in &data.dong_data {
            for (total, sales) in age_totals.iter_mut().zip(district.age_sales()) {
                *total += sales;
            }
        }
        for total in age_totals.iter_mut() {
            *total /= HUNDRED_MILLION_WON;
        }

        DashboardOverview {
            cards,
            district_count: data.dong_data.len(),
            point_count: data.map_points.len(),
            candidate_count: data.recommend_top.len(),
            top_districts,
            age_totals,
        }
    }

    pub fn districts(&self, query: &DistrictQuery) -> DistrictView<'a> {
        let mut rows: Vec<&DistrictSummary> = self
            .data
            .dong_data
            .iter()
            .filter(|d| matches_search(&d.dong_name, query.search.as_deref()))
            .filter(|d| query.brand.map_or(true, |brand| d.brands.has(brand)))
            .collect();

        rows.sort_by(|a, b| {
            descending_nulls_last(query.sort_by.value(a), query.sort_by.value(b))
        });

        let matched = rows.len();
        rows.truncate(query.limit);
        DistrictView { matched, rows }
    }

    pub fn recommendations(&self, query: &RecommendQuery) -> Vec<&'a RecommendationCandidate> {
        let mut rows: Vec<&RecommendationCandidate> = self
            .data
            .recommend_top
            .iter()
            .filter(|c| query.brand.map_or(true, |brand| c.brand == brand))
            .filter(|c| matches_search(&c.dong_name, query.search.as_deref()))
            .collect();

        rows.sort_by(|a, b| {
            descending_nulls_last(query.sort_by.value(a), query.sort_by.value(b))
        });
        rows.truncate(query.limit);
        rows
    }

    /// Points of the selected brands. `None` selects every brand; an
    /// empty selection shows nothing.
    pub fn map(&self, selection: Option<&[Brand]>) -> MapView<'a> {
        let selected: Vec<Brand> = match selection {
            Some(brands) => brands.to_vec(),
            None => self.data.brands.clone(),
        };

        let points: Vec<&StorePoint> = self
            .data
            .map_points
            .iter()
            .filter(|p| selected.contains(&p.brand))
            .collect();

        let counts = selected
            .iter()
            .map(|&brand| (brand, points.iter().filter(|p| p.brand == brand).count()))
            .collect();

        MapView { points, counts }
    }
}
