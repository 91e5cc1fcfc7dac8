use std::collections::BTreeMap;

use crate::models::{Brand, BrandWorkforceRow, DistrictAggregate, SalesFigures};
use crate::utils::numeric::max_skip_missing;

/// Collapses brand/workforce rows to one row per (district code, district name).
///
/// Store counts and worker counts are district-level facts repeated on
/// each sub-row, so they reduce with MAX. Sales are transactional and
/// reduce with SUM.
pub struct DistrictAggregator;

impl DistrictAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate rows; output is ordered by (code, name)
    pub fn aggregate(&self, rows: &[BrandWorkforceRow]) -> Vec<DistrictAggregate> {
        let mut groups: BTreeMap<(String, String), DistrictAggregate> = BTreeMap::new();

        for row in rows {
            let entry = groups
                .entry((row.dong_code.clone(), row.dong_name.clone()))
                .or_insert_with(|| DistrictAggregate {
                    dong_code: row.dong_code.clone(),
                    dong_name: row.dong_name.clone(),
                    brand_counts: Default::default(),
                    total_workers: None,
                    female_workers: None,
                    sales: SalesFigures::default(),
                });

            Self::accumulate(entry, row);
        }

        groups.into_values().collect()
    }

    fn accumulate(entry: &mut DistrictAggregate, row: &BrandWorkforceRow) {
        for brand in Brand::ALL {
            let merged = max_skip_missing(
                entry.brand_counts.get(brand),
                row.brand_counts.get(brand),
            );
            entry.brand_counts.set(brand, merged);
        }

        entry.total_workers = max_skip_missing(entry.total_workers, row.total_workers);
        entry.female_workers = max_skip_missing(entry.female_workers, row.female_workers);

        let sales = &mut entry.sales;
        sales.monthly += row.sales.monthly.unwrap_or(0.0);
        sales.male += row.sales.male.unwrap_or(0.0);
        sales.female += row.sales.female.unwrap_or(0.0);
        for (total, cell) in sales.by_age.iter_mut().zip(row.sales.by_age) {
            *total += cell.unwrap_or(0.0);
        }
    }
}

impl Default for DistrictAggregator {
    fn default() -> Self {
        Self::new()
    }
}
