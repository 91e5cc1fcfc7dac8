use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::models::{DashboardData, MergedDistrict};
use crate::processors::StoreFilterStats;
use crate::readers::{SourceData, SourceKind};
use crate::utils::coordinates::validate_seoul_coordinates;

/// Data-quality findings of one pipeline run. Nothing here aborts a run.
#[derive(Debug, Clone, Default)]
pub struct IntegrityReport {
    pub source_rows: BTreeMap<SourceKind, usize>,
    /// Cells that failed numeric coercion, per source and column
    pub invalid_cells: BTreeMap<SourceKind, BTreeMap<String, usize>>,
    pub dropped_brand_rows: usize,
    pub district_count: usize,
    pub matched_districts: usize,
    pub unmatched_districts: Vec<String>,
    /// Codes repeated in the attractiveness table
    pub duplicate_attractiveness_codes: Vec<String>,
    pub store_filter: StoreFilterStats,
    pub points_outside_seoul: usize,
    pub recommendation_candidates: usize,
}

impl IntegrityReport {
    pub fn total_invalid_cells(&self) -> usize {
        self.invalid_cells
            .values()
            .flat_map(|columns| columns.values())
            .sum()
    }

    pub fn is_clean(&self) -> bool {
        self.total_invalid_cells() == 0
            && self.unmatched_districts.is_empty()
            && self.duplicate_attractiveness_codes.is_empty()
            && self.points_outside_seoul == 0
    }
}

pub struct IntegrityChecker {
    max_listed: usize,
}

impl IntegrityChecker {
    pub fn new() -> Self {
        Self { max_listed: 10 }
    }

    pub fn with_max_listed(max_listed: usize) -> Self {
        Self { max_listed }
    }

    pub fn check_integrity(
        &self,
        sources: &SourceData,
        merged: &[MergedDistrict],
        store_filter: StoreFilterStats,
        dashboard: &DashboardData,
    ) -> IntegrityReport {
        let mut report = IntegrityReport {
            dropped_brand_rows: sources.brand_rows.issues.dropped_rows,
            store_filter,
            ..Default::default()
        };

        let issue_sets = [
            (SourceKind::BrandMaster, sources.brand_rows.len(), &sources.brand_rows.issues),
            (SourceKind::Attractiveness, sources.attractiveness.len(), &sources.attractiveness.issues),
            (SourceKind::StoresWithCoords, sources.stores_with_coords.len(), &sources.stores_with_coords.issues),
            (SourceKind::StoresWithBrand, sources.stores_with_brand.len(), &sources.stores_with_brand.issues),
        ];
        for (kind, rows, issues) in issue_sets {
            report.source_rows.insert(kind, rows);
            if !issues.invalid_cells.is_empty() {
                report.invalid_cells.insert(kind, issues.invalid_cells.clone());
            }
        }

        let mut seen_codes = BTreeSet::new();
        let mut duplicates = BTreeSet::new();
        for row in &sources.attractiveness.rows {
            if !seen_codes.insert(row.dong_code.as_str()) {
                duplicates.insert(row.dong_code.clone());
            }
        }
        report.duplicate_attractiveness_codes = duplicates.into_iter().collect();

        report.district_count = merged.len();
        for row in merged {
            if row.is_matched() {
                report.matched_districts += 1;
            } else {
                report.unmatched_districts.push(row.district.dong_code.clone());
            }
        }

        for point in &dashboard.map_points {
            if let Err(e) = validate_seoul_coordinates(point.lat, point.lng) {
                debug!("{} ({}): {}", point.name, point.brand, e);
                report.points_outside_seoul += 1;
            }
        }
        report.recommendation_candidates = dashboard.recommend_top.len();

        report
    }

    /// Generate a summary report
    pub fn generate_summary(&self, report: &IntegrityReport) -> String {
        let mut summary = String::new();

        summary.push_str("=== Integrity Check Report ===\n");
        for (kind, rows) in &report.source_rows {
            summary.push_str(&format!("{}: {} rows\n", kind, rows));
        }

        summary.push_str(&format!(
            "\nDistricts: {} (attractiveness matched: {}, unmatched: {})\n",
            report.district_count,
            report.matched_districts,
            report.unmatched_districts.len()
        ));
        if report.dropped_brand_rows > 0 {
            summary.push_str(&format!(
                "Brand rows without district name: {}\n",
                report.dropped_brand_rows
            ));
        }

        let filter = &report.store_filter;
        summary.push_str(&format!(
            "Store points: {} of {} rows (other brands: {}, missing coordinates: {})\n",
            filter.kept, filter.total_rows, filter.unknown_brand, filter.unlocated
        ));
        if report.points_outside_seoul > 0 {
            summary.push_str(&format!(
                "Store points outside Seoul bounds: {}\n",
                report.points_outside_seoul
            ));
        }
        summary.push_str(&format!(
            "Recommendation candidates kept: {}\n",
            report.recommendation_candidates
        ));

        summary.push_str(&format!(
            "\nNon-numeric cells read as missing: {}\n",
            report.total_invalid_cells()
        ));
        for (kind, columns) in &report.invalid_cells {
            for (column, count) in columns {
                summary.push_str(&format!("  {} / {}: {}\n", kind, column, count));
            }
        }

        if !report.unmatched_districts.is_empty() {
            summary.push_str(&format!(
                "\nUnmatched district codes (first {}):\n",
                self.max_listed.min(report.unmatched_districts.len())
            ));
            for code in report.unmatched_districts.iter().take(self.max_listed) {
                summary.push_str(&format!("  {}\n", code));
            }
        }

        if !report.duplicate_attractiveness_codes.is_empty() {
            summary.push_str(&format!(
                "\nDuplicate attractiveness codes: {}\n",
                report.duplicate_attractiveness_codes.join(", ")
            ));
        }

        summary
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AttractivenessRow, Brand, DistrictAggregate, SalesFigures, StoreLocationRow, StorePoint,
    };
    use crate::processors::ViewBuilder;
    use crate::readers::{CellIssues, ParsedRows};

    fn parsed<T>(kind: SourceKind, rows: Vec<T>, issues: CellIssues) -> ParsedRows<T> {
        ParsedRows { kind, rows, issues }
    }

    fn merged(code: &str, matched: bool) -> MergedDistrict {
        MergedDistrict {
            district: DistrictAggregate {
                dong_code: code.to_string(),
                dong_name: "동".to_string(),
                brand_counts: Default::default(),
                total_workers: None,
                female_workers: None,
                sales: SalesFigures::default(),
            },
            attractiveness: matched.then(|| AttractivenessRow {
                dong_code: code.to_string(),
                attractiveness_score: Some(50.0),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_report_counts_findings() {
        let mut brand_issues = CellIssues::default();
        brand_issues.invalid_cells.insert("total_workers".to_string(), 2);
        brand_issues.dropped_rows = 1;

        let attractiveness = vec![
            AttractivenessRow { dong_code: "1".to_string(), ..Default::default() },
            AttractivenessRow { dong_code: "1".to_string(), ..Default::default() },
        ];
        let sources = SourceData {
            brand_rows: parsed(SourceKind::BrandMaster, vec![], brand_issues),
            attractiveness: parsed(SourceKind::Attractiveness, attractiveness, CellIssues::default()),
            stores_with_coords: parsed(SourceKind::StoresWithCoords, Vec::<StoreLocationRow>::new(), CellIssues::default()),
            stores_with_brand: parsed(SourceKind::StoresWithBrand, Vec::<StoreLocationRow>::new(), CellIssues::default()),
        };
        let merged_rows = vec![merged("1", true), merged("2", false)];
        let points = vec![
            StorePoint::new(Brand::Mega, "in".to_string(), 37.5, 127.0, "1".to_string()),
            StorePoint::new(Brand::Mega, "out".to_string(), 35.1, 129.0, "1".to_string()),
        ];
        let dashboard = ViewBuilder::new().build(&merged_rows, points);

        let checker = IntegrityChecker::new();
        let report = checker.check_integrity(&sources, &merged_rows, StoreFilterStats::default(), &dashboard);

        assert_eq!(report.total_invalid_cells(), 2);
        assert_eq!(report.dropped_brand_rows, 1);
        assert_eq!(report.matched_districts, 1);
        assert_eq!(report.unmatched_districts, vec!["2".to_string()]);
        assert_eq!(report.duplicate_attractiveness_codes, vec!["1".to_string()]);
        assert_eq!(report.points_outside_seoul, 1);
        assert_eq!(report.recommendation_candidates, 5);
        assert!(!report.is_clean());

        let summary = checker.generate_summary(&report);
        assert!(summary.contains("unmatched: 1"));
        assert!(summary.contains("total_workers: 2"));
    }
}
