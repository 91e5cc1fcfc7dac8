use crate::models::{StoreLocationRow, StorePoint};

/// Why a store row did not become a map point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreFilterStats {
    pub total_rows: usize,
    pub kept: usize,
    pub unknown_brand: usize,
    pub unlocated: usize,
}

/// Keeps located stores of the five target brands
pub struct StoreFilter;

impl StoreFilter {
    pub fn new() -> Self {
        Self
    }

    /// One point per qualifying row, in input order; no deduplication
    pub fn filter(&self, rows: &[StoreLocationRow]) -> (Vec<StorePoint>, StoreFilterStats) {
        let mut stats = StoreFilterStats {
            total_rows: rows.len(),
            ..Default::default()
        };
        let mut points = Vec::new();

        for row in rows {
            if row.target_brand().is_none() {
                stats.unknown_brand += 1;
                continue;
            }
            match StorePoint::from_row(row) {
                Some(point) => points.push(point),
                None => stats.unlocated += 1,
            }
        }

        stats.kept = points.len();
        (points, stats)
    }
}

impl Default for StoreFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Brand;

    fn row(name: &str, brand: &str, lat: Option<f64>, lng: Option<f64>) -> StoreLocationRow {
        StoreLocationRow {
            dong_code: "11010515".to_string(),
            name: name.to_string(),
            brand: brand.to_string(),
            latitude: lat,
            longitude: lng,
        }
    }

    #[test]
    fn test_filter_keeps_located_target_brands() {
        let rows = vec![
            row("메가커피 사직점", "메가커피", Some(37.57), Some(126.97)),
            row("메가커피 사직2호점", "메가커피", Some(37.58), Some(126.97)),
            row("스타벅스 광화문점", "스타벅스", Some(37.57), Some(126.97)),
            row("빽다방 사직점", "빽다방", None, Some(126.97)),
        ];

        let (points, stats) = StoreFilter::new().filter(&rows);

        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.brand == Brand::Mega));
        assert_eq!(points[0].name, "메가커피 사직점");
        assert_eq!(
            stats,
            StoreFilterStats {
                total_rows: 4,
                kept: 2,
                unknown_brand: 1,
                unlocated: 1,
            }
        );
    }

    #[test]
    fn test_identical_stores_are_not_deduplicated() {
        let rows = vec![
            row("컴포즈커피", "컴포즈커피", Some(37.5), Some(127.0)),
            row("컴포즈커피", "컴포즈커피", Some(37.5), Some(127.0)),
        ];
        let (points, _) = StoreFilter::new().filter(&rows);
        assert_eq!(points.len(), 2);
    }
}
