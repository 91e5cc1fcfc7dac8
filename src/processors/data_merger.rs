use std::collections::HashMap;
use tracing::warn;

use crate::models::{AttractivenessRow, DistrictAggregate, MergedDistrict};

pub struct DataMerger;

impl DataMerger {
    pub fn new() -> Self {
        Self
    }

    /// Left-join aggregated districts with attractiveness rows on the district code.
    ///
    /// Every aggregated district survives. A district matching several
    /// attractiveness rows yields one merged row per match, in the
    /// attractiveness table's order.
    pub fn merge(
        &self,
        districts: Vec<DistrictAggregate>,
        attractiveness: &[AttractivenessRow],
    ) -> Vec<MergedDistrict> {
        let lookup = Self::index_by_code(attractiveness);
        let mut merged = Vec::with_capacity(districts.len());

        for district in districts {
            match lookup.get(district.dong_code.as_str()) {
                Some(matches) => {
                    for row in matches {
                        merged.push(MergedDistrict {
                            district: district.clone(),
                            attractiveness: Some((*row).clone()),
                        });
                    }
                }
                None => merged.push(MergedDistrict {
                    district,
                    attractiveness: None,
                }),
            }
        }

        merged
    }

    fn index_by_code(rows: &[AttractivenessRow]) -> HashMap<&str, Vec<&AttractivenessRow>> {
        let mut lookup: HashMap<&str, Vec<&AttractivenessRow>> = HashMap::with_capacity(rows.len());
        for row in rows {
            lookup.entry(row.dong_code.as_str()).or_default().push(row);
        }

        for (code, matches) in &lookup {
            if matches.len() > 1 {
                warn!(
                    "District code {} appears {} times in the attractiveness table",
                    code,
                    matches.len()
                );
            }
        }

        lookup
    }
}

impl Default for DataMerger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SalesFigures;

    fn district(code: &str) -> DistrictAggregate {
        DistrictAggregate {
            dong_code: code.to_string(),
            dong_name: format!("동 {}", code),
            brand_counts: Default::default(),
            total_workers: None,
            female_workers: None,
            sales: SalesFigures::default(),
        }
    }

    fn attractiveness(code: &str, score: f64) -> AttractivenessRow {
        AttractivenessRow {
            dong_code: code.to_string(),
            attractiveness_score: Some(score),
            ..Default::default()
        }
    }

    #[test]
    fn test_left_join_keeps_unmatched_districts() {
        let merged = DataMerger::new().merge(
            vec![district("1"), district("2")],
            &[attractiveness("2", 70.0), attractiveness("9", 10.0)],
        );

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].district.dong_code, "1");
        assert!(!merged[0].is_matched());
        assert_eq!(merged[1].district.dong_code, "2");
        assert_eq!(
            merged[1].attractiveness.as_ref().and_then(|a| a.attractiveness_score),
            Some(70.0)
        );
    }

    #[test]
    fn test_duplicate_attractiveness_rows_fan_out() {
        let merged = DataMerger::new().merge(
            vec![district("1")],
            &[attractiveness("1", 10.0), attractiveness("1", 20.0)],
        );

        let scores: Vec<Option<f64>> = merged
            .iter()
            .map(|m| m.attractiveness.as_ref().and_then(|a| a.attractiveness_score))
            .collect();
        assert_eq!(scores, vec![Some(10.0), Some(20.0)]);
    }
}
