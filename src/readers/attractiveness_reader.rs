use crate::error::Result;
use crate::models::AttractivenessRow;
use crate::readers::{ParsedRows, SourceTable};
use crate::utils::constants::{
    COL_ATTRACTIVENESS_SCORE, COL_ATTR_DONG_CODE, COL_AVG_PRICE_PER_M2, COL_CAFE_COUNT,
    COL_COMPETITION_SCORE, COL_COST_SCORE, COL_DEMAND_SCORE, COL_TOTAL_SALES,
    COL_TOTAL_WORKERS_ATTR,
};
use crate::utils::numeric::normalize_code;

/// Maps the district attractiveness table onto typed rows
pub struct AttractivenessReader;

impl AttractivenessReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read(&self, table: &SourceTable) -> Result<ParsedRows<AttractivenessRow>> {
        // Same semantic key as the brand table, under a different column name
        let dong_code = table.required(COL_ATTR_DONG_CODE)?;
        let total_sales = table.optional(COL_TOTAL_SALES);
        let total_workers = table.optional(COL_TOTAL_WORKERS_ATTR);
        let cafe_count = table.optional(COL_CAFE_COUNT);
        let avg_price_per_m2 = table.optional(COL_AVG_PRICE_PER_M2);
        let demand_score = table.optional(COL_DEMAND_SCORE);
        let competition_score = table.optional(COL_COMPETITION_SCORE);
        let cost_score = table.optional(COL_COST_SCORE);
        let attractiveness_score = table.optional(COL_ATTRACTIVENESS_SCORE);

        Ok(table.map_rows(|record, issues| {
            Some(AttractivenessRow {
                dong_code: normalize_code(&dong_code.text(record)),
                total_sales: issues.numeric(record, &total_sales),
                total_workers: issues.numeric(record, &total_workers),
                cafe_count: issues.numeric(record, &cafe_count),
                avg_price_per_m2: issues.numeric(record, &avg_price_per_m2),
                demand_score: issues.numeric(record, &demand_score),
                competition_score: issues.numeric(record, &competition_score),
                cost_score: issues.numeric(record, &cost_score),
                attractiveness_score: issues.numeric(record, &attractiveness_score),
            })
        }))
    }
}

impl Default for AttractivenessReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::SourceKind;

    #[test]
    fn test_read_attractiveness_rows() -> Result<()> {
        let text = "행정동_코드,총_매출,총_직원수,카페_수,m²당_평균_가격,수요점수,경쟁점수,비용점수,매력도점수\n\
                    1101051500,5.2e9,3400,41,1250000,72.5,33.1,48.0,65.2\n\
                    1101053000,,,,,,,,\n";
        let table = SourceTable::from_text(SourceKind::Attractiveness, text)?;
        let parsed = AttractivenessReader::new().read(&table)?;

        assert_eq!(parsed.len(), 2);
        let first = &parsed.rows[0];
        assert_eq!(first.dong_code, "1101051500");
        assert_eq!(first.total_sales, Some(5.2e9));
        assert_eq!(first.cafe_count, Some(41.0));
        assert_eq!(first.attractiveness_score, Some(65.2));

        let second = &parsed.rows[1];
        assert_eq!(second.attractiveness_score, None);
        assert_eq!(second.demand_score, None);

        Ok(())
    }

    #[test]
    fn test_brand_table_key_name_is_not_accepted() -> Result<()> {
        let table = SourceTable::from_text(SourceKind::Attractiveness, "행정동코드,매력도점수\n1,2\n")?;
        assert!(AttractivenessReader::new().read(&table).is_err());
        Ok(())
    }
}
