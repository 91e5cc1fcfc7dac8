use tracing::warn;

use crate::error::Result;
use crate::models::{Brand, BrandValues, BrandWorkforceRow, SalesCells};
use crate::readers::{Column, ParsedRows, SourceTable};
use crate::utils::constants::{
    COL_AGE_SALES, COL_DONG_CODE, COL_DONG_NAME, COL_FEMALE_SALES, COL_FEMALE_WORKERS,
    COL_MALE_SALES, COL_MONTHLY_SALES, COL_TOTAL_WORKERS,
};
use crate::utils::numeric::normalize_code;

/// Maps the brand/workforce table onto typed rows
pub struct BrandMasterReader;

struct BrandMasterColumns {
    dong_code: Column,
    dong_name: Column,
    brand_counts: Vec<(Brand, Column)>,
    total_workers: Column,
    female_workers: Column,
    monthly_sales: Column,
    male_sales: Column,
    female_sales: Column,
    age_sales: Vec<Column>,
}

impl BrandMasterReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read(&self, table: &SourceTable) -> Result<ParsedRows<BrandWorkforceRow>> {
        let columns = BrandMasterColumns {
            dong_code: table.required(COL_DONG_CODE)?,
            dong_name: table.required(COL_DONG_NAME)?,
            brand_counts: Brand::ALL
                .into_iter()
                .map(|b| (b, table.optional(&b.count_column())))
                .collect(),
            total_workers: table.optional(COL_TOTAL_WORKERS),
            female_workers: table.optional(COL_FEMALE_WORKERS),
            monthly_sales: table.optional(COL_MONTHLY_SALES),
            male_sales: table.optional(COL_MALE_SALES),
            female_sales: table.optional(COL_FEMALE_SALES),
            age_sales: COL_AGE_SALES.iter().map(|c| table.optional(c)).collect(),
        };

        let parsed = table.map_rows(|record, issues| {
            let dong_name = columns.dong_name.text(record);
            // Rows without a district name have no group key
            if dong_name.is_empty() {
                issues.drop_row();
                return None;
            }

            let mut brand_counts = BrandValues::default();
            for (brand, column) in &columns.brand_counts {
                brand_counts.set(*brand, issues.numeric(record, column));
            }

            let mut by_age = [None; 6];
            for (slot, column) in by_age.iter_mut().zip(&columns.age_sales) {
                *slot = issues.numeric(record, column);
            }

            Some(BrandWorkforceRow {
                dong_code: normalize_code(&columns.dong_code.text(record)),
                dong_name,
                brand_counts,
                total_workers: issues.numeric(record, &columns.total_workers),
                female_workers: issues.numeric(record, &columns.female_workers),
                sales: SalesCells {
                    monthly: issues.numeric(record, &columns.monthly_sales),
                    male: issues.numeric(record, &columns.male_sales),
                    female: issues.numeric(record, &columns.female_sales),
                    by_age,
                },
            })
        });

        if parsed.issues.dropped_rows > 0 {
            warn!(
                "{}: dropped {} rows without a district name",
                table.kind, parsed.issues.dropped_rows
            );
        }

        Ok(parsed)
    }
}

impl Default for BrandMasterReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::SourceKind;

    const HEADER: &str = "행정동코드,행정동_코드_명,count_더벤티,count_매머드커피,count_메가커피,count_빽다방,count_컴포즈커피,total_workers,female_workers,당월_매출_금액,남성_매출_금액,여성_매출_금액,연령대_10_매출_금액,연령대_20_매출_금액,연령대_30_매출_금액,연령대_40_매출_금액,연령대_50_매출_금액,연령대_60_이상_매출_금액";

    #[test]
    fn test_read_brand_master_rows() -> Result<()> {
        let text = format!(
            "{}\n 11010515 ,사직동,1,0,3,,2,1200,600,1000000,400000,600000,10,20,30,40,50,60\n",
            HEADER
        );
        let table = SourceTable::from_text(SourceKind::BrandMaster, &text)?;
        let parsed = BrandMasterReader::new().read(&table)?;

        assert_eq!(parsed.len(), 1);
        let row = &parsed.rows[0];
        assert_eq!(row.dong_code, "11010515");
        assert_eq!(row.dong_name, "사직동");
        assert_eq!(row.brand_counts.get(Brand::Mega), Some(3.0));
        assert_eq!(row.brand_counts.get(Brand::Paik), None);
        assert_eq!(row.total_workers, Some(1200.0));
        assert_eq!(row.sales.monthly, Some(1_000_000.0));
        assert_eq!(row.sales.by_age[5], Some(60.0));
        assert_eq!(parsed.issues.total_invalid(), 0);

        Ok(())
    }

    #[test]
    fn test_malformed_numbers_degrade_to_missing() -> Result<()> {
        let text = format!(
            "{}\n11010515,사직동,x,0,3,0,2,many,600,1000000,,,,,,,,\n",
            HEADER
        );
        let table = SourceTable::from_text(SourceKind::BrandMaster, &text)?;
        let parsed = BrandMasterReader::new().read(&table)?;

        let row = &parsed.rows[0];
        assert_eq!(row.brand_counts.get(Brand::TheVenti), None);
        assert_eq!(row.total_workers, None);
        assert_eq!(parsed.issues.invalid_cells.get("total_workers"), Some(&1));
        assert_eq!(parsed.issues.invalid_cells.get("count_더벤티"), Some(&1));

        Ok(())
    }

    #[test]
    fn test_absent_value_columns_read_as_missing() -> Result<()> {
        let table = SourceTable::from_text(
            SourceKind::BrandMaster,
            "행정동코드,행정동_코드_명\n11010515,사직동\n11010530,\n",
        )?;
        let parsed = BrandMasterReader::new().read(&table)?;

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.issues.dropped_rows, 1);
        assert_eq!(parsed.rows[0].brand_counts, BrandValues::default());
        assert_eq!(parsed.rows[0].sales.monthly, None);

        Ok(())
    }

    #[test]
    fn test_whitespace_name_is_kept() -> Result<()> {
        let table = SourceTable::from_text(
            SourceKind::BrandMaster,
            "행정동코드,행정동_코드_명,count_메가커피\n11010515, ,2\n11010530,,1\n",
        )?;
        let parsed = BrandMasterReader::new().read(&table)?;

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.rows[0].dong_name, " ");
        assert_eq!(parsed.rows[0].brand_counts.get(Brand::Mega), Some(2.0));
        assert_eq!(parsed.issues.dropped_rows, 1);

        Ok(())
    }

    #[test]
    fn test_missing_join_column_is_fatal() -> Result<()> {
        let table = SourceTable::from_text(SourceKind::BrandMaster, "행정동_코드_명\n사직동\n")?;
        assert!(BrandMasterReader::new().read(&table).is_err());
        Ok(())
    }
}
