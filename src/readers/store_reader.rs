use crate::error::Result;
use crate::models::StoreLocationRow;
use crate::readers::{ParsedRows, SourceTable};
use crate::utils::constants::{COL_BRAND, COL_DONG_CODE, COL_LATITUDE, COL_LONGITUDE, COL_STORE_NAME};
use crate::utils::numeric::normalize_code;

/// Maps the store tables onto typed rows.
///
/// Only the district code, store name, brand and (when requested)
/// coordinate columns are read; everything else in these wide tables is
/// ignored.
pub struct StoreReader {
    with_coordinates: bool,
}

impl StoreReader {
    /// Reader for the coordinate-bearing store table
    pub fn with_coordinates() -> Self {
        Self {
            with_coordinates: true,
        }
    }

    /// Reader for the brand-only store table
    pub fn without_coordinates() -> Self {
        Self {
            with_coordinates: false,
        }
    }

    pub fn read(&self, table: &SourceTable) -> Result<ParsedRows<StoreLocationRow>> {
        let dong_code = table.required(COL_DONG_CODE)?;
        let name = table.required(COL_STORE_NAME)?;
        let brand = table.required(COL_BRAND)?;
        let coordinates = if self.with_coordinates {
            Some((table.required(COL_LATITUDE)?, table.required(COL_LONGITUDE)?))
        } else {
            None
        };

        Ok(table.map_rows(|record, issues| {
            let (latitude, longitude) = match &coordinates {
                Some((lat, lon)) => (issues.numeric(record, lat), issues.numeric(record, lon)),
                None => (None, None),
            };

            Some(StoreLocationRow {
                dong_code: normalize_code(&dong_code.text(record)),
                name: name.text(record),
                brand: brand.text(record),
                latitude,
                longitude,
            })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::SourceKind;

    #[test]
    fn test_read_store_rows_with_coordinates() -> Result<()> {
        let text = "번호,행정동코드,사업장명,브랜드,주소,latitude,longitude\n\
                    1,11010515,메가커피 사직점,메가커피,서울 종로구,37.5759,126.9688\n\
                    2,11010515,동네카페,기타,서울 종로구,,\n\
                    3,11680640,빽다방 역삼점,빽다방,서울 강남구,abc,127.03\n";
        let table = SourceTable::from_text(SourceKind::StoresWithCoords, text)?;
        let parsed = StoreReader::with_coordinates().read(&table)?;

        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed.rows[0].coordinates(), Some((37.5759, 126.9688)));
        assert_eq!(parsed.rows[1].brand, "기타");
        assert_eq!(parsed.rows[1].coordinates(), None);
        assert_eq!(parsed.rows[2].latitude, None);
        assert_eq!(parsed.issues.invalid_cells.get("latitude"), Some(&1));

        Ok(())
    }

    #[test]
    fn test_read_store_rows_without_coordinates() -> Result<()> {
        let text = "행정동코드,사업장명,브랜드\n11010515,컴포즈커피 사직점,컴포즈커피\n";
        let table = SourceTable::from_text(SourceKind::StoresWithBrand, text)?;
        let parsed = StoreReader::without_coordinates().read(&table)?;

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.rows[0].latitude, None);
        assert_eq!(parsed.rows[0].name, "컴포즈커피 사직점");

        Ok(())
    }

    #[test]
    fn test_coordinate_columns_required_for_coordinate_table() -> Result<()> {
        let text = "행정동코드,사업장명,브랜드\n11010515,컴포즈커피 사직점,컴포즈커피\n";
        let table = SourceTable::from_text(SourceKind::StoresWithCoords, text)?;
        assert!(StoreReader::with_coordinates().read(&table).is_err());
        Ok(())
    }
}
