use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Brand, StoreLocationRow};
use crate::utils::coordinates::is_within_seoul_bounds;

/// One `map_points` entry: a located store of a target brand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StorePoint {
    pub brand: Brand,

    pub name: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,

    pub dong_code: String,
}

impl StorePoint {
    pub fn new(brand: Brand, name: String, lat: f64, lng: f64, dong_code: String) -> Self {
        Self {
            brand,
            name,
            lat,
            lng,
            dong_code,
        }
    }

    /// Build a point from a store row; `None` for unknown brands or
    /// rows missing either coordinate.
    pub fn from_row(row: &StoreLocationRow) -> Option<Self> {
        let brand = row.target_brand()?;
        let (lat, lng) = row.coordinates()?;
        Some(Self::new(
            brand,
            row.name.clone(),
            lat,
            lng,
            row.dong_code.clone(),
        ))
    }

    pub fn is_within_seoul(&self) -> bool {
        is_within_seoul_bounds(self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(brand: &str, lat: Option<f64>, lng: Option<f64>) -> StoreLocationRow {
        StoreLocationRow {
            dong_code: "11680640".to_string(),
            name: "컴포즈커피 역삼점".to_string(),
            brand: brand.to_string(),
            latitude: lat,
            longitude: lng,
        }
    }

    #[test]
    fn test_point_from_row() {
        let point = StorePoint::from_row(&row("컴포즈커피", Some(37.5), Some(127.03))).unwrap();

        assert_eq!(point.brand, Brand::Compose);
        assert_eq!(point.dong_code, "11680640");
        assert!(point.validate().is_ok());
        assert!(point.is_within_seoul());
    }

    #[test]
    fn test_unknown_brand_or_unlocated_rows_are_skipped() {
        assert!(StorePoint::from_row(&row("스타벅스", Some(37.5), Some(127.03))).is_none());
        assert!(StorePoint::from_row(&row("컴포즈커피", None, Some(127.03))).is_none());
        assert!(StorePoint::from_row(&row("컴포즈커피", Some(37.5), None)).is_none());
    }

    #[test]
    fn test_invalid_coordinates() {
        let point = StorePoint::new(
            Brand::Mega,
            "Invalid".to_string(),
            91.0,
            127.0,
            "11010515".to_string(),
        );
        assert!(point.validate().is_err());
        assert!(!point.is_within_seoul());
    }
}
