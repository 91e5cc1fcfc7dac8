//! Typed rows read from the four source tables, before aggregation.
//!
//! Numeric cells are kept as `Option<f64>`: `None` means the cell was
//! empty, absent or failed coercion.

use serde::{Deserialize, Serialize};

use crate::models::Brand;

/// Per-brand raw values from the wide `count_<brand>` columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandValues(pub [Option<f64>; 5]);

impl BrandValues {
    pub fn get(&self, brand: Brand) -> Option<f64> {
        self.0[brand.position()]
    }

    pub fn set(&mut self, brand: Brand, value: Option<f64>) {
        self.0[brand.position()] = value;
    }
}

/// Monthly sales cells broken out by gender and six age brackets
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesCells {
    pub monthly: Option<f64>,
    pub male: Option<f64>,
    pub female: Option<f64>,
    pub by_age: [Option<f64>; 6],
}

/// One row of the brand/workforce table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandWorkforceRow {
    pub dong_code: String,
    pub dong_name: String,
    pub brand_counts: BrandValues,
    pub total_workers: Option<f64>,
    pub female_workers: Option<f64>,
    pub sales: SalesCells,
}

/// One row of the attractiveness table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttractivenessRow {
    pub dong_code: String,
    pub total_sales: Option<f64>,
    pub total_workers: Option<f64>,
    pub cafe_count: Option<f64>,
    pub avg_price_per_m2: Option<f64>,
    pub demand_score: Option<f64>,
    pub competition_score: Option<f64>,
    pub cost_score: Option<f64>,
    pub attractiveness_score: Option<f64>,
}

/// One row of a store table. Coordinates are only present in the
/// coordinate-bearing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreLocationRow {
    pub dong_code: String,
    pub name: String,
    pub brand: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl StoreLocationRow {
    /// Brand within the fixed enumeration, if any
    pub fn target_brand(&self) -> Option<Brand> {
        Brand::from_name(&self.brand)
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_row_requires_both_coordinates() {
        let mut row = StoreLocationRow {
            dong_code: "11010515".to_string(),
            name: "메가커피 종로점".to_string(),
            brand: "메가커피".to_string(),
            latitude: Some(37.57),
            longitude: None,
        };
        assert_eq!(row.coordinates(), None);
        assert_eq!(row.target_brand(), Some(Brand::Mega));

        row.longitude = Some(126.98);
        assert_eq!(row.coordinates(), Some((37.57, 126.98)));
    }

    #[test]
    fn test_brand_values() {
        let mut values = BrandValues::default();
        values.set(Brand::Paik, Some(2.0));
        assert_eq!(values.get(Brand::Paik), Some(2.0));
        assert_eq!(values.get(Brand::Mega), None);
    }
}
