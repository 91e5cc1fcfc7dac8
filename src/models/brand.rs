use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::utils::constants::BRAND_COUNT_PREFIX;

/// The five low-cost coffee chains tracked by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Brand {
    TheVenti,
    Mammoth,
    Mega,
    Paik,
    Compose,
}

impl Brand {
    pub const ALL: [Brand; 5] = [
        Brand::TheVenti,
        Brand::Mammoth,
        Brand::Mega,
        Brand::Paik,
        Brand::Compose,
    ];

    /// Brand name as it appears in the source tables and the output document
    pub fn name(&self) -> &'static str {
        match self {
            Brand::TheVenti => "더벤티",
            Brand::Mammoth => "매머드커피",
            Brand::Mega => "메가커피",
            Brand::Paik => "빽다방",
            Brand::Compose => "컴포즈커피",
        }
    }

    /// Display color token for the dashboard
    pub fn color(&self) -> &'static str {
        match self {
            Brand::TheVenti => "#FF6B6B",
            Brand::Mammoth => "#4ECDC4",
            Brand::Mega => "#FFE66D",
            Brand::Paik => "#A8E6CF",
            Brand::Compose => "#C3A6FF",
        }
    }

    /// Exact match against the brand names; anything else is outside the enumeration
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    /// Wide-format store count column in the brand/workforce table
    pub fn count_column(&self) -> String {
        format!("{}{}", BRAND_COUNT_PREFIX, self.name())
    }

    pub fn position(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for Brand {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Brand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Brand::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown brand: {}", name)))
    }
}

/// Store count per brand; every brand is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrandCounts([u64; 5]);

impl BrandCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, brand: Brand) -> u64 {
        self.0[brand.position()]
    }

    pub fn set(&mut self, brand: Brand, count: u64) {
        self.0[brand.position()] = count;
    }

    pub fn total(&self) -> u64 {
        self.0.iter().fold(0u64, |acc, &count| acc.saturating_add(count))
    }

    pub fn has(&self, brand: Brand) -> bool {
        self.get(brand) > 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Brand, u64)> + '_ {
        Brand::ALL.into_iter().map(move |b| (b, self.get(b)))
    }
}

impl Index<Brand> for BrandCounts {
    type Output = u64;

    fn index(&self, brand: Brand) -> &u64 {
        &self.0[brand.position()]
    }
}

impl IndexMut<Brand> for BrandCounts {
    fn index_mut(&mut self, brand: Brand) -> &mut u64 {
        &mut self.0[brand.position()]
    }
}

impl Serialize for BrandCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Brand::ALL.len()))?;
        for (brand, count) in self.iter() {
            map.serialize_entry(brand.name(), &count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BrandCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct CountsVisitor;

        impl<'de> Visitor<'de> for CountsVisitor {
            type Value = BrandCounts;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of brand name to store count")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<BrandCounts, A::Error> {
                let mut counts = BrandCounts::new();
                while let Some((name, count)) = access.next_entry::<String, u64>()? {
                    // Unknown brands are not part of the fixed enumeration
                    if let Some(brand) = Brand::from_name(&name) {
                        counts.set(brand, count);
                    }
                }
                Ok(counts)
            }
        }

        deserializer.deserialize_map(CountsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_from_name() {
        assert_eq!(Brand::from_name("메가커피"), Some(Brand::Mega));
        assert_eq!(Brand::from_name("빽다방"), Some(Brand::Paik));
        assert_eq!(Brand::from_name(" 빽다방"), None);
        assert_eq!(Brand::from_name("스타벅스"), None);
        assert_eq!(Brand::from_name(""), None);
    }

    #[test]
    fn test_count_column() {
        assert_eq!(Brand::Mega.count_column(), "count_메가커피");
        assert_eq!(Brand::TheVenti.count_column(), "count_더벤티");
    }

    #[test]
    fn test_brand_counts_total() {
        let mut counts = BrandCounts::new();
        counts.set(Brand::Mega, 5);
        counts[Brand::Compose] += 2;

        assert_eq!(counts.total(), 7);
        assert!(counts.has(Brand::Mega));
        assert!(!counts.has(Brand::Paik));
        assert_eq!(counts[Brand::Compose], 2);
    }

    #[test]
    fn test_brand_counts_total_saturates() {
        let mut counts = BrandCounts::new();
        counts.set(Brand::Mega, u64::MAX);
        counts.set(Brand::Paik, 1);

        assert_eq!(counts.total(), u64::MAX);
    }

    #[test]
    fn test_brand_counts_serialize_in_brand_order() {
        let mut counts = BrandCounts::new();
        counts.set(Brand::Compose, 1);

        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(
            json,
            r#"{"더벤티":0,"매머드커피":0,"메가커피":0,"빽다방":0,"컴포즈커피":1}"#
        );
    }

    #[test]
    fn test_brand_counts_deserialize_defaults_missing_brands() {
        let counts: BrandCounts = serde_json::from_str(r#"{"메가커피":3,"스타벅스":9}"#).unwrap();
        assert_eq!(counts.get(Brand::Mega), 3);
        assert_eq!(counts.get(Brand::Paik), 0);
        assert_eq!(counts.total(), 3);
    }
}
