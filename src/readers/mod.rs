pub mod attractiveness_reader;
pub mod brand_reader;
pub mod concurrent_reader;
pub mod csv_source;
pub mod store_reader;

pub use attractiveness_reader::AttractivenessReader;
pub use brand_reader::BrandMasterReader;
pub use concurrent_reader::{ConcurrentReader, SourceData};
pub use csv_source::{CellIssues, Column, ParsedRows, SourceLoader, SourceTable};
pub use store_reader::StoreReader;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four source tables the pipeline consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SourceKind {
    BrandMaster,
    Attractiveness,
    StoresWithCoords,
    StoresWithBrand,
}

impl SourceKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            SourceKind::BrandMaster => "brand/workforce table",
            SourceKind::Attractiveness => "attractiveness table",
            SourceKind::StoresWithCoords => "store table (coordinates)",
            SourceKind::StoresWithBrand => "store table (brands)",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
