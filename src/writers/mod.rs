pub mod json_writer;
pub mod parquet_writer;

pub use json_writer::{DashboardFileInfo, DashboardWriter};
pub use parquet_writer::{ParquetFileInfo, ParquetWriter};
