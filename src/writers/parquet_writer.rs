use crate::error::{ProcessingError, Result};
use crate::models::{Brand, DistrictSummary};
use crate::utils::constants::DEFAULT_ROW_GROUP_SIZE;
use arrow::array::*;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel};
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// Exports the district table (`dong_data`) as a flat Parquet file
pub struct ParquetWriter {
    compression: Compression,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            "snappy" => Compression::SNAPPY,
            "gzip" => Compression::GZIP(GzipLevel::default()),
            "lz4" => Compression::LZ4,
            "zstd" => Compression::ZSTD(parquet::basic::ZstdLevel::default()),
            "none" => Compression::UNCOMPRESSED,
            _ => {
                return Err(ProcessingError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    /// Write district rows; brand counts become one `count_<brand>` column each
    pub fn write_districts(&self, districts: &[DistrictSummary], path: &Path) -> Result<()> {
        if districts.is_empty() {
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let schema = self.create_schema();
        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(DEFAULT_ROW_GROUP_SIZE)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;
        for chunk in districts.chunks(DEFAULT_ROW_GROUP_SIZE) {
            let batch = self.districts_to_batch(chunk, schema.clone())?;
            writer.write(&batch)?;
        }
        writer.close()?;

        Ok(())
    }

    fn create_schema(&self) -> Arc<Schema> {
        let mut fields = vec![
            Field::new("dong_code", DataType::Utf8, false),
            Field::new("dong_name", DataType::Utf8, false),
        ];
        for brand in Brand::ALL {
            fields.push(Field::new(brand.count_column(), DataType::UInt64, false));
        }
        fields.extend([
            Field::new("total_brand_count", DataType::UInt64, false),
            Field::new("total_workers", DataType::UInt64, false),
            Field::new("female_workers", DataType::UInt64, false),
            Field::new("monthly_sales", DataType::Float64, false),
            Field::new("male_sales", DataType::Float64, false),
            Field::new("female_sales", DataType::Float64, false),
            Field::new("age_10", DataType::Float64, false),
            Field::new("age_20", DataType::Float64, false),
            Field::new("age_30", DataType::Float64, false),
            Field::new("age_40", DataType::Float64, false),
            Field::new("age_50", DataType::Float64, false),
            Field::new("age_60", DataType::Float64, false),
            Field::new("attractiveness_score", DataType::Float64, true),
            Field::new("demand_score", DataType::Float64, true),
            Field::new("competition_score", DataType::Float64, true),
            Field::new("cost_score", DataType::Float64, true),
            Field::new("cafe_count", DataType::UInt64, false),
            Field::new("avg_price_per_m2", DataType::Float64, false),
        ]);

        Arc::new(Schema::new(fields))
    }

    fn districts_to_batch(
        &self,
        districts: &[DistrictSummary],
        schema: Arc<Schema>,
    ) -> Result<RecordBatch> {
        let text = |pick: fn(&DistrictSummary) -> &str| -> ArrayRef {
            Arc::new(StringArray::from_iter_values(districts.iter().map(pick)))
        };
        let counts = |pick: &dyn Fn(&DistrictSummary) -> u64| -> ArrayRef {
            Arc::new(UInt64Array::from_iter_values(districts.iter().map(pick)))
        };
        let amounts = |pick: fn(&DistrictSummary) -> f64| -> ArrayRef {
            Arc::new(Float64Array::from_iter_values(districts.iter().map(pick)))
        };
        let scores = |pick: fn(&DistrictSummary) -> Option<f64>| -> ArrayRef {
            Arc::new(districts.iter().map(pick).collect::<Float64Array>())
        };

        let mut columns: Vec<ArrayRef> = vec![
            text(|d| d.dong_code.as_str()),
            text(|d| d.dong_name.as_str()),
        ];
        for brand in Brand::ALL {
            columns.push(counts(&move |d: &DistrictSummary| d.brands.get(brand)));
        }
        columns.extend([
            counts(&|d| d.total_brand_count),
            counts(&|d| d.total_workers),
            counts(&|d| d.female_workers),
            amounts(|d| d.monthly_sales),
            amounts(|d| d.male_sales),
            amounts(|d| d.female_sales),
            amounts(|d| d.age_10),
            amounts(|d| d.age_20),
            amounts(|d| d.age_30),
            amounts(|d| d.age_40),
            amounts(|d| d.age_50),
            amounts(|d| d.age_60),
            scores(|d| d.attractiveness_score),
            scores(|d| d.demand_score),
            scores(|d| d.competition_score),
            scores(|d| d.cost_score),
            counts(&|d| d.cafe_count),
            amounts(|d| d.avg_price_per_m2),
        ]);

        Ok(RecordBatch::try_new(schema, columns)?)
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let row_groups = metadata.num_row_groups();
        let total_rows = metadata.file_metadata().num_rows();
        let file_size = std::fs::metadata(path)?.len();

        let row_group_sizes = (0..row_groups)
            .map(|i| metadata.row_group(i).num_rows())
            .collect();

        Ok(ParquetFileInfo {
            total_rows,
            row_groups: row_groups as i32,
            row_group_sizes,
            file_size,
            compression: self.compression,
        })
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: i32,
    pub row_group_sizes: Vec<i64>,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Row groups: {}\n\
            - File size: {:.2} MB\n\
            - Compression: {:?}\n\
            - Avg rows per group: {:.0}",
            self.total_rows,
            self.row_groups,
            self.file_size as f64 / 1_048_576.0,
            self.compression,
            self.total_rows as f64 / self.row_groups.max(1) as f64
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BrandCounts;
    use tempfile::NamedTempFile;

    fn district(code: &str, score: Option<f64>) -> DistrictSummary {
        let mut brands = BrandCounts::new();
        brands.set(Brand::Compose, 2);
        DistrictSummary {
            dong_code: code.to_string(),
            dong_name: "역삼1동".to_string(),
            total_brand_count: brands.total(),
            brands,
            total_workers: 52000,
            female_workers: 24000,
            monthly_sales: 1.5e9,
            male_sales: 8.0e8,
            female_sales: 7.0e8,
            age_10: 1.0e7,
            age_20: 4.0e8,
            age_30: 5.0e8,
            age_40: 3.0e8,
            age_50: 2.0e8,
            age_60: 9.0e7,
            attractiveness_score: score,
            demand_score: score,
            competition_score: None,
            cost_score: None,
            cafe_count: 120,
            avg_price_per_m2: 9_800_000.0,
        }
    }

    #[test]
    fn test_write_empty_districts() {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new().unwrap();

        let result = writer.write_districts(&[], temp_file.path());
        assert!(result.is_ok());
    }

    #[test]
    fn test_write_districts() -> Result<()> {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new().unwrap();

        let districts = vec![
            district("11680640", Some(81.2)),
            district("11680650", None),
            district("11680660", Some(40.0)),
        ];
        writer.write_districts(&districts, temp_file.path())?;

        let info = writer.get_file_info(temp_file.path())?;
        assert_eq!(info.total_rows, 3);
        assert_eq!(info.row_group_sizes.iter().sum::<i64>(), 3);
        assert!(info.file_size > 0);

        Ok(())
    }

    #[test]
    fn test_different_compressions() -> Result<()> {
        let compressions = ["snappy", "gzip", "lz4", "zstd", "none"];

        for compression in &compressions {
            let writer = ParquetWriter::new().with_compression(compression)?;
            let temp_file = NamedTempFile::new().unwrap();

            let result = writer.write_districts(&[district("1", Some(1.0))], temp_file.path());
            assert!(result.is_ok(), "Failed with compression: {}", compression);
        }

        assert!(ParquetWriter::new().with_compression("brotli9").is_err());
        Ok(())
    }
}
