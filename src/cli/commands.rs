use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Level;
use validator::Validate;

use crate::analyzers::{DashboardViews, DistrictQuery, RecommendQuery};
use crate::cli::args::{Cli, Commands, SourceArgs};
use crate::config::PipelineConfig;
use crate::error::{ProcessingError, Result};
use crate::models::{Brand, DashboardData};
use crate::processors::{IntegrityChecker, SitePipeline};
use crate::utils::filename::generate_default_parquet_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::{DashboardWriter, ParquetWriter};

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Process {
            source,
            output_file,
            recommend_cap,
            parquet,
            compression,
            validate_only,
        } => {
            let mut config = load_config(cli.config.as_deref(), &source)?;
            if let Some(path) = output_file {
                config.output_file = Some(path);
            }
            if let Some(cap) = recommend_cap {
                config.recommend_cap = cap;
            }
            config.validate()?;
            let parquet_export = prepare_parquet_export(parquet, &compression)?;

            let output_path = config.output_path();
            println!("Processing site-analysis data...");
            println!("Data directory: {}", config.data_dir.display());
            println!("Output file: {}", output_path.display());
            println!(
                "Workers: {}, Recommendation cap: {}",
                config.max_workers, config.recommend_cap
            );

            let progress = ProgressReporter::new_spinner("Processing data...", false);
            let pipeline = SitePipeline::new(config);
            let (dashboard, integrity_report) = pipeline.process(Some(&progress)).await?;

            let checker = IntegrityChecker::new();
            println!("\n{}", checker.generate_summary(&integrity_report));
            println!("{}", dashboard.summary());

            if validate_only {
                println!("Validation complete - no output file written");
                return Ok(());
            }

            let writer = DashboardWriter::new();
            writer.write(&dashboard, &output_path)?;
            let file_info = writer.get_file_info(&output_path)?;
            println!("{}", file_info.summary());

            if let Some((parquet_writer, parquet_path)) = parquet_export {
                export_districts(&dashboard, &parquet_writer, &parquet_path)?;
            }

            println!("Processing complete!");
        }

        Commands::Validate { source } => {
            let config = load_config(cli.config.as_deref(), &source)?;

            println!("Validating site-analysis data...");
            println!("Data directory: {}", config.data_dir.display());

            let progress = ProgressReporter::new_spinner("Validating data...", false);
            let (_dashboard, integrity_report) =
                SitePipeline::new(config).process(Some(&progress)).await?;

            let checker = IntegrityChecker::with_max_listed(50);
            println!("\n{}", checker.generate_summary(&integrity_report));

            if integrity_report.is_clean() {
                println!("✅ All data passed validation checks");
            } else {
                println!(
                    "⚠️  Found {} non-numeric cells, {} unmatched districts, {} stores outside Seoul",
                    integrity_report.total_invalid_cells(),
                    integrity_report.unmatched_districts.len(),
                    integrity_report.points_outside_seoul
                );
            }
        }

        Commands::Info { file } => {
            println!("Analyzing dashboard document: {}", file.display());

            let writer = DashboardWriter::new();
            let dashboard = writer.read(&file)?;
            let overview = DashboardViews::new(&dashboard).overview();

            println!("\n{}", overview.summary());
            println!("File Details:");
            println!("{}", writer.get_file_info(&file)?.summary());
        }

        Commands::Districts {
            file,
            search,
            brand,
            sort_by,
            limit,
        } => {
            let dashboard = DashboardWriter::new().read(&file)?;
            let query = DistrictQuery {
                search,
                brand: brand.as_deref().map(parse_brand).transpose()?,
                sort_by,
                limit,
            };
            let view = DashboardViews::new(&dashboard).districts(&query);

            println!("Districts: {} matched, showing {}", view.matched, view.rows.len());
            for district in view.rows {
                println!(
                    "{:<10} {:<12} stores {:>3}  workers {:>7}  sales {:>8.0}만  score {}",
                    district.dong_code,
                    district.dong_name,
                    district.total_brand_count,
                    district.total_workers,
                    district.monthly_sales / 1e4,
                    format_score(district.attractiveness_score)
                );
            }
        }

        Commands::Recommend {
            file,
            brand,
            search,
            sort_by,
            limit,
        } => {
            let dashboard = DashboardWriter::new().read(&file)?;
            let query = RecommendQuery {
                brand: brand.as_deref().map(parse_brand).transpose()?,
                search,
                sort_by,
                limit,
            };
            let candidates = DashboardViews::new(&dashboard).recommendations(&query);

            if candidates.is_empty() {
                println!("No recommendations match the given filters");
                return Ok(());
            }

            println!("Site recommendations: {}", candidates.len());
            for (i, candidate) in candidates.iter().enumerate() {
                println!(
                    "{:>3}. {:<8} → {:<12} attractiveness {:.1}  demand {}  competition {}  cost {}  cafes {}",
                    i + 1,
                    candidate.brand.name(),
                    candidate.dong_name,
                    candidate.attractiveness_score,
                    format_score(candidate.demand_score),
                    format_score(candidate.competition_score),
                    format_score(candidate.cost_score),
                    candidate.cafe_count
                );
            }
        }

        Commands::Map {
            file,
            brands,
            none,
            sample,
        } => {
            let dashboard = DashboardWriter::new().read(&file)?;
            let selection: Option<Vec<Brand>> = if none {
                Some(Vec::new())
            } else if brands.is_empty() {
                None
            } else {
                Some(
                    brands
                        .iter()
                        .map(|b| parse_brand(b))
                        .collect::<Result<Vec<_>>>()?,
                )
            };

            let view = DashboardViews::new(&dashboard).map(selection.as_deref());
            if view.points.is_empty() {
                println!("No stores for the selected brands");
                return Ok(());
            }

            println!("Store points: {}", view.points.len());
            for (brand, count) in &view.counts {
                println!("  {} ({}): {}", brand.name(), brand.color(), count);
            }
            for point in view.points.iter().take(sample) {
                println!(
                    "{:<8} {:<24} {:.6}, {:.6}  [{}]",
                    point.brand.name(),
                    point.name,
                    point.lat,
                    point.lng,
                    point.dong_code
                );
            }
        }
    }

    Ok(())
}

/// DEBUG with `--verbose`, INFO otherwise; a log file receives plain text
fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = tracing_subscriber::fmt().with_max_level(level).with_target(false);

    let result = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    result.map_err(|e| ProcessingError::Config(format!("Failed to initialise logging: {}", e)))
}

fn load_config(config_file: Option<&Path>, source: &SourceArgs) -> Result<PipelineConfig> {
    let mut config = PipelineConfig::load(config_file)?;
    apply_source_args(&mut config, source);
    config.validate()?;
    Ok(config)
}

fn apply_source_args(config: &mut PipelineConfig, source: &SourceArgs) {
    if let Some(dir) = &source.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(encoding) = &source.encoding {
        config.encoding = encoding.clone();
    }
    if let Some(workers) = source.max_workers {
        config.max_workers = workers;
    }
}

fn parse_brand(name: &str) -> Result<Brand> {
    Brand::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = Brand::ALL.iter().map(|b| b.name()).collect();
        ProcessingError::InvalidFormat(format!(
            "Unknown brand '{}' (expected one of: {})",
            name,
            known.join(", ")
        ))
    })
}

fn format_score(score: Option<f64>) -> String {
    score
        .map(|s| format!("{:.1}", s))
        .unwrap_or_else(|| "-".to_string())
}

/// Resolve the `--parquet` target; an unknown `--compression` fails here
fn prepare_parquet_export(
    parquet: Option<Option<PathBuf>>,
    compression: &str,
) -> Result<Option<(ParquetWriter, PathBuf)>> {
    let Some(path) = parquet else {
        return Ok(None);
    };
    let writer = ParquetWriter::new().with_compression(compression)?;
    Ok(Some((writer, path.unwrap_or_else(generate_default_parquet_filename))))
}

fn export_districts(dashboard: &DashboardData, writer: &ParquetWriter, path: &Path) -> Result<()> {
    println!(
        "Writing {} districts to Parquet file {}...",
        dashboard.dong_data.len(),
        path.display()
    );
    writer.write_districts(&dashboard.dong_data, path)?;

    if path.exists() {
        let file_info = writer.get_file_info(path)?;
        println!("\n{}", file_info.summary());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_brand() {
        assert_eq!(parse_brand("빽다방").unwrap(), Brand::Paik);
        assert!(matches!(
            parse_brand("스타벅스"),
            Err(ProcessingError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_source_args_override_config() {
        let mut config = PipelineConfig::default();
        let source = SourceArgs {
            data_dir: Some(PathBuf::from("/srv/cafe/data")),
            encoding: Some("euc-kr".to_string()),
            max_workers: None,
        };
        apply_source_args(&mut config, &source);

        assert_eq!(config.data_dir, PathBuf::from("/srv/cafe/data"));
        assert_eq!(config.encoding, "euc-kr");
        assert_eq!(config.max_workers, PipelineConfig::default().max_workers);
    }

    #[test]
    fn test_parquet_export_rejects_unknown_compression() {
        let result = prepare_parquet_export(Some(Some(PathBuf::from("out.parquet"))), "bogus");
        assert!(matches!(result, Err(ProcessingError::Config(_))));

        assert!(prepare_parquet_export(None, "bogus").unwrap().is_none());

        let (_, path) = prepare_parquet_export(Some(None), "zstd").unwrap().unwrap();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("parquet"));
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(Some(81.26)), "81.3");
        assert_eq!(format_score(None), "-");
    }
}
