use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::analyzers::{DistrictSortKey, RecommendSortKey};

#[derive(Parser)]
#[command(name = "cafe-site-processor")]
#[command(about = "Seoul low-cost coffee brand site-analysis data pipeline")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,
}

/// Source options shared by `process` and `validate`; each overrides the configuration
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    #[arg(short, long, help = "Directory containing the four source CSV files")]
    pub data_dir: Option<PathBuf>,

    #[arg(short, long, help = "Source text encoding (e.g. utf-8, euc-kr)")]
    pub encoding: Option<String>,

    #[arg(long)]
    pub max_workers: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the dashboard document from the source tables
    Process {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(
            short,
            long,
            help = "Output JSON file path [default: dashboard_data.json beside the data directory]"
        )]
        output_file: Option<PathBuf>,

        #[arg(long, help = "Maximum recommendation candidates kept")]
        recommend_cap: Option<usize>,

        #[arg(
            long,
            num_args = 0..=1,
            help = "Also export districts to Parquet [default: output/dong-summary-{YYMMDD}.parquet]"
        )]
        parquet: Option<Option<PathBuf>>,

        #[arg(short, long, default_value = "snappy")]
        compression: String,

        #[arg(long, default_value = "false")]
        validate_only: bool,
    },

    /// Run the pipeline and report data quality without writing output
    Validate {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Display an overview of a dashboard document
    Info {
        #[arg(short, long, default_value = "dashboard_data.json")]
        file: PathBuf,
    },

    /// District drill-down view
    Districts {
        #[arg(short, long, default_value = "dashboard_data.json")]
        file: PathBuf,

        #[arg(short, long, help = "Substring of the district name")]
        search: Option<String>,

        #[arg(short, long, help = "Only districts where this brand has stores")]
        brand: Option<String>,

        #[arg(long, value_enum, default_value_t = DistrictSortKey::TotalBrandCount)]
        sort_by: DistrictSortKey,

        #[arg(short, long, default_value = "200")]
        limit: usize,
    },

    /// Site recommendations: districts where a brand has no store yet
    Recommend {
        #[arg(short, long, default_value = "dashboard_data.json")]
        file: PathBuf,

        #[arg(short, long)]
        brand: Option<String>,

        #[arg(short, long, help = "Substring of the district name")]
        search: Option<String>,

        #[arg(long, value_enum, default_value_t = RecommendSortKey::AttractivenessScore)]
        sort_by: RecommendSortKey,

        #[arg(short, long, default_value = "60")]
        limit: usize,
    },

    /// Store points of the selected brands
    Map {
        #[arg(short, long, default_value = "dashboard_data.json")]
        file: PathBuf,

        #[arg(short, long = "brand", help = "Brand to show; repeat for several [default: all]")]
        brands: Vec<String>,

        #[arg(long, help = "Show no brand at all")]
        none: bool,

        #[arg(long, default_value = "20", help = "Points to list (0 = counts only)")]
        sample: usize,
    },
}
