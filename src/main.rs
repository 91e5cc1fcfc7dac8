use cafe_site_processor::cli::{run, Cli};
use cafe_site_processor::error::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
