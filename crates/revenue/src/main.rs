use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use revenue_core::{config::PipelineConfig, db, pipeline};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Builds the daily per-product revenue table", long_about = None)]
struct Cli {
    /// SQLite database holding the product and sales tables
    /// (defaults to $REVENUE_DATABASE, then product_sales.db)
    database: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let cli = Cli::parse();
    let config = PipelineConfig::from_env(cli.database).context("invalid pipeline configuration")?;

    let pool = db::connect(&config.database)
        .await
        .with_context(|| format!("failed to open database {}", config.database.display()))?;

    let outcome = pipeline::run(&pool, &config.window).await;

    pool.close().await;
    info!("Database connection closed");

    let summary = outcome.context("revenue pipeline failed")?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
