//! CLI entry point for the catalog insights tool.
//!
//! Loads the product catalog CSV, runs the eleven report generators, and
//! writes the JSON artifacts plus the run manifest to the output directory.

use std::ffi::OsStr;
use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use catalog_insights::catalog::load_catalog;
use catalog_insights::output::write_all;
use catalog_insights::reports::run_all;

#[derive(Parser)]
#[command(name = "catalog_insights")]
#[command(about = "Generates pre-aggregated JSON reports from a product catalog CSV", long_about = None)]
struct Cli {
    /// Path to the catalog CSV
    #[arg(short, long)]
    input: String,

    /// Directory to write the JSON artifacts to
    #[arg(short, long, default_value = "data")]
    output_dir: String,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/catalog_insights.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("catalog_insights.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let catalog = load_catalog(&cli.input)?;
    info!(
        rows = catalog.len(),
        brands = catalog.distinct_brands(),
        "Catalog loaded"
    );

    let artifacts = run_all(&catalog)?;
    write_all(Path::new(&cli.output_dir), &catalog, &artifacts)?;

    Ok(())
}
