use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use biomarker_dash::utils::logging::log_table_summary;
use biomarker_dash::{CategoryLayout, DashboardConfig, LogSink, ReportSummary, load_biomarkers};
use clap::Parser;
use log::{info, warn};

/// Command-line arguments for biomarker-dash
#[derive(Parser, Debug)]
#[command(name = "biomarker-dash")]
#[command(about = "Aggregate a lab-test export into per-biomarker histories")]
#[command(version)]
struct Args {
    /// Lab export in CSV format
    csv_path: PathBuf,

    /// TOML file overriding column names, date formats or scale correction
    #[arg(short, long, env = "BIOMARKER_DASH_CONFIG")]
    config: Option<PathBuf>,

    /// YAML file grouping markers into categories and subcategories
    #[arg(long, env = "BIOMARKER_DASH_CATEGORIES")]
    categories: Option<PathBuf>,

    /// Where to write the report summary
    #[arg(short, long, default_value = "biomarkers.json")]
    output: PathBuf,

    /// Exit with an error if any diagnostic was reported
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DashboardConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => DashboardConfig::default(),
    };

    let layout = match &args.categories {
        Some(path) => CategoryLayout::from_yaml_file(path)
            .with_context(|| format!("Failed to load categories from {}", path.display()))?,
        None => CategoryLayout::default(),
    };

    let start = Instant::now();
    let mut sink = LogSink::new();
    let table = load_biomarkers(&args.csv_path, &config, &mut sink)
        .with_context(|| format!("Failed to process {}", args.csv_path.display()))?;

    log_table_summary(&table);

    let summary = ReportSummary::from_table(&table, &config.dates).with_categories(&layout);
    summary
        .write_json(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!(
        "Processed {} biomarkers in {:?}",
        table.len(),
        start.elapsed()
    );

    if sink.count() > 0 {
        warn!("{} diagnostics reported, see log above", sink.count());
        if args.strict {
            bail!("{} diagnostics reported in strict mode", sink.count());
        }
    }

    Ok(())
}
