use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};

use task_audit::dataset::load_path;
use task_audit::export::{to_csv, to_csv_with_domain};
use task_audit::filter::{apply, available_categories, FilterSpec};
use task_audit::metrics::DEFAULT_KEYWORD_GROUPS;
use task_audit::models::Domain;
use task_audit::viz_export::write_all_viz;

/// Task review audit - filters a review export and emits the audit CSV plus chart data
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the raw review CSV
    #[arg(short, long, default_value = "taskrabbit_reviews.csv")]
    input: PathBuf,

    /// Output directory for generated files (default: "out")
    #[arg(short, long, default_value = "out")]
    output_dir: PathBuf,

    /// Restrict to these business domains (e.g. technical-support); default: all present
    #[arg(long = "domain")]
    domains: Vec<String>,

    /// Restrict to these exact categories; default: all available
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Case-insensitive keyword to search review text for
    #[arg(short, long)]
    keyword: Option<String>,

    /// Include the derived Domain column in the audit CSV
    #[arg(long)]
    with_domain: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    let args = Args::parse();
    info!("Starting task_audit - input={}", args.input.display());

    let dataset = load_path(&args.input);
    if dataset.is_empty() {
        warn!("Dataset is empty - the audit CSV and charts will be empty too");
    }
    debug!(
        "Dataset ready - records={}, dropped_lines={}",
        dataset.len(),
        dataset.dropped_lines
    );

    let domains: BTreeSet<Domain> = if args.domains.is_empty() {
        dataset.records.iter().map(|r| r.domain).collect()
    } else {
        args.domains
            .iter()
            .map(|s| s.parse::<Domain>().map_err(anyhow::Error::msg))
            .collect::<Result<_>>()?
    };

    let categories: BTreeSet<String> = if args.categories.is_empty() {
        available_categories(&dataset, &domains)
    } else {
        args.categories.iter().cloned().collect()
    };

    let spec = FilterSpec {
        domains,
        categories,
        keyword: args.keyword,
    }
    .pruned(&dataset);

    let view = apply(&dataset, &spec);
    info!(
        "Filtered view - matched={}/{}",
        view.len(),
        dataset.len()
    );

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("create {:?}", args.output_dir))?;

    let csv = if args.with_domain {
        to_csv_with_domain(&view)
    } else {
        to_csv(&view)
    };
    let csv_path = args.output_dir.join("audit.csv");
    fs::write(&csv_path, csv).with_context(|| format!("write {:?}", csv_path))?;
    info!("Audit CSV written - path={}", csv_path.display());

    write_all_viz(&args.output_dir, &view, DEFAULT_KEYWORD_GROUPS)?;
    info!("Chart data written - dir={}", args.output_dir.display());

    Ok(())
}
