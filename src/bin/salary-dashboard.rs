//! Headless dashboard: load the salary dataset and print the unfiltered snapshot as JSON.
//!
//! Usage: `salary-dashboard [SOURCE] [OPTIONS_JSON]` where `SOURCE` is a local CSV path or an
//! HTTP(S) URL (defaults to the published dataset) and `OPTIONS_JSON` is an optional
//! [`DashboardOptions`] file. Set `RUST_LOG=debug` for load and timing details.

use std::sync::Arc;

use anyhow::{Context, Result};

use salary_dashboard::dashboard::{Dashboard, DashboardOptions};
use salary_dashboard::ingestion::{DataSource, LoadOptions, LogObserver};
use salary_dashboard::salary::{DEFAULT_SOURCE_URL, load_salaries};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let raw = args.next().unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string());
    let source: DataSource = raw.parse()?;
    let dash_opts = match args.next() {
        Some(path) => DashboardOptions::from_json_path(&path)
            .with_context(|| format!("reading dashboard options from {path}"))?,
        None => DashboardOptions::default(),
    };

    let load_opts = LoadOptions {
        observer: Some(Arc::new(LogObserver)),
        ..Default::default()
    };
    let dataset = load_salaries(&source, &load_opts)
        .with_context(|| format!("loading salary records from {source}"))?;

    let dash = Dashboard::new(&dataset, dash_opts);
    let registry = dash.registry().context("building filter registry")?;
    let snapshot = dash
        .snapshot(registry.selection())
        .context("computing dashboard snapshot")?;

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
