//! ukedb-ingest - Ukulele tutorial catalog refresh
//!
//! **Modes:**
//! - default: parse the stored channel dumps and refresh the catalog
//! - `-d`: download fresh channel dumps first
//! - `-j`: only regenerate `published.json` from the catalog CSV
//!
//! Root folder priority: `--root-folder`, then `UKEDB_ROOT_FOLDER`, then
//! `root_folder` in ukedb.toml, then the OS default.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ukedb_common::config::{load_toml_config, resolve_root_folder, DataPaths, TomlConfig};
use ukedb_ingest::workflow::{refresh_output, resync};

#[derive(Parser, Debug)]
#[command(name = "ukedb-ingest")]
#[command(about = "Refresh the ukulele tutorial catalog from channel listings")]
#[command(version)]
struct Args {
    /// Download fresh channel listings before parsing
    #[arg(short, long)]
    download_data: bool,

    /// Regenerate published.json from the catalog CSV and exit
    #[arg(short = 'j', long)]
    refresh_json_output: bool,

    /// Root folder holding data/ and .json/
    #[arg(short, long, env = "UKEDB_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Bootstrap config file (defaults to the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Concurrent channel downloads
    #[arg(short, long)]
    workers: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_toml_config(args.config.as_deref()).context("Failed to load config")?;
    if let Some(workers) = args.workers {
        anyhow::ensure!(workers > 0, "--workers must be at least 1");
        config.workers = workers;
    }

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("ukedb_ingest={level},ukedb_common={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ukedb-ingest v{}", env!("CARGO_PKG_VERSION"));

    let root = resolve_root_folder(args.root_folder.as_deref(), &config);
    let paths = DataPaths::new(root);
    info!(root = %paths.root.display(), workers = config.workers, "Using root folder");

    if let Err(e) = run(&args, &paths, &config).await {
        let chain = format!("{:#}", e);
        error!(error = %chain, "ukedb-ingest failed");
        return Err(e);
    }

    Ok(())
}

async fn run(args: &Args, paths: &DataPaths, config: &TomlConfig) -> Result<()> {
    if args.refresh_json_output {
        let published = refresh_output(paths).with_context(|| {
            format!("Failed to refresh {}", paths.published_json.display())
        })?;
        info!(published, "Published output refreshed");
        return Ok(());
    }

    let summary = resync(paths, config, args.download_data)
        .await
        .context("Catalog resync failed")?;

    if let Some(fetch) = summary.fetch {
        info!(
            fetched = fetch.fetched,
            failed = fetch.failed,
            "Channel downloads"
        );
    }
    info!(
        batches = summary.batches,
        entries = summary.entries_parsed,
        skipped = summary.entries_skipped,
        curated = summary.merge.curated,
        fresh = summary.merge.fresh,
        carried = summary.merge.carried,
        records = summary.records_written,
        published = summary.published,
        "Catalog refreshed"
    );

    Ok(())
}
