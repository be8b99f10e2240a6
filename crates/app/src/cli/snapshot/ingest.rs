use std::path::PathBuf;

use clap::Args;
use jiff::Timestamp;
use pricecrawl_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct IngestArgs {
    /// Path to the CSV snapshot
    #[arg(long)]
    file: PathBuf,

    /// Batch timestamp in unix seconds; defaults to now
    #[arg(long)]
    timestamp: Option<i64>,
}

pub(crate) async fn run(ctx: &AppContext, args: IngestArgs) -> Result<(), String> {
    let snapshot = tokio::fs::read(&args.file)
        .await
        .map_err(|error| format!("failed to read {}: {error}", args.file.display()))?;

    let batch_ts = args
        .timestamp
        .unwrap_or_else(|| Timestamp::now().as_second());

    let report = ctx
        .products
        .ingest_snapshot(snapshot, batch_ts)
        .await
        .map_err(|error| format!("failed to ingest snapshot: {error}"))?;

    println!("products: {}", report.products);
    println!("batch_ts: {batch_ts}");

    Ok(())
}
