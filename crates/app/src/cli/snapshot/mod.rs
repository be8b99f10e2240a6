use clap::{Args, Subcommand};

use super::ContextArgs;

mod fetch;
mod ingest;

#[derive(Debug, Args)]
pub(crate) struct SnapshotCommand {
    #[command(flatten)]
    pub(super) context: ContextArgs,

    #[command(subcommand)]
    command: SnapshotSubcommand,
}

#[derive(Debug, Subcommand)]
enum SnapshotSubcommand {
    /// Ingest a snapshot file from disk
    Ingest(ingest::IngestArgs),

    /// Download a snapshot and ingest it
    Fetch(fetch::FetchArgs),
}

pub(crate) async fn run(command: SnapshotCommand) -> Result<(), String> {
    let ctx = command.context.connect().await?;

    match command.command {
        SnapshotSubcommand::Ingest(args) => ingest::run(&ctx, args).await,
        SnapshotSubcommand::Fetch(args) => fetch::run(&ctx, args).await,
    }
}
