//! Snapshot Fetch Config

use clap::Args;

/// Snapshot download settings.
#[derive(Debug, Args)]
pub struct FetchConfig {
    /// Timeout for a whole snapshot download, in seconds
    #[arg(long, env = "FETCH_TIMEOUT_SECONDS", default_value_t = 30)]
    pub fetch_timeout_seconds: u64,
}
