use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use pricecrawl_app::{context::AppContext, domain::snapshots::fetcher::DEFAULT_FETCH_TIMEOUT};

mod db;
mod products;
mod snapshot;

#[derive(Debug, Parser)]
#[command(name = "pricecrawl-app", about = "Price Crawl CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Snapshot(snapshot::SnapshotCommand),
    Products(products::ProductsCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Snapshot(command) => snapshot::run(command).await,
            Commands::Products(command) => products::run(command).await,
        }
    }
}

/// Connection settings shared by every command that talks to the catalog.
#[derive(Debug, Args)]
pub(crate) struct ContextArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    database_url: Option<String>,

    /// Snapshot download timeout in seconds
    #[arg(
        long,
        env = "FETCH_TIMEOUT_SECONDS",
        default_value_t = DEFAULT_FETCH_TIMEOUT.as_secs(),
        global = true
    )]
    fetch_timeout_seconds: u64,
}

impl ContextArgs {
    pub(crate) async fn connect(&self) -> Result<AppContext, String> {
        let database_url = self
            .database_url
            .as_deref()
            .ok_or_else(|| "DATABASE_URL must be set".to_string())?;

        AppContext::from_database_url(
            database_url,
            Duration::from_secs(self.fetch_timeout_seconds),
        )
        .await
        .map_err(|error| format!("failed to initialise application: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use pricecrawl_app::domain::products::search::{OrderBy, OrderMethod};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn catalog_commands_share_connection_settings() -> TestResult {
        for args in [
            vec!["pricecrawl-app", "products", "list", "--page-size", "5"],
            vec!["pricecrawl-app", "snapshot", "fetch", "--url", "https://example.com/a.csv"],
        ] {
            let mut args = args;
            args.extend(["--database-url", "postgres://localhost/pricecrawl", "--fetch-timeout-seconds", "7"]);

            let cli = Cli::try_parse_from(args)?;

            let context = match &cli.command {
                Commands::Products(command) => &command.context,
                Commands::Snapshot(command) => &command.context,
                Commands::Db(_) => return Err("unexpected db command".into()),
            };

            assert_eq!(
                context.database_url.as_deref(),
                Some("postgres://localhost/pricecrawl")
            );
            assert_eq!(context.fetch_timeout_seconds, 7);
        }

        Ok(())
    }

    #[test]
    fn products_list_maps_orders_and_keeps_the_default_timeout() -> TestResult {
        let cli = Cli::try_parse_from([
            "pricecrawl-app",
            "products",
            "list",
            "--order-by",
            "price",
            "--order-method",
            "desc",
            "--page-size",
            "5",
        ])?;

        let Commands::Products(command) = cli.command else {
            return Err("expected the products command".into());
        };

        if std::env::var_os("FETCH_TIMEOUT_SECONDS").is_none() {
            assert_eq!(
                command.context.fetch_timeout_seconds,
                DEFAULT_FETCH_TIMEOUT.as_secs()
            );
        }

        let params = command.list_params();
        assert_eq!(params.order_by, OrderBy::Price);
        assert_eq!(params.order_method, OrderMethod::Descending);

        Ok(())
    }
}
