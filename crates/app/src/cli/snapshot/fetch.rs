use clap::Args;
use pricecrawl_app::context::AppContext;
use reqwest::Url;

#[derive(Debug, Args)]
pub(crate) struct FetchArgs {
    /// Snapshot URL
    #[arg(long)]
    url: Url,
}

pub(crate) async fn run(ctx: &AppContext, args: FetchArgs) -> Result<(), String> {
    let report = ctx
        .products
        .fetch_snapshot(args.url)
        .await
        .map_err(|error| format!("failed to fetch snapshot: {error}"))?;

    println!("products: {}", report.products);

    Ok(())
}
