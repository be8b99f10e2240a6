use clap::{Args, Subcommand};

use super::ContextArgs;

mod list;

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(flatten)]
    pub(super) context: ContextArgs,

    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// Print one page of the catalog, or all of it with --all
    List(list::ListProductsArgs),
}

#[cfg(test)]
impl ProductsCommand {
    pub(super) fn list_params(&self) -> pricecrawl_app::domain::products::search::SearchParams {
        match &self.command {
            ProductsSubcommand::List(args) => args.params(),
        }
    }
}

pub(crate) async fn run(command: ProductsCommand) -> Result<(), String> {
    let ctx = command.context.connect().await?;

    match command.command {
        ProductsSubcommand::List(args) => list::run(&ctx, args).await,
    }
}
