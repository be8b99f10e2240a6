use clap::{Args, ValueEnum};
use pricecrawl_app::{
    context::AppContext,
    domain::products::search::{OrderBy, OrderMethod, SearchParams},
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrderByArg {
    Default,
    Price,
    PriceChangesCounter,
    LastUpdateTs,
    Name,
}

impl From<OrderByArg> for OrderBy {
    fn from(value: OrderByArg) -> Self {
        match value {
            OrderByArg::Default => Self::Default,
            OrderByArg::Price => Self::Price,
            OrderByArg::PriceChangesCounter => Self::PriceChangesCounter,
            OrderByArg::LastUpdateTs => Self::LastUpdateTs,
            OrderByArg::Name => Self::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrderMethodArg {
    Asc,
    Desc,
}

impl From<OrderMethodArg> for OrderMethod {
    fn from(value: OrderMethodArg) -> Self {
        match value {
            OrderMethodArg::Asc => Self::Ascending,
            OrderMethodArg::Desc => Self::Descending,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct ListProductsArgs {
    #[arg(long, value_enum, default_value_t = OrderByArg::Default)]
    order_by: OrderByArg,

    #[arg(long, value_enum, default_value_t = OrderMethodArg::Asc)]
    order_method: OrderMethodArg,

    /// Token returned with the previous page
    #[arg(long, default_value = "")]
    page_token: String,

    #[arg(long)]
    page_size: u32,

    /// Keep following next-page tokens until the catalog is exhausted
    #[arg(long)]
    all: bool,
}

impl ListProductsArgs {
    pub(super) fn params(&self) -> SearchParams {
        SearchParams::new(self.order_by.into(), self.order_method.into())
    }
}

pub(crate) async fn run(ctx: &AppContext, args: ListProductsArgs) -> Result<(), String> {
    let params = args.params();
    let mut page_token = args.page_token;

    loop {
        let page = ctx
            .products
            .list_products(params, page_token, args.page_size)
            .await
            .map_err(|error| format!("failed to list products: {error}"))?;

        for product in &page.products {
            println!(
                "{}\t{}\t{}\t{}\t{}",
                product.id,
                product.name,
                product.price,
                product.price_changes_counter,
                product.last_update_ts
            );
        }

        if !args.all || page.next_page_token.is_empty() {
            if !page.next_page_token.is_empty() {
                println!("next_page_token: {}", page.next_page_token);
            }

            return Ok(());
        }

        page_token = page.next_page_token;
    }
}
