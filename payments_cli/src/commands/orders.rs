use anyhow::Result;
use clap::{Args, Subcommand};
use payments_lib::validation;
use payments_lib::{OrderService, PageQuery, Paged};

use crate::output::{print_orders, spinner, OutputFormat};
use crate::App;

#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// Show a single order
    Get {
        #[arg(long)]
        id: i64,
    },
    /// List orders page by page
    List {
        /// Page index (0-based)
        #[arg(long, default_value = "0")]
        page: u32,
        /// Results per page (defaults to the configured page size)
        #[arg(long)]
        size: Option<u32>,
        /// Sort expression, e.g. createdAt,desc
        #[arg(long)]
        sort: Option<String>,
    },
    /// Orders placed by a user
    ByUser {
        #[arg(long)]
        user_id: i64,
    },
}

pub async fn run(args: &OrdersArgs, app: &App, format: &OutputFormat) -> Result<()> {
    let service = OrderService::new(app.client.clone());

    match &args.command {
        OrdersCommand::Get { id } => {
            let id = validation::validate_id(*id, "order id")?;
            print_orders(&[service.get(id).await?], format)?;
        }
        OrdersCommand::List { page, size, sort } => {
            let size = validation::validate_page_size(size.unwrap_or(app.config.page_size))?;
            list_page(&service, *page, size, sort.as_deref(), format).await?;
        }
        OrdersCommand::ByUser { user_id } => {
            let user_id = validation::validate_id(*user_id, "user id")?;
            print_orders(&service.by_user(user_id).await?, format)?;
        }
    }

    Ok(())
}

/// Fetch and print one page of orders with a page summary on stderr.
async fn list_page(
    service: &OrderService,
    page: u32,
    size: u32,
    sort: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    let mut query = PageQuery::default().with_page(page).with_size(size);
    if let Some(sort) = sort {
        query = query.with_sort(sort);
    }

    let pb = spinner("Loading orders...");
    let result = service.list(&query).await;
    pb.finish_and_clear();
    let orders = result?;

    eprintln!(
        "Page {}/{} ({} total orders)",
        orders.page_number + 1,
        orders.total_pages.max(1),
        orders.total_elements
    );
    print_orders(&orders.content, format)
}
