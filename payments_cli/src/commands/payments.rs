use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use payments_lib::types::CreatePaymentRequest;
use payments_lib::validation;
use payments_lib::{PaymentSearchQuery, PaymentService, PaymentsListController, TotalQuery};

use crate::output::{print_json, print_payments, spinner, OutputFormat};
use crate::App;

#[derive(Args)]
pub struct PaymentsArgs {
    #[command(subcommand)]
    pub command: PaymentsCommand,
}

#[derive(Subcommand)]
pub enum PaymentsCommand {
    /// List payments page by page
    List {
        /// Page index (0-based)
        #[arg(long, default_value = "0")]
        page: u32,
        /// Results per page (defaults to the configured page size)
        #[arg(long)]
        size: Option<u32>,
        /// Sort expression, e.g. paymentDate,desc
        #[arg(long)]
        sort: Option<String>,
        /// Only show rows with this status (applied to the fetched page)
        #[arg(long)]
        status: Option<String>,
    },
    /// Show a single payment
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Payments made by a user
    ByUser {
        #[arg(long)]
        user_id: i64,
    },
    /// Payments made for an order
    ByOrder {
        #[arg(long)]
        order_id: i64,
    },
    /// Payments with a given status (server-side)
    ByStatus {
        #[arg(long)]
        status: String,
    },
    /// Search by any combination of user, order and status
    Search {
        #[arg(long)]
        user_id: Option<i64>,
        #[arg(long)]
        order_id: Option<i64>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Total paid in a date window, overall or for one user
    Total {
        /// Window start, YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS
        #[arg(long)]
        start: String,
        /// Window end, YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS
        #[arg(long)]
        end: String,
        #[arg(long)]
        user_id: Option<i64>,
    },
    /// Record a payment
    Create {
        #[arg(long)]
        order_id: i64,
        #[arg(long)]
        user_id: i64,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        status: Option<String>,
    },
}

pub async fn run(args: &PaymentsArgs, app: &App, format: &OutputFormat) -> Result<()> {
    let service = PaymentService::new(app.client.clone());

    match &args.command {
        PaymentsCommand::List {
            page,
            size,
            sort,
            status,
        } => {
            let size = validation::validate_page_size(size.unwrap_or(app.config.page_size))?;
            let status = status
                .as_deref()
                .map(validation::validate_payment_status)
                .transpose()?;

            let mut list = PaymentsListController::new(&service, size)
                .with_page(*page)
                .with_status(status);
            if let Some(sort) = sort {
                list = list.with_sort(sort);
            }

            let pb = spinner("Loading payments...");
            list.load().await;
            pb.finish_and_clear();

            if let Some(message) = list.error() {
                return Err(anyhow!("{}", message));
            }
            if let Some(view) = list.view() {
                eprintln!(
                    "Page {}/{} ({} total payments, {} shown from this page)",
                    view.page_number + 1,
                    view.total_pages.max(1),
                    view.total_elements,
                    view.filtered_count()
                );
                print_payments(&view.rows, format)?;
            }
        }
        PaymentsCommand::Get { id } => {
            let id = validation::validate_id(*id, "payment id")?;
            let payment = service.get(id).await?;
            print_payments(&[payment], format)?;
        }
        PaymentsCommand::ByUser { user_id } => {
            let user_id = validation::validate_id(*user_id, "user id")?;
            print_payments(&service.by_user(user_id).await?, format)?;
        }
        PaymentsCommand::ByOrder { order_id } => {
            let order_id = validation::validate_id(*order_id, "order id")?;
            print_payments(&service.by_order(order_id).await?, format)?;
        }
        PaymentsCommand::ByStatus { status } => {
            let status = validation::validate_payment_status(status)?;
            print_payments(&service.by_status(&status).await?, format)?;
        }
        PaymentsCommand::Search {
            user_id,
            order_id,
            status,
        } => {
            let mut query = PaymentSearchQuery::default();
            if let Some(user_id) = user_id {
                query = query.with_user_id(validation::validate_id(*user_id, "user id")?);
            }
            if let Some(order_id) = order_id {
                query = query.with_order_id(validation::validate_id(*order_id, "order id")?);
            }
            if let Some(status) = status {
                query = query.with_status(validation::validate_payment_status(status)?);
            }
            print_payments(&service.search(&query).await?, format)?;
        }
        PaymentsCommand::Total {
            start,
            end,
            user_id,
        } => {
            let (start, end) = validation::validate_date_range(
                validation::validate_date_time(start)?,
                validation::validate_date_time(end)?,
            )?;
            let window = TotalQuery::new(start, end);
            let total = match user_id {
                Some(user_id) => {
                    let user_id = validation::validate_id(*user_id, "user id")?;
                    service.user_total(user_id, &window).await?
                }
                None => service.total(&window).await?,
            };
            match format {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "startDate": start,
                    "endDate": end,
                    "userId": user_id,
                    "total": total,
                })),
                _ => println!("{:.2}", total),
            }
        }
        PaymentsCommand::Create {
            order_id,
            user_id,
            amount,
            status,
        } => {
            let request = CreatePaymentRequest {
                order_id: validation::validate_id(*order_id, "order id")?,
                user_id: validation::validate_id(*user_id, "user id")?,
                payment_amount: validation::validate_amount(*amount)?,
                status: status
                    .as_deref()
                    .map(validation::validate_payment_status)
                    .transpose()?,
            };
            let payment = service.create(&request).await?;
            print_payments(&[payment], format)?;
        }
    }

    Ok(())
}
