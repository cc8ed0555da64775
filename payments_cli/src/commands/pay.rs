use std::io::{BufRead, Write};

use anyhow::{anyhow, bail, Result};
use clap::Args;
use payments_lib::types::{CardID, PaymentCard};
use payments_lib::validation;
use payments_lib::{OrderService, PayOrderFlow, PaymentCardService, PaymentService};

use crate::output::{print_cards, print_orders, print_payments, spinner, OutputFormat};
use crate::App;

#[derive(Args)]
pub struct PayArgs {
    /// Order to pay
    #[arg(long)]
    pub order_id: i64,

    /// Card to pay with (defaults to the first active card)
    #[arg(long)]
    pub card_id: Option<i64>,

    /// Skip the confirmation prompt and do not offer a retry
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub async fn run(args: &PayArgs, app: &App, format: &OutputFormat) -> Result<()> {
    let session = app.session()?;
    let order_id = validation::validate_id(args.order_id, "order id")?;

    let orders = OrderService::new(app.client.clone());
    let cards = PaymentCardService::new(app.client.clone());
    let payments = PaymentService::new(app.client.clone());
    let mut flow = PayOrderFlow::new(&orders, &cards, &payments, session);

    let pb = spinner("Loading order...");
    flow.load(order_id).await;
    pb.finish_and_clear();

    if let Some(message) = flow.error() {
        bail!("{} {}", message, order_id);
    }
    if let Some(order) = flow.order() {
        print_orders(std::slice::from_ref(order), format)?;
    }
    if let Some(warning) = flow.warning() {
        eprintln!("Warning: {}", warning);
    }

    if !flow.available_cards().is_empty() {
        print_cards(flow.available_cards(), format)?;
    }

    if let Some(card_id) = args.card_id {
        flow.select_card(validation::validate_id(card_id, "card id")?)?;
    }
    let card_id = check_selection(flow.selected_card(), flow.available_cards())?;

    if !args.yes && !confirm(&format!("Pay order {} with card {}?", order_id, card_id))? {
        eprintln!("Cancelled.");
        return Ok(());
    }

    loop {
        let pb = spinner("Processing payment...");
        let outcome = flow.pay().await;
        pb.finish_and_clear();

        match outcome {
            Some(outcome) => {
                eprintln!("{}", flow.success().unwrap_or_default());
                print_payments(std::slice::from_ref(&outcome.payment), format)?;

                tokio::time::sleep(outcome.redirect.after).await;
                tracing::info!("Showing {}", outcome.redirect.path);
                print_orders(&orders.by_user(session.user_id()).await?, format)?;
                return Ok(());
            }
            None => {
                let message = flow.error().unwrap_or("Payment failed").to_string();
                if args.yes || !confirm(&format!("{} Retry?", message))? {
                    bail!("{}", message);
                }
            }
        }
    }
}

/// The card to pay with. When no card is active the first card is still
/// selected; that is allowed, with a warning.
fn check_selection(selected: Option<CardID>, active: &[PaymentCard]) -> Result<CardID> {
    let card_id = selected.ok_or_else(|| anyhow!("no payment cards on file for this user"))?;
    if !active.iter().any(|c| c.id == card_id) {
        eprintln!("Warning: card {} is not active", card_id);
    }
    Ok(card_id)
}

/// Ask a yes/no question on stderr and read the answer from stdin.
fn confirm(question: &str) -> Result<bool> {
    eprint!("{} [y/N] ", question);
    std::io::stderr().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
