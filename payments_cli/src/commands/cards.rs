use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use payments_lib::types::{CreatePaymentCardRequest, UpdatePaymentCardRequest};
use payments_lib::validation;
use payments_lib::{PageQuery, Paged, PaymentCardService};

use crate::output::{print_cards, OutputFormat};
use crate::App;

#[derive(Args)]
pub struct CardsArgs {
    #[command(subcommand)]
    pub command: CardsCommand,
}

#[derive(Subcommand)]
pub enum CardsCommand {
    /// List the acting user's cards
    List {
        /// Use the paginated endpoint
        #[arg(long)]
        paged: bool,
        /// Page index (0-based), with --paged
        #[arg(long, default_value = "0")]
        page: u32,
        /// Results per page, with --paged
        #[arg(long)]
        size: Option<u32>,
        /// Sort expression, with --paged
        #[arg(long)]
        sort: Option<String>,
    },
    /// Register a new card
    Add {
        #[arg(long)]
        number: String,
        #[arg(long)]
        holder: String,
        /// Expiration date as MM/YY
        #[arg(long)]
        expires: String,
        /// Card network, e.g. VISA
        #[arg(long = "type")]
        card_type: Option<String>,
    },
    /// Change a card's holder, expiration or type
    Update {
        #[arg(long)]
        card_id: i64,
        #[arg(long)]
        holder: Option<String>,
        #[arg(long)]
        expires: Option<String>,
        #[arg(long = "type")]
        card_type: Option<String>,
    },
    /// Activate or deactivate a card
    SetStatus {
        #[arg(long)]
        card_id: i64,
        #[arg(long, action = clap::ArgAction::Set)]
        active: bool,
    },
    /// Remove a card
    Delete {
        #[arg(long)]
        card_id: i64,
    },
}

pub async fn run(args: &CardsArgs, app: &App, format: &OutputFormat) -> Result<()> {
    let session = app.session()?;
    let service = PaymentCardService::new(app.client.clone());

    match &args.command {
        CardsCommand::List {
            paged,
            page,
            size,
            sort,
        } => {
            if !paged {
                print_cards(&service.list(&session).await?, format)?;
                return Ok(());
            }
            let size = validation::validate_page_size(size.unwrap_or(app.config.page_size))?;
            let mut query = PageQuery::default().with_page(*page).with_size(size);
            if let Some(sort) = sort {
                query = query.with_sort(sort);
            }
            let cards = service.list_paged(&session, &query).await?;
            eprintln!(
                "Page {}/{} ({} total cards)",
                cards.page_number + 1,
                cards.total_pages.max(1),
                cards.total_elements
            );
            print_cards(&cards.content, format)?;
        }
        CardsCommand::Add {
            number,
            holder,
            expires,
            card_type,
        } => {
            let request = CreatePaymentCardRequest {
                card_number: validation::validate_card_number(number)?,
                card_holder_name: validation::validate_holder_name(holder)?,
                expiration_date: validation::validate_expiration(expires)?,
                card_type: card_type.as_ref().map(|t| t.trim().to_uppercase()),
            };
            let card = service.create(&session, &request).await?;
            print_cards(&[card], format)?;
        }
        CardsCommand::Update {
            card_id,
            holder,
            expires,
            card_type,
        } => {
            let card_id = validation::validate_id(*card_id, "card id")?;
            let request = UpdatePaymentCardRequest {
                card_holder_name: holder
                    .as_deref()
                    .map(validation::validate_holder_name)
                    .transpose()?,
                expiration_date: expires
                    .as_deref()
                    .map(validation::validate_expiration)
                    .transpose()?,
                card_type: card_type.as_ref().map(|t| t.trim().to_uppercase()),
            };
            if request.card_holder_name.is_none()
                && request.expiration_date.is_none()
                && request.card_type.is_none()
            {
                bail!("nothing to update; pass --holder, --expires or --type");
            }
            let card = service.update(&session, card_id, &request).await?;
            print_cards(&[card], format)?;
        }
        CardsCommand::SetStatus { card_id, active } => {
            let card_id = validation::validate_id(*card_id, "card id")?;
            let card = service.update_status(&session, card_id, *active).await?;
            print_cards(&[card], format)?;
        }
        CardsCommand::Delete { card_id } => {
            let card_id = validation::validate_id(*card_id, "card id")?;
            service.delete(&session, card_id).await?;
            tracing::info!("Deleted card {} of user {}", card_id, session.user_id());
        }
    }

    Ok(())
}
