mod commands;
mod output;
mod xml_output;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use payments_lib::{Client, Config, Session};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "payadmin")]
#[command(about = "Administer orders, payments and payment cards through the API gateway")]
struct Cli {
    /// Output format: table, json, csv, md, xml
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Gateway base URL (overrides config and PAYMENTS_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Act as this user (overrides config and PAYMENTS_USER_ID)
    #[arg(long, global = true)]
    user: Option<i64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List, look up, search and create payments
    Payments(commands::payments::PaymentsArgs),
    /// Manage the acting user's payment cards
    Cards(commands::cards::CardsArgs),
    /// List or look up orders
    Orders(commands::orders::OrdersArgs),
    /// Pay an order with one of the acting user's cards
    Pay(commands::pay::PayArgs),
}

/// Everything a command needs: resolved config and a gateway client.
pub struct App {
    pub config: Config,
    pub client: Client,
    user: Option<i64>,
}

impl App {
    /// The acting user, or an error telling the operator how to set one.
    pub fn session(&self) -> Result<Session> {
        let user_id = self
            .user
            .ok_or_else(|| anyhow!("no user given; pass --user or set PAYMENTS_USER_ID"))?;
        Ok(Session::new(user_id)?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("payadmin=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = OutputFormat::parse(&cli.output)?;

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
        config = config.validated()?;
    }
    let user = cli.user.or(config.user_id);
    let client = Client::new(&config.api_url)?;
    let app = App {
        config,
        client,
        user,
    };

    match &cli.command {
        Commands::Payments(args) => commands::payments::run(args, &app, &format).await?,
        Commands::Cards(args) => commands::cards::run(args, &app, &format).await?,
        Commands::Orders(args) => commands::orders::run(args, &app, &format).await?,
        Commands::Pay(args) => commands::pay::run(args, &app, &format).await?,
    }

    Ok(())
}
