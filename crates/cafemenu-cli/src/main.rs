mod bridge;
mod cart;
mod menu;
mod order;
mod session;

use anyhow::Context;
use cafemenu_client::FeedClient;
use cafemenu_core::{AppConfig, ClientStorage, JsonFileStore, Menu};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cart::CartCommands;
use crate::menu::SelectionArgs;
use crate::order::OrderArgs;

#[derive(Debug, Parser)]
#[command(name = "cafemenu")]
#[command(about = "Coffee shop storefront in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the menu by category
    Menu {
        /// Only products whose name contains this text
        #[arg(long)]
        search: Option<String>,
        /// Only this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Price a product with options without adding it
    Price(SelectionArgs),
    /// Add a product with options to the cart
    Add(SelectionArgs),
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        command: Option<CartCommands>,
    },
    /// Apply a promo code to the cart
    Promo {
        /// Code as printed on the flyer
        code: String,
    },
    /// Submit the cart as an order
    Order(OrderArgs),
    /// Show the last submitted order, or put it back into the cart
    Repeat {
        /// Add the last order's lines to the cart
        #[arg(long)]
        apply: bool,
    },
    /// Mark or unmark a product as favorite
    Favorite {
        /// Product id
        id: String,
    },
}

/// Fetches and parses the menu feed.
///
/// # Errors
///
/// Returns an error when no feed is configured or it cannot be loaded.
pub(crate) async fn load_menu(config: &AppConfig) -> anyhow::Result<Menu> {
    let feed_url = config.require_feed_url()?;
    let client = FeedClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        config.cors_proxy.clone(),
    )?;
    client
        .load_menu(feed_url)
        .await
        .context("the menu is unavailable right now, try again later")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = cafemenu_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut storage = ClientStorage::new(JsonFileStore::open(&config.storage_path));

    match cli.command {
        Commands::Menu { search, category } => {
            let menu = load_menu(&config).await?;
            menu::run_menu(&menu, &storage, search.as_deref(), category.as_deref());
        }
        Commands::Price(args) => {
            let menu = load_menu(&config).await?;
            menu::run_price(&menu, &args)?;
        }
        Commands::Add(args) => {
            let menu = load_menu(&config).await?;
            menu::run_add(&menu, &mut storage, &args)?;
        }
        Commands::Cart { command } => {
            cart::run_cart(&mut storage, command.unwrap_or(CartCommands::Show))?;
        }
        Commands::Promo { code } => {
            let menu = load_menu(&config).await?;
            order::run_promo(&config, &menu, &mut storage, &code).await?;
        }
        Commands::Order(args) => {
            let menu = load_menu(&config).await?;
            order::run_order(&config, &menu, &mut storage, &args)?;
        }
        Commands::Repeat { apply } => cart::run_repeat(&mut storage, apply)?,
        Commands::Favorite { id } => {
            let menu = load_menu(&config).await?;
            menu::run_favorite(&menu, &mut storage, &id)?;
        }
    }

    Ok(())
}
