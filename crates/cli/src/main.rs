//! Scan2Order CLI - Build a cart and place orders from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the restaurant's menu, or only the noodle dishes in category 1
//! s2o menu
//! s2o menu --search phở --category 1
//!
//! # Add two bowls of item 3, then one without onions
//! s2o cart add 3 -q 2
//! s2o cart add 3 --note "no onions"
//!
//! # Adjust the first line, set the second from raw text
//! s2o cart change 1 -- -1
//! s2o cart set 2 4
//!
//! # Send the cart to the kitchen and follow it
//! s2o order submit
//! s2o order watch 17
//! ```
//!
//! Configuration comes from `S2O_*` environment variables (see `config`).
//! Log verbosity follows `RUST_LOG` (default: `warn`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::time::Duration;

use clap::{Parser, Subcommand};
use scan2order_cli::commands::{self, cart::LineRef, menu::MenuFilter};
use scan2order_cli::{ApiClient, CartStore, ClientConfig};
use scan2order_core::{CategoryId, MenuItemId, OrderId};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "s2o")]
#[command(author, version, about = "Scan2Order ordering client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the restaurant's menu
    Menu {
        /// Only items whose name contains this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Only items in this category
        #[arg(short, long)]
        category: Option<CategoryId>,

        /// Include items that cannot be ordered right now
        #[arg(long)]
        all: bool,
    },
    /// Edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Submit and track orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart and its total
    Show,
    /// Add a menu item
    Add {
        /// Menu item ID (see `s2o menu`)
        item_id: MenuItemId,

        /// How many to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Kitchen note, e.g. "no onions"
        #[arg(short, long, default_value = "")]
        note: String,
    },
    /// Change a line's quantity by a signed amount
    Change {
        /// Line position or line ID
        line: LineRef,

        /// Amount to add; negative to reduce
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Set a line's quantity; zero or non-numeric text removes the line
    Set {
        /// Line position or line ID
        line: LineRef,

        /// New quantity as typed
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },
    /// Replace a line's note
    Note {
        /// Line position or line ID
        line: LineRef,

        /// New note
        text: String,
    },
    /// Remove a line
    Remove {
        /// Line position or line ID
        line: LineRef,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum OrderAction {
    /// Send the cart to the kitchen
    Submit,
    /// List orders placed from this device
    History,
    /// Follow an order until it is completed
    Watch {
        /// Order ID
        order_id: OrderId,

        /// Seconds between polls
        #[arg(long, default_value_t = 3)]
        every: u64,

        /// Give up after this many polls
        #[arg(long, default_value_t = 200, value_parser = clap::value_parser!(u32).range(1..))]
        max_polls: u32,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let client = ApiClient::new(&config)?;
    let store = CartStore::new(config.cart_path.clone());

    match cli.command {
        Commands::Menu {
            search,
            category,
            all,
        } => {
            let filter = MenuFilter {
                search,
                category,
                include_unavailable: all,
            };
            commands::menu::list(&config, &client, &filter).await?;
        }
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&store).await?,
            CartAction::Add {
                item_id,
                quantity,
                note,
            } => commands::cart::add(&config, &client, &store, item_id, quantity, &note).await?,
            CartAction::Change { line, delta } => {
                commands::cart::change(&store, line, delta).await?;
            }
            CartAction::Set { line, quantity } => {
                commands::cart::set(&store, line, &quantity).await?;
            }
            CartAction::Note { line, text } => commands::cart::note(&store, line, &text).await?,
            CartAction::Remove { line } => commands::cart::remove(&store, line).await?,
            CartAction::Clear => commands::cart::clear(&store).await?,
        },
        Commands::Order { action } => match action {
            OrderAction::Submit => {
                commands::order::submit(&config, &client, &store).await?;
            }
            OrderAction::History => commands::order::history(&config, &client).await?,
            OrderAction::Watch {
                order_id,
                every,
                max_polls,
            } => {
                commands::order::watch(
                    &config,
                    &client,
                    order_id,
                    Duration::from_secs(every.max(1)),
                    max_polls,
                )
                .await?;
            }
        },
    }
    Ok(())
}
