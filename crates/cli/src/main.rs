//! Tienda CLI - Browse the catalog, manage the cart, confirm payment.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! tienda products
//! tienda products --category "men's clothing"
//! tienda featured --limit 3
//! tienda categories
//!
//! # Cart
//! tienda cart add 1
//! tienda cart remove 1
//! tienda cart remove-all 1
//! tienda cart show
//!
//! # Checkout
//! tienda checkout instructions
//! tienda checkout pay -n "Ana Pérez" -p 04141234567 -r 1234 --receipt ./comprobante.jpg
//! ```
//!
//! The cart is saved after every change and restored on the next run.
//! See `tienda_storefront::config` for environment variables.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tienda_core::{Category, ProductId};
use tienda_storefront::AppState;
use tienda_storefront::catalog::DEFAULT_FEATURED_LIMIT;
use tienda_storefront::config::StorefrontConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod views;

#[derive(Parser)]
#[command(name = "tienda")]
#[command(author, version, about = "Tienda storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, optionally filtered by category
    Products {
        /// Category name as the catalog spells it
        #[arg(short, long)]
        category: Option<Category>,
    },
    /// Show the featured shelf
    Featured {
        /// Number of products
        #[arg(short, long, default_value_t = DEFAULT_FEATURED_LIMIT)]
        limit: u32,
    },
    /// List catalog categories
    Categories,
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Pay for the cart
    Checkout {
        #[command(subcommand)]
        action: CheckoutAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        id: ProductId,
    },
    /// Remove one unit of a product
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Remove a product regardless of quantity
    RemoveAll {
        /// Product ID
        id: ProductId,
    },
}

#[derive(Subcommand)]
enum CheckoutAction {
    /// Show bank transfer details and the amount due
    Instructions,
    /// Send proof of payment for the cart total
    Pay {
        /// Full name of the payer
        #[arg(short, long)]
        name: String,

        /// Contact phone (10-15 digits)
        #[arg(short, long)]
        phone: String,

        /// Last 4 digits of the transfer reference
        #[arg(short, long)]
        reference: String,

        /// Proof-of-payment file (image or PDF)
        #[arg(long)]
        receipt: PathBuf,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("error: {e}");
            }
            return ExitCode::FAILURE;
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr so stdout carries only the views.
    // Defaults to warn level if RUST_LOG is not set.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tienda=warn,tienda_storefront=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let state = AppState::new(config);

    match run(cli, &state).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.report();
            #[allow(clippy::print_stderr)]
            {
                eprintln!("error: {}", e.user_message());
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, state: &AppState) -> tienda_storefront::Result<()> {
    match cli.command {
        Commands::Products { category } => {
            commands::catalog::products(state, category.as_ref()).await?;
        }
        Commands::Featured { limit } => commands::catalog::featured(state, limit).await?,
        Commands::Categories => commands::catalog::categories(state).await?,
        Commands::Cart { action } => {
            let mut cart = state.open_cart();
            match action {
                CartAction::Show => commands::cart::show(&cart),
                CartAction::Add { id } => commands::cart::add(state, &mut cart, id).await?,
                CartAction::Remove { id } => commands::cart::remove(&mut cart, id),
                CartAction::RemoveAll { id } => commands::cart::remove_all(&mut cart, id),
            }
        }
        Commands::Checkout { action } => {
            let mut cart = state.open_cart();
            match action {
                CheckoutAction::Instructions => commands::checkout::instructions(state, &cart),
                CheckoutAction::Pay {
                    name,
                    phone,
                    reference,
                    receipt,
                } => {
                    let form = commands::checkout::PayArgs {
                        name,
                        phone,
                        reference,
                        receipt,
                    };
                    commands::checkout::pay(state, &mut cart, form).await?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cart_add() {
        let cli = Cli::try_parse_from(["tienda", "cart", "add", "7"]).unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(
            cli.command,
            Commands::Cart {
                action: CartAction::Add { id }
            } if id == ProductId::new(7)
        ));
    }

    #[test]
    fn test_parse_category_filter() {
        let cli = Cli::try_parse_from(["tienda", "products", "--category", "men's clothing"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(
            cli.command,
            Commands::Products {
                category: Some(Category::MensClothing)
            }
        ));
    }

    #[test]
    fn test_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["tienda", "cart", "remove", "abc"]).is_err());
    }
}
