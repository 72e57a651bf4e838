//! ShopHub CLI - storefront and admin driver.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! shophub browse --category electronics
//!
//! # Cart operations
//! shophub cart add p-1
//! shophub cart set-qty p-1 3
//! shophub cart show
//!
//! # Checkout
//! shophub address add --label Home --street "1 Main St" --city Springfield \
//!     --state IL --postal-code 62704 --phone 555-0100
//! shophub checkout
//!
//! # Admin (requires an allowlisted email)
//! shophub admin dashboard
//! shophub admin set-status o-1 "Shipped"
//! ```
//!
//! The authenticated user is read from `SHOPHUB_USER_ID` /
//! `SHOPHUB_USER_EMAIL`, as exported by the identity provider.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shophub")]
#[command(author, version, about = "ShopHub storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Browse {
        /// Only show products in this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Manage saved shipping addresses
    Address {
        #[command(subcommand)]
        action: AddressAction,
    },
    /// Place an order from the current cart
    Checkout {
        /// Address id to ship to (defaults to the first saved address)
        #[arg(short, long)]
        address: Option<String>,
    },
    /// Show the current user's order history
    Orders,
    /// Store administration (requires an allowlisted email)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product
    Add { product_id: String },
    /// Remove a product's line
    Remove { product_id: String },
    /// Set a line's quantity exactly (0 removes the line)
    SetQty { product_id: String, quantity: u32 },
    /// Show the cart with line totals
    Show,
    /// Empty the cart (the wishlist is kept)
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Add a product to the wishlist
    Add { product_id: String },
    /// Remove a product from the wishlist
    Remove { product_id: String },
    /// Show the wishlist
    Show,
}

#[derive(Subcommand)]
enum AddressAction {
    /// List saved addresses
    List,
    /// Save a new address
    Add {
        /// Short label such as "Home" or "Office"
        #[arg(long)]
        label: String,
        #[arg(long)]
        street: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        state: String,
        #[arg(long)]
        postal_code: String,
        #[arg(long)]
        phone: String,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Revenue and stock overview
    Dashboard,
    /// List all orders, newest first
    Orders,
    /// Change an order's status (`On Process`, `Shipped`, `Delivered`)
    SetStatus { order_id: String, status: String },
    /// Correct a product's stock count
    SetStock { product_id: String, stock: u32 },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Browse { category } => commands::browse::run(category.as_deref()).await?,
        Commands::Cart { action } => match action {
            CartAction::Add { product_id } => commands::cart::add(&product_id.into()).await?,
            CartAction::Remove { product_id } => {
                commands::cart::remove(&product_id.into())?;
            }
            CartAction::SetQty {
                product_id,
                quantity,
            } => commands::cart::set_quantity(&product_id.into(), quantity)?,
            CartAction::Show => commands::cart::show()?,
            CartAction::Clear => commands::cart::clear()?,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Add { product_id } => {
                commands::wishlist::add(&product_id.into()).await?;
            }
            WishlistAction::Remove { product_id } => {
                commands::wishlist::remove(&product_id.into())?;
            }
            WishlistAction::Show => commands::wishlist::show()?,
        },
        Commands::Address { action } => match action {
            AddressAction::List => commands::address::list().await?,
            AddressAction::Add {
                label,
                street,
                city,
                state,
                postal_code,
                phone,
            } => {
                commands::address::add(shophub_core::NewAddress {
                    label,
                    street,
                    city,
                    state,
                    postal_code,
                    phone,
                })
                .await?;
            }
        },
        Commands::Checkout { address } => commands::checkout::run(address).await?,
        Commands::Orders => commands::orders::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Dashboard => commands::admin::dashboard().await?,
            AdminAction::Orders => commands::admin::orders().await?,
            AdminAction::SetStatus { order_id, status } => {
                commands::admin::set_status(&order_id.into(), &status).await?;
            }
            AdminAction::SetStock { product_id, stock } => {
                commands::admin::set_stock(&product_id.into(), stock).await?;
            }
        },
    }
    Ok(())
}
