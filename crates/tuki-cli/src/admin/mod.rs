//! Back-office command handlers.
//!
//! Every command here checks for an administrator session before touching
//! the backend. Listing commands are read-only; the rest send one request and
//! print the backend's confirmation when it sends one.

mod categories;
mod dashboard;
mod orders;
mod products;

use clap::Subcommand;

use crate::app::App;

pub(crate) use categories::CategoryCommands;
pub(crate) use orders::OrderCommands;
pub(crate) use products::ProductCommands;

/// Sub-commands available under `admin`.
#[derive(Debug, Subcommand)]
pub enum AdminCommands {
    /// Headline numbers for categories, products and orders
    Dashboard,
    /// Manage categories
    Categories {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Manage products
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// Review orders and change their status
    Orders {
        #[command(subcommand)]
        command: OrderCommands,
    },
}

pub(crate) async fn run_admin(app: &App, command: AdminCommands) -> anyhow::Result<()> {
    let admin = app.require_admin()?;
    tracing::debug!(user_id = admin.id, ?command, "admin command");

    match command {
        AdminCommands::Dashboard => dashboard::run_dashboard(app).await,
        AdminCommands::Categories { command } => categories::run_categories(app, command).await,
        AdminCommands::Products { command } => products::run_products(app, command).await,
        AdminCommands::Orders { command } => orders::run_orders(app, command).await,
    }
}

/// Prints the backend's confirmation, or `fallback` when it sent none.
fn confirm(message: Option<String>, fallback: &str) {
    match message {
        Some(message) if !message.trim().is_empty() => println!("{}", message.trim()),
        _ => println!("{fallback}"),
    }
}

/// `yes`/`no` column text.
fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
