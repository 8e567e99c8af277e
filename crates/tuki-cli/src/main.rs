mod admin;
mod app;
mod auth;
mod cart;
mod catalog;
mod checkout;
mod format;
mod orders;
mod product;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tuki_api::ApiError;

use crate::admin::AdminCommands;
use crate::app::App;
use crate::cart::CartCommands;
use crate::catalog::SortOrder;

#[derive(Debug, Parser)]
#[command(name = "tuki")]
#[command(about = "Tuki storefront and back-office client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        /// Match against product name and description
        #[arg(long)]
        search: Option<String>,
        /// Only show products in this category
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_enum, default_value_t = SortOrder::NameAsc)]
        sort: SortOrder,
    },
    /// Show one product
    Product {
        id: u64,
    },
    /// Inspect or change the cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Place an order with the available cart items
    Checkout {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        address: String,
        /// Payment method, e.g. "efectivo" or "tarjeta"
        #[arg(long)]
        payment: String,
    },
    /// List your orders
    Orders {
        /// Show the full detail of one order
        #[arg(long)]
        show: Option<String>,
    },
    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TUKI_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "TUKI_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Back-office commands (administrators only)
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loaded before parsing so `TUKI_PASSWORD` can come from `.env`.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("tuki ready; run `tuki --help` for commands");
        return Ok(());
    };

    let config = tuki_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let app = App::new(config)?;
    run(&app, command).await.map_err(|e| match e.downcast::<ApiError>() {
        Ok(api) => {
            tracing::debug!(error = ?api, "api call failed");
            anyhow::anyhow!(api.user_message())
        }
        Err(other) => other,
    })
}

async fn run(app: &App, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Catalog {
            search,
            category,
            sort,
        } => catalog::run_catalog(app, search, category, sort).await,
        Commands::Product { id } => product::run_product(app, id).await,
        Commands::Cart { command } => cart::run_cart(app, command).await,
        Commands::Checkout {
            phone,
            address,
            payment,
        } => checkout::run_checkout(app, &phone, &address, &payment).await,
        Commands::Orders { show } => orders::run_orders(app, show.as_deref()).await,
        Commands::Login { email, password } => auth::run_login(app, &email, &password).await,
        Commands::Register {
            name,
            email,
            password,
        } => auth::run_register(app, &name, &email, &password).await,
        Commands::Logout => auth::run_logout(app),
        Commands::Admin { command } => admin::run_admin(app, command).await,
    }
}
