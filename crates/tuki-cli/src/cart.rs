use anyhow::bail;
use clap::Subcommand;
use tuki_core::{CartLine, CartSummary, Product};

use crate::app::App;
use crate::format::{format_currency, truncate};

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Show the cart checked against current stock
    Show,
    /// Add one unit of a product
    Add { id: u64 },
    /// Set the quantity of a product (0 removes it)
    Set { id: u64, quantity: u32 },
    /// Remove a product
    Remove { id: u64 },
    /// Empty the cart
    Clear,
}

/// The cart page after reconciling with the catalog.
#[derive(Debug)]
pub(crate) struct CartState {
    pub lines: Vec<CartLine>,
    pub summary: CartSummary,
}

/// Reconciles the stored cart with the catalog, saving any clamped quantities.
pub(crate) async fn load_cart_state(app: &App) -> anyhow::Result<CartState> {
    let products = app.api.products().await?;
    let reconciliation = app.cart.reconcile(&products)?;
    let summary = CartSummary::from_lines(&reconciliation.lines, app.config.shipping_cost);
    Ok(CartState {
        lines: reconciliation.lines,
        summary,
    })
}

pub(crate) async fn run_cart(app: &App, command: CartCommands) -> anyhow::Result<()> {
    match command {
        CartCommands::Show => {
            let state = load_cart_state(app).await?;
            render_cart(&state);
        }
        CartCommands::Add { id } => {
            let product = app.api.product(id).await?;
            if !product.is_purchasable() {
                bail!("{} is not available right now", product.name);
            }
            let key = id.to_string();
            let in_cart = app
                .cart
                .load()
                .iter()
                .find(|item| item.id == key)
                .map_or(0, |item| item.quantity);
            if u64::from(in_cart) >= product.stock {
                bail!("you already have all {} available units of {}", product.stock, product.name);
            }
            app.cart.add(&key)?;
            println!("Added {} to the cart ({} items)", product.name, app.cart.count());
        }
        CartCommands::Set { id, quantity } => {
            if quantity > 0 {
                let product = app.api.product(id).await?;
                check_quantity(&product, quantity)?;
            }
            let items = app.cart.set_quantity(&id.to_string(), quantity)?;
            println!("Cart updated ({} lines)", items.len());
        }
        CartCommands::Remove { id } => {
            app.cart.remove(&id.to_string())?;
            println!("Removed product {id} from the cart");
        }
        CartCommands::Clear => {
            app.cart.clear()?;
            println!("Cart emptied");
        }
    }
    Ok(())
}

/// Refuses quantities the product cannot cover.
fn check_quantity(product: &Product, quantity: u32) -> anyhow::Result<()> {
    if !product.is_purchasable() {
        bail!("{} is not available right now", product.name);
    }
    if u64::from(quantity) > product.stock {
        bail!("only {} units of {} are available", product.stock, product.name);
    }
    Ok(())
}

pub(crate) fn render_cart(state: &CartState) {
    if state.lines.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    println!("{:<6}{:<28}{:>5}{:>14}  NOTE", "ID", "PRODUCT", "QTY", "TOTAL");
    for line in &state.lines {
        let name = line
            .product
            .as_ref()
            .map_or_else(|| format!("product {}", line.id), |p| truncate(&p.name, 25));
        println!(
            "{:<6}{:<28}{:>5}{:>14}  {}",
            line.id,
            name,
            line.quantity,
            format_currency(line.total()),
            line.notice().unwrap_or_default()
        );
    }

    render_summary(&state.summary);
}

pub(crate) fn render_summary(summary: &CartSummary) {
    println!();
    println!("Subtotal: {:>14}", format_currency(summary.subtotal));
    println!("Shipping: {:>14}", format_currency(summary.shipping));
    println!("Total:    {:>14}", format_currency(summary.total));
    if let Some(warning) = &summary.warning {
        println!("\n{warning}");
    }
}
