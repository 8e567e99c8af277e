use anyhow::{bail, Context};
use clap::Subcommand;
use tuki_core::{AdminOrder, OrderStatus};

use super::confirm;
use crate::app::App;
use crate::format::{format_currency, format_date, plural, truncate};
use crate::orders::{find_order, render_order_detail};

/// Sub-commands available under `admin orders`.
#[derive(Debug, Subcommand)]
pub enum OrderCommands {
    /// List every order, newest first
    List {
        /// Only orders in this status (pending, processing, completed, cancelled)
        #[arg(long)]
        status: Option<OrderStatus>,
    },
    /// Show one order with customer and payment details
    Show { id: String },
    /// Move an order to another status
    SetStatus { id: String, status: OrderStatus },
}

pub(crate) async fn run_orders(app: &App, command: OrderCommands) -> anyhow::Result<()> {
    match command {
        OrderCommands::List { status } => {
            let orders = app.api.admin_orders().await?;
            render_admin_orders(&filter_by_status(&orders, status));
        }
        OrderCommands::Show { id } => {
            let orders = app.api.admin_orders().await?;
            let order = find_order(&orders, &id, |o| &o.order)
                .with_context(|| format!("order {id} not found"))?;
            render_admin_order(order);
        }
        OrderCommands::SetStatus { id, status } => {
            let orders = app.api.admin_orders().await?;
            let order = find_order(&orders, &id, |o| &o.order)
                .with_context(|| format!("order {id} not found"))?;
            let order_id = status_change(order, status)?;
            let message = app.api.update_order_status(order_id, status).await?;
            tracing::info!(order_id, %status, "order status updated");
            confirm(
                message,
                &format!("Order {} is now {}", order.order.number, status.label()),
            );
        }
    }
    Ok(())
}

/// Checks that a status change makes sense and returns the backend order id.
fn status_change(order: &AdminOrder, status: OrderStatus) -> anyhow::Result<u64> {
    if order.order.status == status {
        bail!(
            "order {} is already {}",
            order.order.number,
            status.label().to_lowercase()
        );
    }
    order
        .order
        .id
        .trim()
        .parse::<u64>()
        .with_context(|| format!("order {} has no numeric id the backend can update", order.order.number))
}

fn filter_by_status(orders: &[AdminOrder], status: Option<OrderStatus>) -> Vec<&AdminOrder> {
    orders
        .iter()
        .filter(|o| status.is_none_or(|s| o.order.status == s))
        .collect()
}

fn render_admin_orders(orders: &[&AdminOrder]) {
    if orders.is_empty() {
        println!("No orders found.");
        return;
    }

    println!(
        "{:<8}{:<14}{:<18}{:<24}{:<12}{:>14}",
        "ID", "NUMBER", "DATE", "CUSTOMER", "STATUS", "TOTAL"
    );
    for admin in orders {
        let order = &admin.order;
        println!(
            "{:<8}{:<14}{:<18}{:<24}{:<12}{:>14}",
            truncate(&order.id, 6),
            truncate(&order.number, 11),
            format_date(&order.created_at),
            truncate(&admin.customer.name, 21),
            order.status.label(),
            format_currency(order.total)
        );
    }
    println!("\n{}", plural(orders.len(), "order"));
}

fn render_admin_order(admin: &AdminOrder) {
    render_order_detail(&admin.order);

    let customer = &admin.customer;
    println!("\nCustomer");
    println!("  {:<10} {}", "Name", customer.name);
    let contact = [
        ("Email", &customer.email),
        ("Phone", &customer.phone),
        ("Document", &customer.document),
    ];
    for (label, value) in contact {
        if let Some(value) = value {
            println!("  {label:<10} {value}");
        }
    }

    if let Some(payment) = &admin.payment {
        println!("\nPayment");
        let rows = [
            ("Method", &payment.method),
            ("Status", &payment.status),
            ("Reference", &payment.reference),
            ("Details", &payment.details),
        ];
        for (label, value) in rows {
            if let Some(value) = value {
                println!("  {label:<10} {value}");
            }
        }
    }

    if let Some(notes) = &admin.notes {
        println!("\nInternal notes: {notes}");
    }
}

#[cfg(test)]
mod tests {
    use tuki_core::{ClientOrder, CustomerInfo};

    use super::*;

    fn admin_order(id: &str, status: OrderStatus) -> AdminOrder {
        AdminOrder {
            order: ClientOrder {
                id: id.into(),
                number: format!("#{id}"),
                created_at: "2024-03-09T18:05:00.000Z".into(),
                status,
                products: Vec::new(),
                subtotal: 0.0,
                shipping: 0.0,
                discount: 0.0,
                total: 0.0,
                delivery: None,
                message: None,
            },
            customer: CustomerInfo {
                name: "Ana".into(),
                email: None,
                phone: None,
                document: None,
            },
            payment: None,
            notes: None,
        }
    }

    #[test]
    fn unchanged_status_is_rejected() {
        let order = admin_order("12", OrderStatus::Pending);
        let err = status_change(&order, OrderStatus::Pending).unwrap_err();
        assert!(err.to_string().contains("already pending"));
        assert_eq!(status_change(&order, OrderStatus::Completed).unwrap(), 12);
    }

    #[test]
    fn synthetic_ids_cannot_be_updated() {
        let order = admin_order("order-1", OrderStatus::Pending);
        assert!(status_change(&order, OrderStatus::Processing).is_err());
    }

    #[test]
    fn filters_by_status() {
        let orders = vec![
            admin_order("1", OrderStatus::Pending),
            admin_order("2", OrderStatus::Completed),
            admin_order("3", OrderStatus::Pending),
        ];
        let pending = filter_by_status(&orders, Some(OrderStatus::Pending));
        assert_eq!(
            pending.iter().map(|o| o.order.id.as_str()).collect::<Vec<_>>(),
            vec!["1", "3"]
        );
        assert_eq!(filter_by_status(&orders, None).len(), 3);
    }
}
