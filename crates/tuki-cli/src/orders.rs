use anyhow::bail;
use tuki_core::{ClientOrder, DeliveryInfo};

use crate::app::App;
use crate::format::{format_currency, format_date, plural, truncate};

/// The "my orders" page.
#[derive(Debug)]
pub(crate) struct OrdersState {
    pub orders: Vec<ClientOrder>,
    /// Id or number of the order opened in detail.
    pub selected: Option<String>,
}

impl OrdersState {
    pub(crate) fn selected_order(&self) -> Option<&ClientOrder> {
        let wanted = self.selected.as_deref()?.trim();
        find_order(&self.orders, wanted, |order| order)
    }
}

/// Finds an order by id, or by number with or without a leading `#`.
pub(crate) fn find_order<'a, T>(
    items: &'a [T],
    wanted: &str,
    order_of: impl Fn(&T) -> &ClientOrder,
) -> Option<&'a T> {
    let wanted = wanted.trim();
    let number = wanted.trim_start_matches('#');
    items.iter().find(|item| {
        let order = order_of(item);
        order.id == wanted || order.number.trim_start_matches('#').eq_ignore_ascii_case(number)
    })
}

pub(crate) async fn run_orders(app: &App, show: Option<&str>) -> anyhow::Result<()> {
    let user = app.require_user()?;
    let orders = app.api.client_orders(user.id).await?;
    tracing::debug!(user_id = user.id, count = orders.len(), "loaded orders");

    let state = OrdersState {
        orders,
        selected: show.map(String::from),
    };

    match (&state.selected, state.selected_order()) {
        (Some(wanted), None) => bail!("order {wanted} not found"),
        (_, Some(order)) => render_order_detail(order),
        (None, None) => render_order_list(&state.orders),
    }
    Ok(())
}

pub(crate) fn render_order_list(orders: &[ClientOrder]) {
    if orders.is_empty() {
        println!("You have not placed any orders yet.");
        return;
    }

    println!(
        "{:<14}{:<18}{:<12}{:>8}{:>14}",
        "NUMBER", "DATE", "STATUS", "ITEMS", "TOTAL"
    );
    for order in orders {
        println!(
            "{:<14}{:<18}{:<12}{:>8}{:>14}",
            truncate(&order.number, 11),
            format_date(&order.created_at),
            order.status.label(),
            order.item_count(),
            format_currency(order.total)
        );
    }
    println!("\n{}", plural(orders.len(), "order"));
}

pub(crate) fn render_order_detail(order: &ClientOrder) {
    println!("Order {} ({})", order.number, order.status.label());
    println!("Placed {}", format_date(&order.created_at));
    println!();

    if order.products.is_empty() {
        println!("No products recorded for this order.");
    } else {
        println!("{:<32}{:>5}{:>14}{:>14}", "PRODUCT", "QTY", "PRICE", "TOTAL");
        for line in &order.products {
            println!(
                "{:<32}{:>5}{:>14}{:>14}",
                truncate(&line.name, 29),
                line.quantity,
                format_currency(line.price),
                format_currency(line.line_total())
            );
        }
    }

    println!();
    println!("Subtotal: {:>14}", format_currency(order.subtotal));
    println!("Shipping: {:>14}", format_currency(order.shipping));
    if order.discount > 0.0 {
        println!("Discount: {:>14}", format_currency(-order.discount));
    }
    println!("Total:    {:>14}", format_currency(order.total));

    if let Some(delivery) = &order.delivery {
        render_delivery(delivery);
    }
    if let Some(message) = &order.message {
        println!("\nNote: {message}");
    }
}

fn render_delivery(delivery: &DeliveryInfo) {
    println!("\nDelivery");
    let rows = [
        ("Method", &delivery.method),
        ("Address", &delivery.address),
        ("Reference", &delivery.reference),
        ("Contact", &delivery.contact_name),
        ("Phone", &delivery.contact_phone),
        ("Scheduled", &delivery.scheduled_at),
        ("Notes", &delivery.notes),
    ];
    for (label, value) in rows {
        if let Some(value) = value {
            println!("  {label:<10} {value}");
        }
    }
}
