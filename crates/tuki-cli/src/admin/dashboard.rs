use tuki_api::{ApiError, DashboardSnapshot};
use tuki_core::dashboard::active_category_names;
use tuki_core::DashboardMetrics;
use tuki_normalize::status_tone;

use crate::app::App;
use crate::format::format_number;

const CATEGORY_PREVIEW: usize = 6;

pub(crate) async fn run_dashboard(app: &App) -> anyhow::Result<()> {
    let snapshot = app.api.dashboard().await;
    render_dashboard(&snapshot);
    Ok(())
}

fn section<T>(result: &Result<Vec<T>, ApiError>) -> &[T] {
    result.as_deref().unwrap_or_default()
}

pub(crate) fn render_dashboard(snapshot: &DashboardSnapshot) {
    let categories = section(&snapshot.categories);
    let products = section(&snapshot.products);
    let orders = section(&snapshot.orders);
    let metrics = DashboardMetrics::calculate(categories, products, orders);

    println!("Dashboard");
    println!();

    match &snapshot.categories {
        Ok(_) => {
            println!(
                "Categories: {} ({} active)",
                format_number(count(metrics.total_categories)),
                format_number(count(metrics.active_categories))
            );
            let (names, remaining) = active_category_names(categories, CATEGORY_PREVIEW);
            if !names.is_empty() {
                let more = if remaining > 0 {
                    format!(" and {remaining} more")
                } else {
                    String::new()
                };
                println!("  {}{more}", names.join(", "));
            }
        }
        Err(e) => println!("Categories: unavailable ({})", e.user_message()),
    }

    match &snapshot.products {
        Ok(_) => println!(
            "Products:   {} ({} active, {} inactive, {} in stock)",
            format_number(count(metrics.total_products)),
            format_number(count(metrics.active_products)),
            format_number(count(metrics.inactive_products)),
            format_number(count(metrics.available_products))
        ),
        Err(e) => println!("Products:   unavailable ({})", e.user_message()),
    }

    match &snapshot.orders {
        Ok(_) => {
            println!("Orders:     {}", format_number(count(metrics.total_orders)));
            for entry in &metrics.orders_by_status {
                println!(
                    "  {:<20}{:>6}  [{}]",
                    entry.status,
                    entry.count,
                    status_tone(&entry.status).as_str()
                );
            }
        }
        Err(e) => println!("Orders:     unavailable ({})", e.user_message()),
    }
}

fn count(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}
