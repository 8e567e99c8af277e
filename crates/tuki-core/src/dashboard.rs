use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub stock: u64,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub id: String,
    /// Display label, e.g. `"Pendiente"`.
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardMetrics {
    pub total_categories: usize,
    pub total_products: usize,
    pub total_orders: usize,
    /// Available and in stock.
    pub available_products: usize,
    pub active_categories: usize,
    pub active_products: usize,
    pub inactive_products: usize,
    /// Most frequent status first; ties keep first-seen order.
    pub orders_by_status: Vec<StatusCount>,
}

impl DashboardMetrics {
    #[must_use]
    pub fn calculate(
        categories: &[CategorySummary],
        products: &[ProductSummary],
        orders: &[OrderSummary],
    ) -> Self {
        let active_products = products.iter().filter(|p| p.available).count();

        let mut orders_by_status: Vec<StatusCount> = Vec::new();
        for order in orders {
            match orders_by_status.iter_mut().find(|s| s.status == order.status) {
                Some(entry) => entry.count += 1,
                None => orders_by_status.push(StatusCount {
                    status: order.status.clone(),
                    count: 1,
                }),
            }
        }
        orders_by_status.sort_by(|a, b| b.count.cmp(&a.count));

        Self {
            total_categories: categories.len(),
            total_products: products.len(),
            total_orders: orders.len(),
            available_products: products
                .iter()
                .filter(|p| p.available && p.stock > 0)
                .count(),
            active_categories: categories.iter().filter(|c| c.active).count(),
            active_products,
            inactive_products: products.len() - active_products,
            orders_by_status,
        }
    }
}

/// Names of active categories sorted alphabetically, capped at `limit`,
/// plus how many were left out.
#[must_use]
pub fn active_category_names(categories: &[CategorySummary], limit: usize) -> (Vec<&str>, usize) {
    let mut names: Vec<&str> = categories
        .iter()
        .filter(|c| c.active)
        .map(|c| c.name.as_str())
        .collect();
    names.sort_by_key(|name| name.to_lowercase());
    let remaining = names.len().saturating_sub(limit);
    names.truncate(limit);
    (names, remaining)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, active: bool) -> CategorySummary {
        CategorySummary {
            id: name.to_lowercase(),
            name: name.into(),
            active,
        }
    }

    fn product(stock: u64, available: bool) -> ProductSummary {
        ProductSummary {
            id: format!("p{stock}"),
            name: "P".into(),
            stock,
            available,
        }
    }

    fn order(status: &str) -> OrderSummary {
        OrderSummary {
            id: status.into(),
            status: status.into(),
        }
    }

    #[test]
    fn calculate_counts_each_bucket() {
        let metrics = DashboardMetrics::calculate(
            &[category("Bebidas", true), category("Postres", false)],
            &[product(3, true), product(0, true), product(5, false)],
            &[order("Pendiente"), order("Terminado"), order("Pendiente")],
        );
        assert_eq!(metrics.total_categories, 2);
        assert_eq!(metrics.active_categories, 1);
        assert_eq!(metrics.total_products, 3);
        assert_eq!(metrics.available_products, 1);
        assert_eq!(metrics.active_products, 2);
        assert_eq!(metrics.inactive_products, 1);
        assert_eq!(metrics.total_orders, 3);
        assert_eq!(
            metrics.orders_by_status,
            vec![
                StatusCount {
                    status: "Pendiente".into(),
                    count: 2
                },
                StatusCount {
                    status: "Terminado".into(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn calculate_on_empty_inputs_is_zeroed() {
        assert_eq!(
            DashboardMetrics::calculate(&[], &[], &[]),
            DashboardMetrics::default()
        );
    }

    #[test]
    fn active_category_names_sorts_and_caps() {
        let categories = [
            category("Pizzas", true),
            category("bebidas", true),
            category("Empanadas", true),
            category("Viejas", false),
        ];
        let (names, remaining) = active_category_names(&categories, 2);
        assert_eq!(names, vec!["bebidas", "Empanadas"]);
        assert_eq!(remaining, 1);
    }
}
