use std::cmp::Ordering;

use clap::ValueEnum;
use tuki_core::{Category, Product};

use crate::app::App;
use crate::format::{format_currency, plural, truncate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SortOrder {
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
}

/// The catalog page: loaded data plus the active filters.
#[derive(Debug)]
pub(crate) struct CatalogState {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: SortOrder,
}

impl CatalogState {
    /// Products matching the filters, in the chosen order.
    pub(crate) fn visible_products(&self) -> Vec<&Product> {
        let needle = self
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        let category = self.category.as_deref().map(str::to_lowercase);

        let mut visible: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| {
                category
                    .as_deref()
                    .is_none_or(|c| p.category_name.to_lowercase() == c)
            })
            .filter(|p| {
                needle.as_deref().is_none_or(|n| {
                    format!("{} {}", p.name, p.description)
                        .to_lowercase()
                        .contains(n)
                })
            })
            .collect();

        visible.sort_by(|a, b| match self.sort {
            SortOrder::NameAsc => compare_names(a, b),
            SortOrder::NameDesc => compare_names(b, a),
            SortOrder::PriceAsc => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
            SortOrder::PriceDesc => b.price.partial_cmp(&a.price).unwrap_or(Ordering::Equal),
        });
        visible
    }

    /// Category names to offer as filters: the catalog's categories, else the
    /// names seen on products.
    pub(crate) fn category_names(&self) -> Vec<String> {
        let mut names: Vec<String> = if self.categories.is_empty() {
            self.products.iter().map(|p| p.category_name.clone()).collect()
        } else {
            self.categories.iter().map(|c| c.name.clone()).collect()
        };
        names.sort_by_key(|n| n.to_lowercase());
        names.dedup();
        names
    }
}

fn compare_names(a: &Product, b: &Product) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

pub(crate) async fn run_catalog(
    app: &App,
    search: Option<String>,
    category: Option<String>,
    sort: SortOrder,
) -> anyhow::Result<()> {
    let products = app.api.products().await?;
    let categories = match app.api.categories().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::warn!(error = %e, "could not load categories; using product categories");
            Vec::new()
        }
    };

    let state = CatalogState {
        products,
        categories,
        search,
        category,
        sort,
    };
    render_catalog(&state, app.cart.count());
    Ok(())
}

pub(crate) fn render_catalog(state: &CatalogState, cart_count: u32) {
    let names = state.category_names();
    if !names.is_empty() {
        println!("Categories: {}", names.join(", "));
    }

    let visible = state.visible_products();
    println!("{} found  |  cart: {cart_count}", plural(visible.len(), "product"));
    println!();

    if visible.is_empty() {
        println!("No products match your search.");
        return;
    }

    println!(
        "{:<6}{:<28}{:<18}{:>14}  {}",
        "ID", "NAME", "CATEGORY", "PRICE", "STATUS"
    );
    for product in visible {
        let status = if product.is_purchasable() {
            "available"
        } else {
            "sold out"
        };
        println!(
            "{:<6}{:<28}{:<18}{:>14}  {}",
            product.id,
            truncate(&product.name, 25),
            truncate(&product.category_name, 15),
            format_currency(product.price),
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, name: &str, category: &str, price: f64) -> Product {
        Product {
            id,
            name: name.into(),
            description: format!("{name} casera"),
            price,
            stock: 5,
            image_url: None,
            category_id: None,
            category_name: category.into(),
            available: true,
        }
    }

    fn state(search: Option<&str>, category: Option<&str>, sort: SortOrder) -> CatalogState {
        CatalogState {
            products: vec![
                product(1, "Pizza", "Pizzas", 1500.0),
                product(2, "empanada", "Empanadas", 400.0),
                product(3, "Fugazzeta", "Pizzas", 1800.0),
            ],
            categories: Vec::new(),
            search: search.map(String::from),
            category: category.map(String::from),
            sort,
        }
    }

    fn ids(state: &CatalogState) -> Vec<u64> {
        state.visible_products().iter().map(|p| p.id).collect()
    }

    #[test]
    fn sorts_by_name_case_insensitively() {
        assert_eq!(ids(&state(None, None, SortOrder::NameAsc)), vec![2, 3, 1]);
        assert_eq!(ids(&state(None, None, SortOrder::NameDesc)), vec![1, 3, 2]);
    }

    #[test]
    fn sorts_by_price() {
        assert_eq!(ids(&state(None, None, SortOrder::PriceAsc)), vec![2, 1, 3]);
        assert_eq!(ids(&state(None, None, SortOrder::PriceDesc)), vec![3, 1, 2]);
    }

    #[test]
    fn filters_by_category_and_search() {
        assert_eq!(ids(&state(None, Some("pizzas"), SortOrder::PriceAsc)), vec![1, 3]);
        assert_eq!(ids(&state(Some(" CASERA "), None, SortOrder::NameAsc)), vec![2, 3, 1]);
        assert_eq!(ids(&state(Some("fuga"), Some("Pizzas"), SortOrder::NameAsc)), vec![3]);
        assert!(ids(&state(Some("sushi"), None, SortOrder::NameAsc)).is_empty());
    }

    #[test]
    fn category_names_fall_back_to_products() {
        assert_eq!(
            state(None, None, SortOrder::NameAsc).category_names(),
            vec!["Empanadas".to_string(), "Pizzas".to_string()]
        );
    }
}
