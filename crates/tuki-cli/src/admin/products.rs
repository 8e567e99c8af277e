use clap::{ArgAction, Subcommand};
use tuki_core::{Category, Product, ProductInput, ValidationError};

use super::{confirm, yes_no};
use crate::app::App;
use crate::format::{format_currency, format_number, plural, truncate};

/// Sub-commands available under `admin products`.
#[derive(Debug, Subcommand)]
pub enum ProductCommands {
    /// List every product, deleted ones included
    List,
    /// Create a product
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        price: f64,
        #[arg(long, allow_negative_numbers = true)]
        stock: i64,
        /// Category id (see `admin categories list`)
        #[arg(long)]
        category: u64,
        #[arg(long)]
        image_url: String,
    },
    /// Update a product; omitted fields keep their current value
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        stock: Option<i64>,
        #[arg(long)]
        category: Option<u64>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Delete (deactivate) a product
    Delete { id: u64 },
    /// Reactivate a deleted product
    Restore { id: u64 },
    /// Mark a product available or unavailable
    Availability {
        id: u64,
        #[arg(long, action = ArgAction::Set)]
        available: bool,
    },
}

/// Field overrides for `admin products update`.
#[derive(Debug, Default)]
pub(crate) struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub category: Option<u64>,
    pub image_url: Option<String>,
}

impl ProductChanges {
    /// Overlays the changes on `current` and validates the result.
    pub(crate) fn apply(
        self,
        current: &Product,
        categories: &[Category],
    ) -> Result<ProductInput, ValidationError> {
        let stock = self
            .stock
            .unwrap_or_else(|| i64::try_from(current.stock).unwrap_or(i64::MAX));
        let category = self
            .category
            .or(current.category_id)
            .ok_or(ValidationError::Required("category"))?;
        let image_url = self
            .image_url
            .or_else(|| current.image_url.clone())
            .unwrap_or_default();

        ProductInput::new(
            self.name.as_deref().unwrap_or(&current.name),
            self.description.as_deref().unwrap_or(&current.description),
            self.price.unwrap_or(current.price),
            stock,
            category,
            &image_url,
            categories,
        )
    }
}

pub(crate) async fn run_products(app: &App, command: ProductCommands) -> anyhow::Result<()> {
    match command {
        ProductCommands::List => {
            let products = app.api.admin_products().await?;
            render_products(&products);
        }
        ProductCommands::Create {
            name,
            description,
            price,
            stock,
            category,
            image_url,
        } => {
            let categories = app.api.categories().await?;
            let input = ProductInput::new(
                &name,
                &description,
                price,
                stock,
                category,
                &image_url,
                &categories,
            )?;
            match app.api.create_product(&input).await? {
                Some(product) => println!("Created product {} (#{})", product.name, product.id),
                None => println!("Created product {}", input.nombre),
            }
        }
        ProductCommands::Update {
            id,
            name,
            description,
            price,
            stock,
            category,
            image_url,
        } => {
            let current = app.api.product(id).await?;
            let categories = app.api.categories().await?;
            let changes = ProductChanges {
                name,
                description,
                price,
                stock,
                category,
                image_url,
            };
            let input = changes.apply(&current, &categories)?;
            app.api.update_product(id, &input).await?;
            println!("Updated product {} (#{id})", input.nombre);
        }
        ProductCommands::Delete { id } => {
            let message = app.api.delete_product(id).await?;
            confirm(message, &format!("Deleted product #{id}"));
        }
        ProductCommands::Restore { id } => {
            let message = app.api.restore_product(id).await?;
            confirm(message, &format!("Restored product #{id}"));
        }
        ProductCommands::Availability { id, available } => {
            let message = app.api.set_product_availability(id, available).await?;
            let fallback = if available {
                format!("Product #{id} is now available")
            } else {
                format!("Product #{id} is now unavailable")
            };
            confirm(message, &fallback);
        }
    }
    Ok(())
}

fn render_products(products: &[Product]) {
    if products.is_empty() {
        println!("No products yet.");
        return;
    }

    println!(
        "{:<6}{:<28}{:<18}{:>14}{:>8}  {}",
        "ID", "NAME", "CATEGORY", "PRICE", "STOCK", "AVAILABLE"
    );
    for product in products {
        println!(
            "{:<6}{:<28}{:<18}{:>14}{:>8}  {}",
            product.id,
            truncate(&product.name, 25),
            truncate(&product.category_name, 15),
            format_currency(product.price),
            format_number(product.stock),
            yes_no(product.available)
        );
    }
    let available = products.iter().filter(|p| p.available).count();
    println!(
        "\n{} ({available} available)",
        plural(products.len(), "product")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: 1,
                name: "Pizzas".into(),
                description: String::new(),
                image_url: None,
            },
            Category {
                id: 2,
                name: "Postres".into(),
                description: String::new(),
                image_url: None,
            },
        ]
    }

    fn flan() -> Product {
        Product {
            id: 7,
            name: "Flan".into(),
            description: "Con dulce de leche".into(),
            price: 800.0,
            stock: 4,
            image_url: Some("https://cdn.tuki.com/flan.png".into()),
            category_id: Some(2),
            category_name: "Postres".into(),
            available: true,
        }
    }

    #[test]
    fn unchanged_fields_come_from_the_current_product() {
        let changes = ProductChanges {
            price: Some(950.0),
            ..ProductChanges::default()
        };
        let input = changes.apply(&flan(), &categories()).unwrap();
        assert_eq!(input.nombre, "Flan");
        assert!((input.precio - 950.0).abs() < f64::EPSILON);
        assert_eq!(input.stock, 4);
        assert_eq!(input.categoria_id, 2);
        assert_eq!(input.url_imagen, "https://cdn.tuki.com/flan.png");
    }

    #[test]
    fn negative_stock_is_rejected() {
        let changes = ProductChanges {
            stock: Some(-1),
            ..ProductChanges::default()
        };
        let err = changes.apply(&flan(), &categories()).unwrap_err();
        assert!(matches!(err, ValidationError::Invalid { field: "stock", .. }));
    }

    #[test]
    fn a_category_is_needed() {
        let mut product = flan();
        product.category_id = None;
        let err = ProductChanges::default()
            .apply(&product, &categories())
            .unwrap_err();
        assert_eq!(err, ValidationError::Required("category"));

        let moved = ProductChanges {
            category: Some(1),
            ..ProductChanges::default()
        };
        assert_eq!(moved.apply(&product, &categories()).unwrap().categoria_id, 1);
    }
}
