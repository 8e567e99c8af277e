use tuki_core::Product;

use crate::app::App;
use crate::format::{format_currency, format_number};

/// The product detail page.
#[derive(Debug)]
pub(crate) struct ProductState {
    pub product: Product,
    /// Units of this product already in the cart.
    pub in_cart: u32,
}

impl ProductState {
    /// How many more units can be added before reaching the stock.
    pub(crate) fn remaining(&self) -> u64 {
        self.product.stock.saturating_sub(u64::from(self.in_cart))
    }
}

pub(crate) async fn run_product(app: &App, id: u64) -> anyhow::Result<()> {
    let product = app.api.product(id).await?;
    let key = product.id.to_string();
    let in_cart = app
        .cart
        .load()
        .iter()
        .find(|item| item.id == key)
        .map_or(0, |item| item.quantity);

    render_product(&ProductState { product, in_cart });
    Ok(())
}

pub(crate) fn render_product(state: &ProductState) {
    let product = &state.product;
    println!("{} (#{})", product.name, product.id);
    println!("{}", product.description);
    println!();
    println!("Category:  {}", product.category_name);
    println!("Price:     {}", format_currency(product.price));
    println!("Stock:     {}", format_number(product.stock));
    if let Some(image) = &product.image_url {
        println!("Image:     {image}");
    }

    if !product.is_purchasable() {
        println!("\nThis product is not available right now.");
    } else if state.in_cart > 0 {
        println!(
            "\nIn your cart: {} ({} more available)",
            state.in_cart,
            state.remaining()
        );
    } else {
        println!("\nAdd it with: tuki cart add {}", product.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_never_underflows() {
        let product = Product {
            id: 1,
            name: "Flan".into(),
            description: String::new(),
            price: 800.0,
            stock: 2,
            image_url: None,
            category_id: None,
            category_name: "Postres".into(),
            available: true,
        };
        let state = ProductState {
            product,
            in_cart: 5,
        };
        assert_eq!(state.remaining(), 0);
    }
}
