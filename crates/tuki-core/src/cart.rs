//! Pure cart operations.
//!
//! Persistence lives in `tuki-store`; everything here works on plain
//! `Vec<CartItem>` values so it can be tested without touching storage.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::Product;
use crate::orders::{CheckoutItem, CheckoutRequest};

/// Storage key the cart lives under.
pub const CART_STORAGE_KEY: &str = "storeCartItems";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub quantity: u32,
}

/// Parses a stored cart, discarding anything malformed.
///
/// A non-array payload is an empty cart. Entries need a string `id`.
/// A numeric quantity of zero or less prunes the entry; other numeric
/// quantities are truncated and raised to at least 1; a missing or
/// non-numeric quantity counts as 1.
#[must_use]
pub fn parse_cart(raw: &str) -> Vec<CartItem> {
    let Ok(Value::Array(entries)) = serde_json::from_str::<Value>(raw) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let id = entry.get("id")?.as_str()?;
            let quantity = match entry.get("quantity").and_then(Value::as_f64) {
                Some(q) if !q.is_finite() => 1,
                Some(q) if q <= 0.0 => return None,
                Some(q) => truncate_quantity(q),
                None => 1,
            };
            Some(CartItem {
                id: id.to_string(),
                quantity,
            })
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn truncate_quantity(q: f64) -> u32 {
    (q.trunc().min(f64::from(u32::MAX)) as u32).max(1)
}

/// Increments the item's quantity by one, or appends it with quantity 1.
#[must_use]
pub fn add_item(mut items: Vec<CartItem>, product_id: &str) -> Vec<CartItem> {
    match items.iter_mut().find(|item| item.id == product_id) {
        Some(item) => item.quantity = item.quantity.saturating_add(1),
        None => items.push(CartItem {
            id: product_id.to_string(),
            quantity: 1,
        }),
    }
    items
}

#[must_use]
pub fn remove_item(mut items: Vec<CartItem>, product_id: &str) -> Vec<CartItem> {
    items.retain(|item| item.id != product_id);
    items
}

/// Sets an exact quantity; zero removes the item. Unknown ids are ignored.
#[must_use]
pub fn set_item_quantity(items: Vec<CartItem>, product_id: &str, quantity: u32) -> Vec<CartItem> {
    if quantity == 0 {
        return remove_item(items, product_id);
    }
    items
        .into_iter()
        .map(|mut item| {
            if item.id == product_id {
                item.quantity = quantity;
            }
            item
        })
        .collect()
}

/// Total units in the cart, as shown on the cart badge.
#[must_use]
pub fn item_count(items: &[CartItem]) -> u32 {
    items
        .iter()
        .map(|item| item.quantity)
        .fold(0, u32::saturating_add)
}

/// A cart entry joined with its catalog product.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub id: String,
    pub quantity: u32,
    pub product: Option<Product>,
    pub max_quantity: u64,
    pub is_available: bool,
    /// Set when the quantity had to be lowered to the available stock.
    pub clamp_warning: Option<String>,
}

impl CartLine {
    /// Line total; unavailable lines contribute nothing.
    #[must_use]
    pub fn total(&self) -> f64 {
        match &self.product {
            Some(product) if self.is_available => product.price * f64::from(self.quantity),
            _ => 0.0,
        }
    }

    /// Short explanation shown next to the line, if any.
    #[must_use]
    pub fn notice(&self) -> Option<String> {
        if let Some(warning) = &self.clamp_warning {
            return Some(warning.clone());
        }
        match &self.product {
            None => Some("This product is not available.".to_string()),
            Some(product) if !product.available => {
                Some("This product is no longer available.".to_string())
            }
            Some(product) if product.stock == 0 => {
                Some("There is no stock available right now.".to_string())
            }
            Some(_) if u64::from(self.quantity) >= self.max_quantity => {
                Some("You reached the available stock.".to_string())
            }
            Some(_) => None,
        }
    }
}

/// Result of checking a cart against the current catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CartReconciliation {
    pub lines: Vec<CartLine>,
    /// The cart with corrected quantities; persist it when `changed` is set.
    pub items: Vec<CartItem>,
    pub changed: bool,
}

/// Joins cart items with products, clamping quantities to stock.
#[must_use]
pub fn reconcile(items: &[CartItem], products: &[Product]) -> CartReconciliation {
    let mut changed = false;

    let lines: Vec<CartLine> = items
        .iter()
        .map(|item| {
            let product = products
                .iter()
                .find(|p| p.id.to_string() == item.id)
                .cloned();
            let mut quantity = item.quantity;
            let mut clamp_warning = None;

            if quantity == 0 {
                quantity = 1;
                changed = true;
            }

            let max_quantity = product.as_ref().map_or(0, |p| p.stock);
            if max_quantity > 0 && u64::from(quantity) > max_quantity {
                quantity = u32::try_from(max_quantity).unwrap_or(u32::MAX);
                changed = true;
                clamp_warning = Some(format!("Only {max_quantity} units available."));
            }

            let is_available = product.as_ref().is_some_and(Product::is_purchasable);

            CartLine {
                id: item.id.clone(),
                quantity,
                product,
                max_quantity,
                is_available,
                clamp_warning,
            }
        })
        .collect();

    let items = lines
        .iter()
        .map(|line| CartItem {
            id: line.id.clone(),
            quantity: line.quantity,
        })
        .collect();

    CartReconciliation {
        lines,
        items,
        changed,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartSummary {
    pub subtotal: f64,
    pub shipping: f64,
    pub total: f64,
    pub has_items: bool,
    pub has_purchasable: bool,
    pub warning: Option<String>,
}

impl CartSummary {
    /// Totals the purchasable lines; shipping applies once anything is purchasable.
    #[must_use]
    pub fn from_lines(lines: &[CartLine], shipping_cost: f64) -> Self {
        let subtotal: f64 = lines.iter().map(CartLine::total).sum();
        let has_items = !lines.is_empty();
        let has_purchasable = lines.iter().any(|line| line.is_available);
        let has_unavailable = lines.iter().any(|line| !line.is_available);
        let shipping = if has_purchasable { shipping_cost } else { 0.0 };

        let warning = if has_unavailable {
            Some(
                "Some products are out of stock or unavailable. Adjust your order to continue."
                    .to_string(),
            )
        } else if has_items && !has_purchasable {
            Some("There are no available products to order.".to_string())
        } else {
            None
        };

        Self {
            subtotal,
            shipping,
            total: subtotal + shipping,
            has_items,
            has_purchasable,
            warning,
        }
    }

    #[must_use]
    pub fn can_checkout(&self) -> bool {
        self.has_purchasable && self.warning.is_none()
    }
}

/// Builds the checkout body from purchasable lines with numeric product ids.
///
/// Returns `None` when nothing can be ordered.
#[must_use]
pub fn checkout_request(user_id: i64, lines: &[CartLine]) -> Option<CheckoutRequest> {
    let items: Vec<CheckoutItem> = lines
        .iter()
        .filter(|line| line.is_available && line.quantity > 0)
        .filter_map(|line| {
            let producto_id = line.product.as_ref().map(|p| p.id)?;
            (producto_id > 0).then_some(CheckoutItem {
                producto_id,
                cantidad: line.quantity,
            })
        })
        .collect();

    (!items.is_empty()).then_some(CheckoutRequest {
        usuario_id: user_id,
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, price: f64, stock: u64, available: bool) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            description: String::new(),
            price,
            stock,
            image_url: None,
            category_id: None,
            category_name: "Uncategorized".into(),
            available,
        }
    }

    fn item(id: &str, quantity: u32) -> CartItem {
        CartItem {
            id: id.into(),
            quantity,
        }
    }

    #[test]
    fn parse_cart_rejects_non_array() {
        assert!(parse_cart(r#"{"id":"1"}"#).is_empty());
        assert!(parse_cart("not json").is_empty());
        assert!(parse_cart("").is_empty());
    }

    #[test]
    fn parse_cart_drops_malformed_entries() {
        let items = parse_cart(
            r#"[{"id":"1","quantity":2},{"id":7,"quantity":1},null,{"quantity":3},{"id":"2"}]"#,
        );
        assert_eq!(items, vec![item("1", 2), item("2", 1)]);
    }

    #[test]
    fn parse_cart_prunes_non_positive_and_truncates() {
        let items = parse_cart(
            r#"[{"id":"a","quantity":0},{"id":"b","quantity":-2},{"id":"c","quantity":2.9},{"id":"d","quantity":0.4},{"id":"e","quantity":"3"}]"#,
        );
        assert_eq!(items, vec![item("c", 2), item("d", 1), item("e", 1)]);
    }

    #[test]
    fn add_item_increments_existing_by_one() {
        let items = add_item(vec![item("p1", 2)], "p1");
        assert_eq!(items, vec![item("p1", 3)]);
    }

    #[test]
    fn add_item_appends_new_with_quantity_one() {
        let items = add_item(vec![item("p1", 2)], "p2");
        assert_eq!(items, vec![item("p1", 2), item("p2", 1)]);
    }

    #[test]
    fn set_quantity_zero_removes() {
        let items = set_item_quantity(vec![item("p1", 2), item("p2", 1)], "p1", 0);
        assert_eq!(items, vec![item("p2", 1)]);
        let items = set_item_quantity(items, "p2", 4);
        assert_eq!(items, vec![item("p2", 4)]);
    }

    #[test]
    fn item_count_sums_quantities() {
        assert_eq!(item_count(&[item("a", 2), item("b", 3)]), 5);
        assert_eq!(item_count(&[]), 0);
    }

    #[test]
    fn item_count_saturates_on_huge_stored_quantities() {
        let items = parse_cart(
            r#"[{"id":"1","quantity":4000000000},{"id":"2","quantity":4000000000}]"#,
        );
        assert_eq!(item_count(&items), u32::MAX);
    }

    #[test]
    fn reconcile_clamps_to_stock_and_flags_change() {
        let result = reconcile(&[item("1", 5)], &[product(1, 100.0, 3, true)]);
        assert!(result.changed);
        assert_eq!(result.items, vec![item("1", 3)]);
        let line = &result.lines[0];
        assert_eq!(line.quantity, 3);
        assert_eq!(line.clamp_warning.as_deref(), Some("Only 3 units available."));
        assert!(line.is_available);
    }

    #[test]
    fn reconcile_marks_missing_and_unavailable_products() {
        let result = reconcile(
            &[item("1", 1), item("2", 1), item("3", 1)],
            &[product(1, 10.0, 0, true), product(2, 10.0, 5, false)],
        );
        assert!(!result.changed);
        assert!(result.lines.iter().all(|line| !line.is_available));
        assert!(result.lines[2].product.is_none());
        assert_eq!(
            result.lines[0].notice().as_deref(),
            Some("There is no stock available right now.")
        );
        assert_eq!(
            result.lines[1].notice().as_deref(),
            Some("This product is no longer available.")
        );
    }

    #[test]
    fn summary_charges_shipping_only_when_purchasable() {
        let result = reconcile(
            &[item("1", 2), item("2", 1)],
            &[product(1, 100.0, 10, true), product(2, 50.0, 10, true)],
        );
        let summary = CartSummary::from_lines(&result.lines, 500.0);
        assert!((summary.subtotal - 250.0).abs() < f64::EPSILON);
        assert!((summary.shipping - 500.0).abs() < f64::EPSILON);
        assert!((summary.total - 750.0).abs() < f64::EPSILON);
        assert!(summary.can_checkout());

        let empty = CartSummary::from_lines(&[], 500.0);
        assert!(empty.shipping.abs() < f64::EPSILON);
        assert!(!empty.can_checkout());
        assert!(empty.warning.is_none());
    }

    #[test]
    fn summary_blocks_checkout_with_unavailable_lines() {
        let result = reconcile(
            &[item("1", 1), item("2", 1)],
            &[product(1, 100.0, 10, true), product(2, 50.0, 0, true)],
        );
        let summary = CartSummary::from_lines(&result.lines, 500.0);
        assert!((summary.subtotal - 100.0).abs() < f64::EPSILON);
        assert!(summary.warning.is_some());
        assert!(!summary.can_checkout());
    }

    #[test]
    fn checkout_request_keeps_purchasable_lines() {
        let result = reconcile(
            &[item("1", 2), item("2", 1)],
            &[product(1, 100.0, 10, true), product(2, 50.0, 0, true)],
        );
        let request = checkout_request(9, &result.lines).unwrap();
        assert_eq!(request.usuario_id, 9);
        assert_eq!(
            request.items,
            vec![CheckoutItem {
                producto_id: 1,
                cantidad: 2
            }]
        );
    }

    #[test]
    fn checkout_request_none_when_nothing_purchasable() {
        let result = reconcile(&[item("9", 1)], &[]);
        assert!(checkout_request(1, &result.lines).is_none());
    }
}
