use anyhow::bail;
use serde_json::Value;
use tuki_core::{cart::checkout_request, ValidationError};

use crate::app::App;
use crate::cart::{load_cart_state, render_summary};
use crate::format::plural;

/// Delivery and payment details collected before placing an order.
///
/// They are checked here but the order body only carries the user and items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CheckoutForm {
    pub phone: String,
    pub address: String,
    pub payment: String,
}

impl CheckoutForm {
    pub(crate) fn new(phone: &str, address: &str, payment: &str) -> Result<Self, ValidationError> {
        let field = |name: &'static str, value: &str| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(ValidationError::Required(name))
            } else {
                Ok(trimmed.to_string())
            }
        };
        Ok(Self {
            phone: field("phone", phone)?,
            address: field("address", address)?,
            payment: field("payment method", payment)?,
        })
    }
}

pub(crate) async fn run_checkout(
    app: &App,
    phone: &str,
    address: &str,
    payment: &str,
) -> anyhow::Result<()> {
    let user = app.require_user()?;
    let form = CheckoutForm::new(phone, address, payment)?;

    let state = load_cart_state(app).await?;
    if !state.summary.can_checkout() {
        match &state.summary.warning {
            Some(warning) => bail!("cannot place the order: {warning}"),
            None => bail!("your cart has nothing that can be ordered"),
        }
    }

    let Some(request) = checkout_request(user.id, &state.lines) else {
        bail!("your cart has nothing that can be ordered");
    };

    tracing::info!(
        user_id = user.id,
        items = request.items.len(),
        payment = %form.payment,
        "placing order"
    );
    let response = app.api.checkout(&request).await?;
    app.cart.clear()?;

    println!(
        "Order placed for {} ({}).",
        user.name,
        plural(request.items.len(), "product")
    );
    if let Some(reference) = order_reference(&response) {
        println!("Order reference: {reference}");
    }
    println!("Delivery to {} | phone {} | paying with {}", form.address, form.phone, form.payment);
    render_summary(&state.summary);
    Ok(())
}

/// Picks an identifier out of the checkout response, when the backend sends one.
fn order_reference(response: &Value) -> Option<String> {
    ["numeroPedido", "numero", "pedidoId", "id"]
        .iter()
        .find_map(|key| match response.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn form_requires_every_field() {
        assert_eq!(
            CheckoutForm::new(" ", "Calle 1", "efectivo"),
            Err(ValidationError::Required("phone"))
        );
        assert_eq!(
            CheckoutForm::new("351", "", "efectivo"),
            Err(ValidationError::Required("address"))
        );
        assert_eq!(
            CheckoutForm::new("351", "Calle 1", "\t"),
            Err(ValidationError::Required("payment method"))
        );
    }

    #[test]
    fn form_trims_values() {
        let form = CheckoutForm::new(" 351 ", " Calle 1 ", "efectivo ").unwrap();
        assert_eq!(form.phone, "351");
        assert_eq!(form.address, "Calle 1");
        assert_eq!(form.payment, "efectivo");
    }

    #[test]
    fn reference_prefers_order_number() {
        assert_eq!(
            order_reference(&json!({"id": 9, "numeroPedido": "A-12"})),
            Some("A-12".to_string())
        );
        assert_eq!(order_reference(&json!({"id": 9})), Some("9".to_string()));
        assert_eq!(order_reference(&json!(null)), None);
        assert_eq!(order_reference(&json!({"numero": "  "})), None);
    }
}
