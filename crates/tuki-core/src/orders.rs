use serde::{Deserialize, Serialize};

/// Lifecycle state of an order as the storefront understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Value the backend expects in `nuevoEstado`.
    #[must_use]
    pub fn backend_value(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDIENTE",
            OrderStatus::Processing => "CONFIRMADO",
            OrderStatus::Completed => "TERMINADO",
            OrderStatus::Cancelled => "CANCELADO",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Processing => write!(f, "processing"),
            OrderStatus::Completed => write!(f, "completed"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!(
                "unknown order status '{other}' (expected pending, processing, completed or cancelled)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    /// Unit price.
    pub price: f64,
    pub image: Option<String>,
}

impl OrderLine {
    /// Zero when the product does not fit in a finite amount.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        let total = self.price * f64::from(self.quantity);
        if total.is_finite() {
            total
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryInfo {
    pub method: Option<String>,
    pub address: Option<String>,
    pub reference: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub notes: Option<String>,
    pub scheduled_at: Option<String>,
}

impl DeliveryInfo {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == DeliveryInfo::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub document: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub method: Option<String>,
    pub status: Option<String>,
    pub reference: Option<String>,
    pub details: Option<String>,
}

impl PaymentInfo {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == PaymentInfo::default()
    }
}

/// An order as shown to the customer who placed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientOrder {
    pub id: String,
    pub number: String,
    pub created_at: String,
    pub status: OrderStatus,
    pub products: Vec<OrderLine>,
    pub subtotal: f64,
    pub shipping: f64,
    pub discount: f64,
    pub total: f64,
    pub delivery: Option<DeliveryInfo>,
    pub message: Option<String>,
}

impl ClientOrder {
    /// Total units across every line.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.products
            .iter()
            .map(|line| line.quantity)
            .fold(0, u32::saturating_add)
    }
}

/// An order with the extra details the back office needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminOrder {
    #[serde(flatten)]
    pub order: ClientOrder,
    pub customer: CustomerInfo,
    pub payment: Option<PaymentInfo>,
    pub notes: Option<String>,
}

/// Body sent to change an order's status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub pedido_id: u64,
    pub nuevo_estado: String,
}

impl OrderStatusUpdate {
    #[must_use]
    pub fn new(order_id: u64, status: OrderStatus) -> Self {
        Self {
            pedido_id: order_id,
            nuevo_estado: status.backend_value().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    pub producto_id: u64,
    pub cantidad: u32,
}

/// Body sent to place an order from the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub usuario_id: i64,
    pub items: Vec<CheckoutItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_values_match_backend_enum() {
        let values: Vec<_> = OrderStatus::ALL.iter().map(|s| s.backend_value()).collect();
        assert_eq!(values, ["PENDIENTE", "CONFIRMADO", "TERMINADO", "CANCELADO"]);
    }

    #[test]
    fn from_str_accepts_display_output() {
        for status in OrderStatus::ALL {
            assert_eq!(status.to_string().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn status_update_serializes_backend_shape() {
        let body = serde_json::to_value(OrderStatusUpdate::new(7, OrderStatus::Completed)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "pedidoId": 7, "nuevoEstado": "TERMINADO" })
        );
    }

    #[test]
    fn checkout_request_serializes_backend_shape() {
        let body = serde_json::to_value(CheckoutRequest {
            usuario_id: 3,
            items: vec![CheckoutItem {
                producto_id: 10,
                cantidad: 2,
            }],
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "usuarioId": 3, "items": [{ "productoId": 10, "cantidad": 2 }] })
        );
    }

    #[test]
    fn item_count_sums_quantities() {
        let line = |quantity| OrderLine {
            id: "a".into(),
            name: "A".into(),
            quantity,
            price: 1.0,
            image: None,
        };
        let order = ClientOrder {
            id: "1".into(),
            number: "1".into(),
            created_at: "2024-01-01T00:00:00Z".into(),
            status: OrderStatus::Pending,
            products: vec![line(2), line(3)],
            subtotal: 5.0,
            shipping: 0.0,
            discount: 0.0,
            total: 5.0,
            delivery: None,
            message: None,
        };
        assert_eq!(order.item_count(), 5);
    }

    #[test]
    fn line_total_stays_finite() {
        let line = OrderLine {
            id: "a".into(),
            name: "A".into(),
            quantity: u32::MAX,
            price: f64::MAX,
            image: None,
        };
        assert!((line.line_total() - 0.0).abs() < f64::EPSILON);
    }
}
