//! Lightweight adapters feeding the admin dashboard.
//!
//! These are looser than the catalog adapters: identifiers stay as text and
//! availability is inferred from free-form status wording when no flag is
//! present.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tuki_core::{CategorySummary, OrderSummary, ProductSummary};

use crate::collection::{unwrap_collection, UnwrapOptions};
use crate::primitives::{normalize_boolean, BooleanVocabulary};
use crate::record::Record;

pub const UNNAMED_CATEGORY: &str = "Unnamed category";
pub const NO_STATUS: &str = "No status";

static INACTIVE_CATEGORY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)inactivo|deshabilitado|baja").expect("valid regex")
});
static UNAVAILABLE_PRODUCT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)inactivo|agotado|deshabilitado").expect("valid regex")
});

static TONE_SUCCESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"entregado|completado|aprobado|pagado").expect("valid regex")
});
static TONE_WARNING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"pendiente|en proceso|preparaci[oó]n|preparando").expect("valid regex")
});
static TONE_DANGER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"cancelado|rechazado|fallido").expect("valid regex")
});

/// Colour hint for an order status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Warning,
    Danger,
    Info,
}

impl StatusTone {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Info => "info",
        }
    }
}

#[must_use]
pub fn status_tone(label: &str) -> StatusTone {
    let lowered = label.to_lowercase();
    if TONE_SUCCESS.is_match(&lowered) {
        StatusTone::Success
    } else if TONE_WARNING.is_match(&lowered) {
        StatusTone::Warning
    } else if TONE_DANGER.is_match(&lowered) {
        StatusTone::Danger
    } else {
        StatusTone::Info
    }
}

/// Trims and upper-cases the first character; blank becomes [`NO_STATUS`].
#[must_use]
pub fn status_label(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => NO_STATUS.to_string(),
    }
}

fn flag_or_status(record: &Record<'_>, keys: &[&str], status_text: Option<&str>) -> Option<bool> {
    record.boolean(keys).or_else(|| {
        status_text.and_then(|text| {
            normalize_boolean(&Value::String(text.to_string()), BooleanVocabulary::standard())
        })
    })
}

#[must_use]
pub fn adapt_category_summary(value: &Value) -> Option<CategorySummary> {
    let record = Record::new(value)?;

    let id = record.string(&["id", "categoryId", "uuid", "codigo"]);
    let name = record
        .string(&[
            "name",
            "nombre",
            "titulo",
            "descripcion",
            "label",
            "descripcionCategoria",
            "detalle",
        ])
        .unwrap_or_else(|| UNNAMED_CATEGORY.to_string());
    let status_text = record.string(&["status", "estado", "state", "situacion"]);

    let active = flag_or_status(
        &record,
        &["active", "activo", "habilitado", "enabled"],
        status_text.as_deref(),
    )
    .unwrap_or_else(|| {
        status_text
            .as_deref()
            .is_none_or(|text| !INACTIVE_CATEGORY.is_match(text))
    });

    Some(CategorySummary {
        id: id.unwrap_or_else(|| name.clone()),
        name,
        active,
    })
}

/// Rejected without an id.
#[must_use]
pub fn adapt_product_summary(value: &Value) -> Option<ProductSummary> {
    let record = Record::new(value)?;

    let id = record.string(&["id", "productId", "uuid", "codigo"])?;
    let name = record
        .string(&["name", "nombre", "titulo", "descripcion", "descripcionProducto"])
        .unwrap_or_else(|| crate::product::UNNAMED_PRODUCT.to_string());
    let stock = record
        .count(&["stock", "existencias", "cantidad", "inventory"])
        .unwrap_or(0);
    let status_text = record.string(&["status", "estado", "state"]);

    let available = flag_or_status(
        &record,
        &["available", "activo", "habilitado", "disponible"],
        status_text.as_deref(),
    )
    .unwrap_or_else(|| match status_text.as_deref() {
        Some(text) => !UNAVAILABLE_PRODUCT.is_match(text),
        None => stock > 0,
    });

    Some(ProductSummary {
        id,
        name,
        stock,
        available,
    })
}

#[must_use]
pub fn adapt_order_summary(value: &Value) -> Option<OrderSummary> {
    let record = Record::new(value)?;

    let status = record
        .string(&[
            "status",
            "estado",
            "state",
            "etapa",
            "situacion",
            "progreso",
            "detalleEstado",
        ])
        .unwrap_or_else(|| NO_STATUS.to_string());
    let id = record
        .string(&["id", "pedidoId", "orderId", "uuid", "codigo"])
        .unwrap_or_else(|| status.clone());

    Some(OrderSummary {
        id,
        status: status_label(&status),
    })
}

fn summaries<T>(value: &Value, adapt: impl Fn(&Value) -> Option<T>) -> Vec<T> {
    let options = UnwrapOptions::default().unwrap_nested_object(true);
    unwrap_collection(value, &options)
        .into_iter()
        .filter_map(adapt)
        .collect()
}

#[must_use]
pub fn adapt_category_summaries(value: &Value) -> Vec<CategorySummary> {
    summaries(value, adapt_category_summary)
}

#[must_use]
pub fn adapt_product_summaries(value: &Value) -> Vec<ProductSummary> {
    summaries(value, adapt_product_summary)
}

#[must_use]
pub fn adapt_order_summaries(value: &Value) -> Vec<OrderSummary> {
    summaries(value, adapt_order_summary)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn category_activity_rules() {
        let flagged = adapt_category_summary(&json!({ "id": 1, "nombre": "A", "activo": false })).unwrap();
        assert!(!flagged.active);

        let by_status = adapt_category_summary(&json!({ "id": 2, "estado": "dada de baja" })).unwrap();
        assert!(!by_status.active);
        assert_eq!(by_status.name, UNNAMED_CATEGORY);

        let status_word = adapt_category_summary(&json!({ "id": 3, "estado": "Activo" })).unwrap();
        assert!(status_word.active);

        let nothing = adapt_category_summary(&json!({ "nombre": "Postres" })).unwrap();
        assert!(nothing.active);
        assert_eq!(nothing.id, "Postres");
    }

    #[test]
    fn product_availability_rules() {
        let sold_out = adapt_product_summary(&json!({ "id": 1, "stock": 5, "estado": "Agotado" })).unwrap();
        assert!(!sold_out.available);

        let by_stock = adapt_product_summary(&json!({ "id": 2, "existencias": "4" })).unwrap();
        assert!(by_stock.available);
        assert_eq!(by_stock.stock, 4);

        let empty = adapt_product_summary(&json!({ "id": 3 })).unwrap();
        assert!(!empty.available);

        assert!(adapt_product_summary(&json!({ "nombre": "x" })).is_none());
    }

    #[test]
    fn order_summary_labels() {
        let order = adapt_order_summary(&json!({ "pedidoId": 4, "estado": "  pendiente" })).unwrap();
        assert_eq!(order.id, "4");
        assert_eq!(order.status, "Pendiente");

        let bare = adapt_order_summary(&json!({})).unwrap();
        assert_eq!(bare.id, NO_STATUS);
        assert_eq!(bare.status, NO_STATUS);
    }

    #[test]
    fn tones() {
        assert_eq!(status_tone("Entregado"), StatusTone::Success);
        assert_eq!(status_tone("En preparación"), StatusTone::Warning);
        assert_eq!(status_tone("Cancelado"), StatusTone::Danger);
        assert_eq!(status_tone("Terminado"), StatusTone::Info);
    }

    #[test]
    fn lists_unwrap_nested_objects() {
        let orders = adapt_order_summaries(&json!({ "data": { "id": 1, "estado": "terminado" } }));
        assert_eq!(orders.len(), 1);
        assert_eq!(adapt_product_summaries(&json!([{ "id": 1 }, "x"])).len(), 1);
        assert_eq!(adapt_category_summaries(&json!({ "items": [{ "id": 1 }] })).len(), 1);
    }
}
