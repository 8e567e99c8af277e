//! Order status resolution from free-form backend text.

use serde_json::Value;
use tuki_core::OrderStatus;

use crate::primitives::{normalize_status_text, normalize_string};

const EXACT: &[(&str, OrderStatus)] = &[
    ("pending", OrderStatus::Pending),
    ("pendiente", OrderStatus::Pending),
    ("pendiente de pago", OrderStatus::Pending),
    ("confirmado", OrderStatus::Processing),
    ("processing", OrderStatus::Processing),
    ("preparando", OrderStatus::Processing),
    ("preparacion", OrderStatus::Processing),
    ("en preparacion", OrderStatus::Processing),
    ("procesando", OrderStatus::Processing),
    ("terminado", OrderStatus::Completed),
    ("completed", OrderStatus::Completed),
    ("completado", OrderStatus::Completed),
    ("completo", OrderStatus::Completed),
    ("entregado", OrderStatus::Completed),
    ("finalizado", OrderStatus::Completed),
    ("cancelled", OrderStatus::Cancelled),
    ("cancelado", OrderStatus::Cancelled),
    ("anulado", OrderStatus::Cancelled),
    ("rechazado", OrderStatus::Cancelled),
];

/// Checked in order after the exact table misses.
const KEYWORDS: &[(&[&str], OrderStatus)] = &[
    (&["pend"], OrderStatus::Pending),
    (&["prep", "proc"], OrderStatus::Processing),
    (&["complet", "entreg", "final"], OrderStatus::Completed),
    (&["cancel", "anula", "rechaz"], OrderStatus::Cancelled),
];

/// Classifies a raw status value; anything unrecognised is `Pending`.
#[must_use]
pub fn adapt_status(value: &Value) -> OrderStatus {
    normalize_string(value).map_or(OrderStatus::Pending, |text| resolve_status(&text))
}

/// Classifies status text: exact match, then keyword substring, then `Pending`.
#[must_use]
pub fn resolve_status(text: &str) -> OrderStatus {
    let normalized = normalize_status_text(text);

    if let Some((_, status)) = EXACT.iter().find(|(word, _)| *word == normalized) {
        return *status;
    }

    KEYWORDS
        .iter()
        .find(|(fragments, _)| fragments.iter().any(|f| normalized.contains(f)))
        .map_or(OrderStatus::Pending, |(_, status)| *status)
}
