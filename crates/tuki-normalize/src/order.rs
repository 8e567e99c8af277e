//! Order adapters for the customer and back-office views.
//!
//! Orders are never rejected for missing fields: identifiers fall back to
//! the order number, creation date, or a positional `pedido-{index}`, and
//! costs are derived from the lines when the backend omits them.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;
use tuki_core::{AdminOrder, ClientOrder, CustomerInfo, DeliveryInfo, OrderLine, PaymentInfo};

use crate::collection::{unwrap_collection, UnwrapOptions};
use crate::primitives::normalize_string;
use crate::record::{truncate_non_negative, Record};
use crate::status::adapt_status;

pub const UNNAMED_CUSTOMER: &str = "Unnamed customer";

const ORDER_ID: &[&str] = &["id", "orderId", "pedidoId", "codigo", "uuid", "numeroPedido"];
const ORDER_NUMBER: &[&str] = &["number", "numero", "codigo", "referencia"];
const CREATED_AT: &[&str] = &[
    "createdAt",
    "fechaCreacion",
    "fecha",
    "fechaPedido",
    "created",
    "timestamp",
];
const STATUS: &[&str] = &["status", "estado", "state"];
const MESSAGE: &[&str] = &[
    "message",
    "mensaje",
    "estadoMensaje",
    "statusMessage",
    "observacion",
    "nota",
];
const LINES: &[&str] = &[
    "products",
    "productos",
    "items",
    "detalle",
    "detalles",
    "lineItems",
    "lineas",
];
const DELIVERY: &[&str] = &["delivery", "envio", "shipping", "direccion", "address"];

const SUBTOTAL: &[&str] = &[
    "subtotal",
    "subTotal",
    "totalProductos",
    "montoSubtotal",
    "subtotalProductos",
];
const SHIPPING: &[&str] = &["shipping", "envio", "costoEnvio", "deliveryCost", "costoDeEnvio"];
const DISCOUNT: &[&str] = &["discount", "descuento", "bonificacion", "promocion"];
const TOTAL: &[&str] = &["total", "totalGeneral", "montoTotal", "precioTotal"];

const ORDER_COLLECTION_KEYS: &[&str] = &[
    "orders",
    "pedidos",
    "data",
    "items",
    "results",
    "content",
    "lista",
    "list",
    "values",
    "rows",
    "orderList",
];
/// A bare object carrying any of these is treated as a single order.
const ORDER_MARKERS: &[&str] = &["id", "numero", "number", "status", "estado"];

const LINE_NAME: &[&str] = &[
    "name",
    "nombre",
    "descripcion",
    "title",
    "producto",
    "descripcionProducto",
    "nombreProducto",
    "productName",
    "titulo",
];
const LINE_ID: &[&str] = &["id", "productId", "productoId", "codigo", "uuid", "sku"];
const LINE_QUANTITY: &[&str] = &["quantity", "cantidad", "qty", "unidades"];
const LINE_UNIT_PRICE: &[&str] = &[
    "unitPrice",
    "price",
    "precioUnitario",
    "precio",
    "valor",
    "costo",
];
const LINE_TOTAL: &[&str] = &[
    "total",
    "monto",
    "totalLinea",
    "importe",
    "subtotal",
    "montoSubtotal",
];
const LINE_IMAGE: &[&str] = &["image", "imagen", "imageUrl", "urlImagen", "thumbnail", "foto"];
const LINE_COLLECTION_KEYS: &[&str] = &[
    "products",
    "productos",
    "items",
    "detalle",
    "detalles",
    "lineItems",
    "lineas",
    "data",
];

/// Adapts one order line. `index` drives the positional fallbacks.
#[must_use]
pub fn adapt_order_line(value: &Value, index: usize) -> Option<OrderLine> {
    let record = Record::new(value)?;

    let name = record
        .string(LINE_NAME)
        .unwrap_or_else(|| format!("Product {}", index + 1));
    let id = record
        .string(LINE_ID)
        .unwrap_or_else(|| format!("{}-{index}", slug(&name)));

    let quantity = record
        .number(LINE_QUANTITY)
        .map(truncate_non_negative)
        .filter(|q| *q > 0)
        .map_or(1, |q| u32::try_from(q).unwrap_or(u32::MAX));

    let price = record
        .number(LINE_UNIT_PRICE)
        .or_else(|| {
            record
                .number(LINE_TOTAL)
                .map(|total| total / f64::from(quantity))
        })
        .filter(|p| p.is_finite())
        .unwrap_or(0.0)
        .max(0.0);

    Some(OrderLine {
        id,
        name,
        quantity,
        price,
        image: record.string(LINE_IMAGE),
    })
}

/// Adapts the line list of an order. A single line object counts as one line.
#[must_use]
pub fn adapt_order_lines(value: &Value) -> Vec<OrderLine> {
    let options = UnwrapOptions::with_candidates(LINE_COLLECTION_KEYS).include_source_object(true);
    unwrap_collection(value, &options)
        .into_iter()
        .enumerate()
        .filter_map(|(index, line)| adapt_order_line(line, index))
        .collect()
}

/// Adapts delivery details from a plain address string or a structured object.
///
/// Returns `None` when nothing useful is present.
#[must_use]
pub fn adapt_delivery(value: &Value) -> Option<DeliveryInfo> {
    if let Value::String(_) = value {
        return normalize_string(value).map(|address| DeliveryInfo {
            address: Some(address),
            ..DeliveryInfo::default()
        });
    }

    let record = Record::new(value)?;
    let street = record.string(&["address", "direccion", "street", "calle"]);
    let number = record.string(&["number", "numero"]);
    let floor = record.string(&["floor", "piso"]);
    let apartment = record.string(&["apartment", "departamento", "depto"]);
    let city = record.string(&["city", "ciudad", "localidad"]);
    let province = record.string(&["province", "provincia", "estado"]);
    let postal_code = record.string(&["postalCode", "codigoPostal", "zip"]);

    let mut parts: Vec<String> = Vec::new();
    if let Some(street) = &street {
        parts.push(match &number {
            Some(number) => format!("{street} {number}"),
            None => street.clone(),
        });
    }
    let unit: Vec<&str> = [floor.as_deref(), apartment.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !unit.is_empty() {
        parts.push(unit.join(" "));
    }
    parts.extend([city, province, postal_code].into_iter().flatten());

    let address = if parts.is_empty() {
        street
    } else {
        Some(parts.join(", "))
    };

    let delivery = DeliveryInfo {
        method: record.string(&["method", "tipo", "metodo", "mode", "tipoEntrega"]),
        address,
        reference: record.string(&["reference", "referencia", "detalle", "indicaciones"]),
        contact_name: record.string(&[
            "contactName",
            "nombre",
            "receiver",
            "destinatario",
            "personaContacto",
        ]),
        contact_phone: record.string(&["contactPhone", "phone", "telefono", "celular"]),
        notes: record.string(&["notes", "nota", "observaciones", "comentarios"]),
        scheduled_at: record.string(&[
            "scheduledAt",
            "deliveryDate",
            "fechaEntrega",
            "horario",
            "programado",
        ]),
    };

    (!delivery.is_empty()).then_some(delivery)
}

/// Monetary breakdown of an order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderCosts {
    pub subtotal: f64,
    pub shipping: f64,
    pub discount: f64,
    pub total: f64,
}

/// Reads costs from the order, deriving what is missing from the lines.
#[must_use]
pub fn adapt_costs(record: &Record<'_>, lines: &[OrderLine]) -> OrderCosts {
    let subtotal = record
        .number(SUBTOTAL)
        .unwrap_or_else(|| finite_or_zero(lines.iter().map(OrderLine::line_total).sum()));
    let shipping = record.number(SHIPPING).unwrap_or(0.0);
    let discount = record.number(DISCOUNT).unwrap_or(0.0);
    let total = record
        .number(TOTAL)
        .unwrap_or_else(|| finite_or_zero(subtotal + shipping - discount));

    OrderCosts {
        subtotal,
        shipping,
        discount,
        total,
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Adapts one order as the customer sees it.
#[must_use]
pub fn adapt_order(value: &Value, index: usize) -> Option<ClientOrder> {
    let record = Record::new(value)?;

    let id = record.string(ORDER_ID);
    let number = record.string(ORDER_NUMBER).or_else(|| id.clone());
    let created_at = record.string(CREATED_AT);

    let identifier = id
        .or_else(|| number.clone())
        .or_else(|| created_at.clone())
        .unwrap_or_else(|| format!("pedido-{index}"));
    let number = number.unwrap_or_else(|| identifier.clone());
    let created_at =
        created_at.unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

    let products = record
        .first(LINES)
        .map(adapt_order_lines)
        .unwrap_or_default();
    let costs = adapt_costs(&record, &products);
    let delivery = DELIVERY
        .iter()
        .find_map(|key| record.get(key).and_then(adapt_delivery));
    let status = record.first(STATUS).map_or_else(Default::default, adapt_status);

    Some(ClientOrder {
        id: identifier,
        number,
        created_at,
        status,
        products,
        subtotal: costs.subtotal,
        shipping: costs.shipping,
        discount: costs.discount,
        total: costs.total,
        delivery,
        message: record.string(MESSAGE),
    })
}

/// Adapts every order in a response body, newest first.
#[must_use]
pub fn adapt_orders(value: &Value) -> Vec<ClientOrder> {
    let mut orders: Vec<ClientOrder> = order_records(value)
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| adapt_order(raw, index))
        .collect();
    sort_orders(&mut orders, |order| order);
    orders
}

/// Customer details for the back office. Never absent: the name falls
/// back to [`UNNAMED_CUSTOMER`].
#[must_use]
pub fn adapt_customer(record: &Record<'_>) -> CustomerInfo {
    let customer = record
        .nested(&["customer", "cliente", "usuario", "user", "buyer", "persona"])
        .unwrap_or(*record);

    let first_name = customer
        .string(&["firstName", "nombre", "name", "primerNombre"])
        .or_else(|| record.string(&["nombreUsuario"]));
    let last_name = customer.string(&["lastName", "apellido", "surname", "segundoNombre"]);
    let full_name = customer
        .string(&["fullName", "displayName", "razonSocial"])
        .or_else(|| record.string(&["customerName", "nombreCliente", "nombre", "nombreUsuario"]));

    let joined: Vec<String> = [first_name, last_name].into_iter().flatten().collect();
    let name = if joined.is_empty() {
        full_name.unwrap_or_else(|| UNNAMED_CUSTOMER.to_string())
    } else {
        joined.join(" ")
    };

    CustomerInfo {
        name,
        email: customer
            .string(&["email", "mail"])
            .or_else(|| record.string(&["customerEmail", "emailCliente", "email"])),
        phone: customer
            .string(&["phone", "telefono", "phoneNumber", "celular"])
            .or_else(|| record.string(&["customerPhone", "telefonoCliente", "telefono"])),
        document: customer
            .string(&["document", "documento", "dni", "cuit", "identificacion"])
            .or_else(|| record.string(&["document", "documento", "dniCliente"])),
    }
}

/// Payment details from a `payment` object, a bare method string, or flat
/// order-level fields.
#[must_use]
pub fn adapt_payment(record: &Record<'_>) -> Option<PaymentInfo> {
    let raw = record.first(&["payment", "metodoPago", "pago", "metodo"]);

    let info = match raw {
        Some(Value::String(_)) => PaymentInfo {
            method: raw.and_then(normalize_string),
            ..PaymentInfo::default()
        },
        Some(value) if value.is_object() => {
            let payment = Record::new(value)?;
            PaymentInfo {
                method: payment
                    .string(&["method", "metodo", "metodoPago", "forma", "formaPago"])
                    .or_else(|| record.string(&["paymentMethod", "metodoPago"])),
                status: payment
                    .string(&["status", "estado", "estadoPago"])
                    .or_else(|| record.string(&["paymentStatus", "estadoPago"])),
                reference: payment
                    .string(&["reference", "referencia", "transactionId", "codigo"])
                    .or_else(|| record.string(&["paymentReference", "referenciaPago"])),
                details: payment
                    .string(&["details", "detalle", "descripcion"])
                    .or_else(|| record.string(&["paymentDetails", "detallePago"])),
            }
        }
        Some(_) => return None,
        None => PaymentInfo {
            method: record.string(&[
                "paymentMethod",
                "metodoPago",
                "metodo",
                "formaPago",
                "medioPago",
                "pago",
            ]),
            status: record.string(&["paymentStatus", "estadoPago", "statusPago", "paymentState"]),
            reference: record.string(&[
                "paymentReference",
                "referenciaPago",
                "transactionId",
                "codigoOperacion",
            ]),
            details: record.string(&[
                "paymentDetails",
                "detallePago",
                "descripcionPago",
                "detallesPago",
            ]),
        },
    };

    (!info.is_empty()).then_some(info)
}

/// Adapts one order with customer, payment, and notes.
#[must_use]
pub fn adapt_admin_order(value: &Value, index: usize) -> Option<AdminOrder> {
    let order = adapt_order(value, index)?;
    let record = Record::new(value)?;

    Some(AdminOrder {
        order,
        customer: adapt_customer(&record),
        payment: adapt_payment(&record),
        notes: record.string(&[
            "notes",
            "nota",
            "observaciones",
            "comentarios",
            "comentario",
            "mensajeCliente",
            "notaCliente",
        ]),
    })
}

/// Adapts every order in a back-office response body, newest first.
#[must_use]
pub fn adapt_admin_orders(value: &Value) -> Vec<AdminOrder> {
    let mut orders: Vec<AdminOrder> = order_records(value)
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| adapt_admin_order(raw, index))
        .collect();
    sort_orders(&mut orders, |admin| &admin.order);
    orders
}

fn order_records(value: &Value) -> Vec<&Value> {
    let looks_like_order = Record::new(value).is_some_and(|r| r.has_any(ORDER_MARKERS));
    let options = UnwrapOptions::with_candidates(ORDER_COLLECTION_KEYS)
        .include_source_object(looks_like_order);
    unwrap_collection(value, &options)
}

/// Newest first when both dates parse; dated orders precede undated ones;
/// everything else falls back to comparing order numbers.
fn sort_orders<T>(orders: &mut [T], order_of: impl Fn(&T) -> &ClientOrder) {
    orders.sort_by(|a, b| {
        let (a, b) = (order_of(a), order_of(b));
        match (parse_timestamp(&a.created_at), parse_timestamp(&b.created_at)) {
            (Some(at), Some(bt)) => bt.cmp(&at).then_with(|| a.number.cmp(&b.number)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.number.cmp(&b.number),
        }
    });
}

/// Parses the date formats the backend is known to emit.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
#[path = "order_test.rs"]
mod tests;
