use std::collections::HashSet;

use serde_json::Value;
use tuki_core::Product;

use crate::collection::{unwrap_collection, UnwrapOptions};
use crate::record::Record;

pub const UNNAMED_PRODUCT: &str = "Unnamed product";
pub const NO_DESCRIPTION: &str = "No description";
pub const UNCATEGORIZED: &str = "Uncategorized";

const ID: &[&str] = &["id", "ID", "productId", "productoId", "identifier", "codigo"];
const NAME: &[&str] = &["nombre", "name", "titulo", "title"];
const DESCRIPTION: &[&str] = &["descripcion", "description", "detalle", "resumen"];
const PRICE: &[&str] = &["precio", "price", "costo", "valor"];
const STOCK: &[&str] = &["stock", "existencia", "existencias", "inventory", "cantidad"];
const IMAGE: &[&str] = &["urlImagen", "imageUrl", "image", "imagen", "imagenUrl", "foto"];

const CATEGORY_ID: &[&str] = &["categoriaId", "categoryId"];
const CATEGORY_ID_NESTED: &[(&str, &str)] = &[
    ("categoria", "id"),
    ("categoria", "categoriaId"),
    ("category", "id"),
    ("category", "categoryId"),
];
const CATEGORY_NAME: &[&str] = &[
    "categoriaNombre",
    "categoryName",
    "categoria",
    "category",
    "tipo",
    "rubro",
];
const CATEGORY_NAME_NESTED: &[(&str, &str)] = &[
    ("categoria", "nombre"),
    ("categoria", "name"),
    ("category", "nombre"),
    ("category", "name"),
];

const AVAILABLE: &[&str] = &["disponible", "available", "activo", "active", "habilitado", "enabled"];
const DELETED: &[&str] = &["eliminado", "deleted", "isDeleted", "inactivo"];

const COLLECTION_KEYS: &[&str] = &[
    "productos",
    "products",
    "data",
    "items",
    "results",
    "content",
    "lista",
    "list",
    "values",
    "rows",
    "producto",
    "product",
];

/// Adapts one product record. Only the id is mandatory.
///
/// Availability comes from an explicit flag, else the inverse of a
/// deleted flag, else whether any stock is left.
#[must_use]
pub fn adapt_product(value: &Value) -> Option<Product> {
    let record = Record::new(value)?;
    let id = record.id(ID)?;

    let stock = record.count(STOCK).unwrap_or(0);
    let available = record
        .boolean(AVAILABLE)
        .or_else(|| record.boolean(DELETED).map(|deleted| !deleted))
        .unwrap_or(stock > 0);

    Some(Product {
        id,
        name: record
            .string(NAME)
            .unwrap_or_else(|| UNNAMED_PRODUCT.to_string()),
        description: record
            .string(DESCRIPTION)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        price: record.number(PRICE).unwrap_or(0.0).max(0.0),
        stock,
        image_url: record.string(IMAGE),
        category_id: record
            .id(CATEGORY_ID)
            .or_else(|| record.nested_id(CATEGORY_ID_NESTED)),
        category_name: record
            .string(CATEGORY_NAME)
            .or_else(|| record.nested_string(CATEGORY_NAME_NESTED))
            .unwrap_or_else(|| UNCATEGORIZED.to_string()),
        available,
    })
}

/// Adapts every usable product in a response body.
#[must_use]
pub fn adapt_products(value: &Value) -> Vec<Product> {
    let options = UnwrapOptions::with_candidates(COLLECTION_KEYS).unwrap_nested_object(true);
    unwrap_collection(value, &options)
        .into_iter()
        .filter_map(adapt_product)
        .collect()
}

/// Finds `expected_id` in a detail response, which may be the product
/// itself or a wrapper/listing containing it.
#[must_use]
pub fn adapt_product_response(value: &Value, expected_id: u64) -> Option<Product> {
    if let Some(product) = adapt_product(value).filter(|p| p.id == expected_id) {
        return Some(product);
    }
    adapt_products(value)
        .into_iter()
        .find(|p| p.id == expected_id)
}

/// Forces every product listed in `deleted` to unavailable.
#[must_use]
pub fn mark_deleted(products: Vec<Product>, deleted: &[Product]) -> Vec<Product> {
    let deleted_ids: HashSet<u64> = deleted.iter().map(|p| p.id).collect();
    products
        .into_iter()
        .map(|mut product| {
            if deleted_ids.contains(&product.id) {
                product.available = false;
            }
            product
        })
        .collect()
}
